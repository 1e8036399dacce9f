//! Row insertion against the REST backend.

use async_trait::async_trait;
use lead_core::{Error, Result, Submission};
use tracing::{debug, warn};

use crate::client::RestStoreClient;
use crate::sink::SubmissionSink;

/// Inserts one submission row.
///
/// Any transport error, timeout, or non-2xx status is reported as
/// `Error::PersistenceDegraded`.
pub async fn insert_submission(client: &RestStoreClient, submission: &Submission) -> Result<()> {
    let url = client.config().insert_url();

    debug!(url = %url, id = %submission.id, "Inserting submission");

    let response = client
        .authorize(client.inner().post(&url))
        .header("Prefer", "return=minimal")
        .json(submission)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                Error::degraded("store write timed out")
            } else {
                Error::degraded(format!("store request failed: {}", e))
            }
        })?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "Store rejected submission");
        return Err(Error::degraded(format!("store returned {}", status)));
    }

    Ok(())
}

#[async_trait]
impl SubmissionSink for RestStoreClient {
    async fn write(&self, submission: &Submission) -> Result<()> {
        insert_submission(self, submission).await
    }

    fn name(&self) -> &'static str {
        "rest"
    }
}
