//! Persistence seam for submissions.

use async_trait::async_trait;
use lead_core::{Result, Submission};

/// Best-effort durable write of one submission.
///
/// Implementations return `Error::PersistenceDegraded` on failure; the
/// caller logs it and carries on with the in-memory fallback.
#[async_trait]
pub trait SubmissionSink: Send + Sync {
    /// Writes one record.
    async fn write(&self, submission: &Submission) -> Result<()>;

    /// Short name for logs and health reports.
    fn name(&self) -> &'static str;
}
