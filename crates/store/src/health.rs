//! REST store health checks.

use crate::client::RestStoreClient;
use tracing::{debug, error};

/// Check that the REST backend answers with the configured key.
pub async fn check_connection(client: &RestStoreClient) -> bool {
    let url = format!("{}/rest/v1/", client.config().url.trim_end_matches('/'));

    match client.authorize(client.inner().get(&url)).send().await {
        Ok(response) if response.status().is_success() => {
            debug!("REST store connection healthy");
            true
        }
        Ok(response) => {
            error!(status = %response.status(), "REST store health check rejected");
            false
        }
        Err(e) => {
            error!("REST store health check failed: {}", e);
            false
        }
    }
}
