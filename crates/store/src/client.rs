//! REST store client wrapper.

use crate::config::RestStoreConfig;
use lead_core::{Error, Result};
use std::time::Duration;
use tracing::info;
use url::Url;

/// HTTP client bound to one REST backend.
#[derive(Clone)]
pub struct RestStoreClient {
    inner: reqwest::Client,
    config: RestStoreConfig,
}

impl RestStoreClient {
    /// Creates a new client. Fails on an unparseable base URL.
    pub fn new(config: RestStoreConfig) -> Result<Self> {
        let base = Url::parse(config.url.trim())
            .map_err(|e| Error::internal(format!("Invalid store URL: {}", e)))?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(Error::internal(format!(
                "Unsupported store URL scheme: {}",
                base.scheme()
            )));
        }

        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::internal(format!("Failed to create HTTP client: {}", e)))?;

        info!(
            host = base.host_str().unwrap_or(""),
            table = %config.table,
            timeout_secs = config.timeout_secs,
            "Created REST store client"
        );

        Ok(Self { inner, config })
    }

    /// Returns the inner HTTP client.
    pub fn inner(&self) -> &reqwest::Client {
        &self.inner
    }

    /// Returns the configuration.
    pub fn config(&self) -> &RestStoreConfig {
        &self.config
    }

    /// Attaches the `apikey` and bearer headers.
    pub(crate) fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(&self.config.api_key)
    }
}
