//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

use crate::service::LeadService;

/// How often expired rate-limit windows are swept.
const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<LeadService>,
}

impl AppState {
    pub fn new(service: LeadService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Start the rate limiter cleanup background task.
    /// Returns a handle that can be used to cancel the task.
    pub fn start_rate_limiter_cleanup(&self) -> tokio::task::JoinHandle<()> {
        let rate_limiter = self.service.rate_limiter().clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(RATE_LIMIT_CLEANUP_INTERVAL);
            loop {
                interval.tick().await;
                let removed = rate_limiter.cleanup_stale();
                debug!(
                    removed = removed,
                    tracked = rate_limiter.tracked_keys(),
                    "Swept expired rate-limit windows"
                );
            }
        })
    }
}
