//! Worker scheduler for background tasks.

use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{error, info, warn};

use lead_store::RestStoreClient;
use telemetry::{metrics, HealthRegistry};

use crate::notifications::NotificationWorker;

/// Worker scheduler configuration.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Metrics log interval
    pub metrics_log_interval: Duration,
    /// Alert check interval
    pub alert_check_interval: Duration,
    /// External store probe interval
    pub persistence_probe_interval: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            metrics_log_interval: Duration::from_secs(60),
            alert_check_interval: Duration::from_secs(60),
            persistence_probe_interval: Duration::from_secs(30),
        }
    }
}

/// Background worker scheduler.
pub struct WorkerScheduler {
    config: WorkerConfig,
    notifier: Arc<NotificationWorker>,
    store: Option<(Arc<RestStoreClient>, Arc<HealthRegistry>)>,
}

impl WorkerScheduler {
    pub fn new(config: WorkerConfig, notifier: Arc<NotificationWorker>) -> Self {
        Self {
            config,
            notifier,
            store: None,
        }
    }

    /// Also probe the external store and keep `health` current.
    pub fn with_store(mut self, store: Arc<RestStoreClient>, health: Arc<HealthRegistry>) -> Self {
        self.store = Some((store, health));
        self
    }

    /// Starts all background workers.
    pub fn start(self: Arc<Self>) -> Vec<tokio::task::JoinHandle<()>> {
        let mut handles = Vec::new();

        let scheduler = self.clone();
        handles.push(tokio::spawn(async move {
            scheduler.run_metrics_log().await;
        }));

        let scheduler = self.clone();
        handles.push(tokio::spawn(async move {
            scheduler.run_alert_checks().await;
        }));

        if self.store.is_some() {
            let scheduler = self.clone();
            handles.push(tokio::spawn(async move {
                scheduler.run_persistence_probe().await;
            }));
        }

        info!(workers = handles.len(), "Background workers started");
        handles
    }

    async fn run_metrics_log(&self) {
        let mut ticker = interval(self.config.metrics_log_interval);

        loop {
            ticker.tick().await;

            let snapshot = metrics().snapshot();
            info!(
                received = snapshot.submissions_received,
                accepted = snapshot.submissions_accepted,
                rejected = snapshot.submissions_rejected,
                rate_limited = snapshot.rate_limited_requests,
                degraded = snapshot.persistence_degraded,
                submit_ms = snapshot.submit_latency_mean_ms,
                "Lead intake metrics"
            );
        }
    }

    async fn run_alert_checks(&self) {
        let mut ticker = interval(self.config.alert_check_interval);

        loop {
            ticker.tick().await;

            if let Err(e) = self.notifier.check_and_alert().await {
                error!("Notification check error: {}", e);
            }
        }
    }

    async fn run_persistence_probe(&self) {
        let Some((store, health)) = self.store.as_ref() else {
            return;
        };
        let mut ticker = interval(self.config.persistence_probe_interval);

        loop {
            ticker.tick().await;

            if lead_store::health::check_connection(store).await {
                health.persistence.set_healthy();
            } else {
                warn!("External store probe failed");
                health.persistence.set_unhealthy("probe failed");
            }
        }
    }
}
