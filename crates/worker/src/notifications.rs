//! Lead notifications and admin alerts.

use async_trait::async_trait;
use lead_core::{FormType, Submission};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

/// Notification delivery failure.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("channel {channel} failed: {message}")]
    Channel {
        channel: &'static str,
        message: String,
    },
}

/// Notification types.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// A lead was accepted
    NewLead {
        submission_id: String,
        form_type: FormType,
        submitted_at: String,
    },
    /// System alert
    SystemAlert { message: String, severity: String },
}

impl Notification {
    /// Builds a lead notification. Contact details stay out of it.
    pub fn new_lead(submission: &Submission) -> Self {
        Self::NewLead {
            submission_id: submission.id.clone(),
            form_type: submission.form_type,
            submitted_at: submission.submitted_at.clone(),
        }
    }
}

/// Out-of-band alerting hook.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError>;
}

/// Notification worker. Delivery is a structured log line.
#[derive(Debug, Default)]
pub struct NotificationWorker;

impl NotificationWorker {
    pub fn new() -> Self {
        Self
    }

    /// Check metrics and raise alerts when external persistence keeps failing.
    pub async fn check_and_alert(&self) -> Result<(), NotifyError> {
        use telemetry::metrics;

        let snapshot = metrics().snapshot();

        let attempts = snapshot.persistence_writes + snapshot.persistence_degraded;
        if attempts > 0 {
            let failure_rate = snapshot.persistence_degraded as f64 / attempts as f64;
            if failure_rate > 0.5 {
                self.send(Notification::SystemAlert {
                    message: format!(
                        "External store failing: {:.0}% of writes degraded to memory",
                        failure_rate * 100.0
                    ),
                    severity: "warning".to_string(),
                })
                .await?;
            }
        }

        Ok(())
    }
}

#[async_trait]
impl Notifier for NotificationWorker {
    async fn send(&self, notification: Notification) -> Result<(), NotifyError> {
        info!(notification = ?notification, "Notification");
        Ok(())
    }
}
