//! Mock implementations for testing.

use async_trait::async_trait;
use lead_core::{Error, Result, Submission};
use lead_store::SubmissionSink;
use parking_lot::Mutex;
use std::sync::Arc;
use worker::{Notification, Notifier, NotifyError};

/// Mock sink that captures submissions in memory.
///
/// Implements the same `SubmissionSink` trait as the REST client, so tests
/// see exactly what would have been written.
#[derive(Clone, Default)]
pub struct MockSink {
    records: Arc<Mutex<Vec<Submission>>>,
    should_fail: Arc<Mutex<bool>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn captured(&self) -> Vec<Submission> {
        self.records.lock().clone()
    }

    pub fn count(&self) -> usize {
        self.records.lock().len()
    }

    /// Set failure mode for testing degraded persistence.
    pub fn set_should_fail(&self, fail: bool) {
        *self.should_fail.lock() = fail;
    }
}

#[async_trait]
impl SubmissionSink for MockSink {
    async fn write(&self, submission: &Submission) -> Result<()> {
        if *self.should_fail.lock() {
            return Err(Error::degraded("Mock sink failure"));
        }
        self.records.lock().push(submission.clone());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

/// Mock notifier that records every notification.
#[derive(Clone, Default)]
pub struct MockNotifier {
    sent: Arc<Mutex<Vec<Notification>>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().clone()
    }

    /// Wait for the detached notification tasks to run.
    pub async fn wait_for(&self, n: usize) -> Vec<Notification> {
        for _ in 0..100 {
            if self.sent.lock().len() >= n {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, notification: Notification) -> std::result::Result<(), NotifyError> {
        self.sent.lock().push(notification);
        Ok(())
    }
}
