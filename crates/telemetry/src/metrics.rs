//! In-process metrics.
//!
//! Plain atomics, read by the health endpoint and logged periodically.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// A monotonically increasing counter.
#[derive(Debug, Default)]
pub struct Counter(AtomicU64);

impl Counter {
    pub fn new() -> Self {
        Self(AtomicU64::new(0))
    }

    pub fn inc(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self) -> u64 {
        self.0.load(Ordering::Relaxed)
    }
}

/// Histogram for latency tracking.
#[derive(Debug)]
pub struct Histogram {
    /// Buckets: 1ms, 5ms, 10ms, 25ms, 50ms, 100ms, 250ms, 500ms, 1s, 5s, 10s
    buckets: [AtomicU64; 11],
    sum: AtomicU64,
    count: AtomicU64,
}

impl Default for Histogram {
    fn default() -> Self {
        Self::new()
    }
}

impl Histogram {
    const BUCKET_BOUNDS: [u64; 11] = [1, 5, 10, 25, 50, 100, 250, 500, 1000, 5000, 10000];

    pub fn new() -> Self {
        Self {
            buckets: Default::default(),
            sum: AtomicU64::new(0),
            count: AtomicU64::new(0),
        }
    }

    /// Records a value in milliseconds. Values past the last bound land
    /// in the last bucket.
    pub fn observe(&self, ms: u64) {
        self.sum.fetch_add(ms, Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Relaxed);

        let idx = Self::BUCKET_BOUNDS
            .iter()
            .position(|&bound| ms <= bound)
            .unwrap_or(Self::BUCKET_BOUNDS.len() - 1);
        self.buckets[idx].fetch_add(1, Ordering::Relaxed);
    }

    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    pub fn sum(&self) -> u64 {
        self.sum.load(Ordering::Relaxed)
    }

    pub fn mean(&self) -> f64 {
        let count = self.count();
        if count == 0 {
            0.0
        } else {
            self.sum() as f64 / count as f64
        }
    }

    /// Returns `(upper bound ms, count)` pairs.
    #[cfg(test)]
    fn buckets(&self) -> Vec<(u64, u64)> {
        Self::BUCKET_BOUNDS
            .iter()
            .zip(self.buckets.iter())
            .map(|(&bound, count)| (bound, count.load(Ordering::Relaxed)))
            .collect()
    }
}

/// Lead intake metrics.
#[derive(Debug, Default)]
pub struct Metrics {
    // Submission outcomes
    pub submissions_received: Counter,
    pub submissions_accepted: Counter,
    pub submissions_rejected: Counter,
    pub rate_limited_requests: Counter,
    pub internal_errors: Counter,

    // External persistence
    pub persistence_writes: Counter,
    pub persistence_degraded: Counter,

    // Notifications
    pub notifications_sent: Counter,
    pub notification_errors: Counter,

    // Admin listing
    pub admin_list_requests: Counter,
    pub admin_unauthorized: Counter,

    pub submit_latency_ms: Histogram,
    pub persist_latency_ms: Histogram,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSnapshot {
    pub timestamp: DateTime<Utc>,
    pub submissions_received: u64,
    pub submissions_accepted: u64,
    pub submissions_rejected: u64,
    pub rate_limited_requests: u64,
    pub internal_errors: u64,
    pub persistence_writes: u64,
    pub persistence_degraded: u64,
    pub notifications_sent: u64,
    pub notification_errors: u64,
    pub submit_latency_mean_ms: f64,
    pub persist_latency_mean_ms: f64,
}

impl Metrics {
    /// Takes a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            timestamp: Utc::now(),
            submissions_received: self.submissions_received.get(),
            submissions_accepted: self.submissions_accepted.get(),
            submissions_rejected: self.submissions_rejected.get(),
            rate_limited_requests: self.rate_limited_requests.get(),
            internal_errors: self.internal_errors.get(),
            persistence_writes: self.persistence_writes.get(),
            persistence_degraded: self.persistence_degraded.get(),
            notifications_sent: self.notifications_sent.get(),
            notification_errors: self.notification_errors.get(),
            submit_latency_mean_ms: self.submit_latency_ms.mean(),
            persist_latency_mean_ms: self.persist_latency_ms.mean(),
        }
    }
}

/// Global metrics registry.
pub static METRICS: std::sync::LazyLock<Metrics> = std::sync::LazyLock::new(Metrics::new);

/// Get the global metrics instance.
pub fn metrics() -> &'static Metrics {
    &METRICS
}
