//! Fixed-window rate limiting keyed by client IP.

use lead_core::limits::{RATE_LIMIT_MAX_REQUESTS, RATE_LIMIT_WINDOW_SECS};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Fixed-window rate limiter.
///
/// The first request from a key opens a window; at most `max_requests` are
/// admitted until it closes. Bursts across a window boundary are allowed.
pub struct RateLimiter {
    records: Mutex<HashMap<String, RateLimitRecord>>,
    config: RateLimitConfig,
}

#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Window length
    pub window: Duration,
    /// Requests admitted per window
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window: Duration::from_secs(RATE_LIMIT_WINDOW_SECS),
            max_requests: RATE_LIMIT_MAX_REQUESTS,
        }
    }
}

/// Outcome of one rate-limit check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    Allowed { remaining: u32 },
    Limited { retry_after: Duration },
}

impl RateLimitDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed { .. })
    }

    /// Whole seconds until the window resets, at least 1.
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            Self::Allowed { .. } => None,
            Self::Limited { retry_after } => {
                let secs = retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0);
                Some(secs.max(1))
            }
        }
    }
}

struct RateLimitRecord {
    count: u32,
    reset_at: Instant,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            config,
        }
    }

    /// Check the key and count the request if it is admitted.
    pub fn check_and_consume(&self, key: &str) -> RateLimitDecision {
        self.check_and_consume_at(key, Instant::now())
    }

    pub fn check_and_consume_at(&self, key: &str, now: Instant) -> RateLimitDecision {
        let max = self.config.max_requests;
        let mut records = self.records.lock();

        match records.get_mut(key) {
            // reset_at itself still belongs to the open window
            Some(record) if now <= record.reset_at => {
                if record.count >= max {
                    RateLimitDecision::Limited {
                        retry_after: record.reset_at.saturating_duration_since(now),
                    }
                } else {
                    record.count += 1;
                    RateLimitDecision::Allowed {
                        remaining: max - record.count,
                    }
                }
            }
            _ => {
                let reset_at = now + self.config.window;
                if max == 0 {
                    return RateLimitDecision::Limited {
                        retry_after: self.config.window,
                    };
                }
                records.insert(key.to_string(), RateLimitRecord { count: 1, reset_at });
                RateLimitDecision::Allowed { remaining: max - 1 }
            }
        }
    }

    /// Drop records whose window has closed.
    ///
    /// A swept key starts a fresh window on its next request, which is what
    /// the expired record would have produced anyway.
    pub fn cleanup_stale(&self) -> usize {
        self.cleanup_stale_at(Instant::now())
    }

    pub fn cleanup_stale_at(&self, now: Instant) -> usize {
        let mut records = self.records.lock();
        let before = records.len();
        records.retain(|_, record| now <= record.reset_at);
        before - records.len()
    }

    /// Number of keys currently tracked.
    pub fn tracked_keys(&self) -> usize {
        self.records.lock().len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

/// Shared rate limiter state.
pub type SharedRateLimiter = Arc<RateLimiter>;
