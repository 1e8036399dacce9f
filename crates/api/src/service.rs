//! Lead submission handling.
//!
//! Owns the per-instance state: rate-limit windows, the fallback store,
//! component health and the optional collaborators. Nothing here is shared
//! across instances.

use lead_core::limits::{DEFAULT_PERSIST_TIMEOUT_SECS, RECENT_LISTING_LIMIT};
use lead_core::{sanitize_user_agent, validate_form, Error, LeadPayload, Result, Submission};
use lead_store::{FallbackStore, SubmissionSink};
use std::sync::Arc;
use std::time::{Duration, Instant};
use telemetry::{metrics, HealthRegistry};
use tracing::{debug, info, warn};
use worker::{Notification, Notifier};

use crate::middleware::auth::admin_key_matches;
use crate::middleware::rate_limit::{RateLimitConfig, RateLimiter, SharedRateLimiter};

/// Service configuration.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Key required by the listing; `None` locks it
    pub admin_api_key: Option<String>,
    /// Upper bound on one external write
    pub persist_timeout: Duration,
    pub rate_limit: RateLimitConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            admin_api_key: None,
            persist_timeout: Duration::from_secs(DEFAULT_PERSIST_TIMEOUT_SECS),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

/// Result of an authorized listing.
#[derive(Debug, Clone)]
pub struct RecentSubmissions {
    /// Records currently held
    pub count: usize,
    /// Newest records, oldest first
    pub submissions: Vec<Submission>,
}

/// Validates, sanitizes and stores lead submissions.
pub struct LeadService {
    config: ServiceConfig,
    rate_limiter: SharedRateLimiter,
    store: FallbackStore,
    health: Arc<HealthRegistry>,
    sink: Option<Arc<dyn SubmissionSink>>,
    notifier: Option<Arc<dyn Notifier>>,
}

impl LeadService {
    pub fn new(config: ServiceConfig) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(config.rate_limit.clone()));
        Self {
            config,
            rate_limiter,
            store: FallbackStore::default(),
            health: Arc::new(HealthRegistry::new()),
            sink: None,
            notifier: None,
        }
    }

    /// Enable external persistence.
    pub fn with_sink(mut self, sink: Arc<dyn SubmissionSink>) -> Self {
        self.health.persistence.set_enabled(true);
        self.health.persistence.set_healthy();
        self.sink = Some(sink);
        self
    }

    /// Enable new-lead notifications.
    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.health.notifier.set_enabled(true);
        self.health.notifier.set_healthy();
        self.notifier = Some(notifier);
        self
    }

    pub fn rate_limiter(&self) -> &SharedRateLimiter {
        &self.rate_limiter
    }

    pub fn store(&self) -> &FallbackStore {
        &self.store
    }

    /// Health of this instance's collaborators.
    pub fn health(&self) -> &Arc<HealthRegistry> {
        &self.health
    }

    pub fn persistence_configured(&self) -> bool {
        self.sink.is_some()
    }

    /// Handle one submission body from `client_ip`.
    ///
    /// A rate-limited request is rejected before the body is parsed.
    /// External persistence failures never fail the request.
    pub async fn submit(
        &self,
        body: &[u8],
        client_ip: &str,
        user_agent: Option<&str>,
    ) -> Result<Submission> {
        let start = Instant::now();
        metrics().submissions_received.inc();

        let decision = self.rate_limiter.check_and_consume(client_ip);
        if let Some(retry_after_secs) = decision.retry_after_secs() {
            metrics().rate_limited_requests.inc();
            warn!(client_ip = %client_ip, retry_after_secs, "Rate limit exceeded");
            return Err(Error::rate_limited(retry_after_secs));
        }

        let payload = LeadPayload::parse(body).map_err(|e| {
            metrics().internal_errors.inc();
            Error::internal(format!("unreadable submission body: {}", e))
        })?;

        let form = payload.sanitize();
        let form_type = validate_form(&form).inspect_err(|e| {
            metrics().submissions_rejected.inc();
            debug!(client_ip = %client_ip, error = %e, "Submission rejected");
        })?;

        let submission = Submission::new(form, form_type, sanitize_user_agent(user_agent));

        if let Some(sink) = &self.sink {
            self.persist(sink.as_ref(), &submission).await;
        }

        if let Some(evicted) = self.store.push(submission.clone()) {
            debug!(evicted_id = %evicted.id, "Fallback store full, evicted oldest");
        }

        if let Some(notifier) = &self.notifier {
            dispatch_notification(
                notifier.clone(),
                self.health.clone(),
                Notification::new_lead(&submission),
            );
        }

        let latency_ms = start.elapsed().as_millis() as u64;
        metrics().submissions_accepted.inc();
        metrics().submit_latency_ms.observe(latency_ms);

        info!(
            submission_id = %submission.id,
            form_type = %submission.form_type,
            latency_ms = latency_ms,
            "Submission accepted"
        );

        Ok(submission)
    }

    async fn persist(&self, sink: &dyn SubmissionSink, submission: &Submission) {
        let start = Instant::now();
        let timeout = self.config.persist_timeout;

        let result = match tokio::time::timeout(timeout, sink.write(submission)).await {
            Ok(result) => result,
            Err(_) => Err(Error::degraded(format!(
                "{} write timed out after {}ms",
                sink.name(),
                timeout.as_millis()
            ))),
        };

        metrics()
            .persist_latency_ms
            .observe(start.elapsed().as_millis() as u64);

        match result {
            Ok(()) => {
                metrics().persistence_writes.inc();
                self.health.persistence.set_healthy();
            }
            Err(e) => {
                metrics().persistence_degraded.inc();
                warn!(
                    sink = sink.name(),
                    submission_id = %submission.id,
                    error = %e,
                    "External persistence failed, record kept in memory only"
                );
                self.health.persistence.set_unhealthy(e.to_string());
            }
        }
    }

    /// Recent submissions for an admin caller.
    pub fn list_recent(&self, api_key: Option<&str>) -> Result<RecentSubmissions> {
        metrics().admin_list_requests.inc();

        if !admin_key_matches(self.config.admin_api_key.as_deref(), api_key) {
            metrics().admin_unauthorized.inc();
            warn!(key_present = api_key.is_some(), "Unauthorized submission listing");
            return Err(Error::Unauthorized);
        }

        let (count, submissions) = self.store.recent(RECENT_LISTING_LIMIT);
        Ok(RecentSubmissions { count, submissions })
    }
}

fn dispatch_notification(
    notifier: Arc<dyn Notifier>,
    health: Arc<HealthRegistry>,
    notification: Notification,
) {
    tokio::spawn(async move {
        match notifier.send(notification).await {
            Ok(()) => {
                metrics().notifications_sent.inc();
                health.notifier.set_healthy();
            }
            Err(e) => {
                metrics().notification_errors.inc();
                warn!(error = %e, "Lead notification failed");
                health.notifier.set_unhealthy(e.to_string());
            }
        }
    });
}
