//! Common test setup functions.

use api::{router, AppState, LeadService, ServiceConfig};
use axum::Router;
use axum_test::TestServer;
use lead_store::{RestStoreClient, RestStoreConfig};
use std::sync::Arc;
use std::time::Duration;

use crate::mocks::{MockNotifier, MockSink};

/// Admin key configured on every test context.
pub const ADMIN_KEY: &str = "test-admin-key";

/// Test context around a fresh service instance.
///
/// Uses the real router with all layers; collaborators are mocks unless
/// the context was built against a REST store.
pub struct TestContext {
    pub state: AppState,
    pub router: Router,
    pub mock_sink: Option<MockSink>,
    pub mock_notifier: Option<MockNotifier>,
}

impl TestContext {
    /// No external persistence, no notifications.
    pub fn new() -> Self {
        Self::build(service(Some(ADMIN_KEY)), None, None)
    }

    /// Listing locked: no admin key configured.
    pub fn without_admin_key() -> Self {
        Self::build(service(None), None, None)
    }

    /// Mock sink and mock notifier attached.
    pub fn with_mocks() -> Self {
        let sink = MockSink::new();
        let notifier = MockNotifier::new();
        let service = service(Some(ADMIN_KEY))
            .with_sink(Arc::new(sink.clone()))
            .with_notifier(Arc::new(notifier.clone()));
        Self::build(service, Some(sink), Some(notifier))
    }

    /// Real REST client pointed at `url`.
    pub fn with_rest_store(url: &str) -> Self {
        let client = RestStoreClient::new(RestStoreConfig {
            url: url.to_string(),
            api_key: "service-key".to_string(),
            timeout_secs: 2,
            ..Default::default()
        })
        .expect("Failed to create REST store client");

        let service = service(Some(ADMIN_KEY)).with_sink(Arc::new(client));
        Self::build(service, None, None)
    }

    fn build(
        service: LeadService,
        mock_sink: Option<MockSink>,
        mock_notifier: Option<MockNotifier>,
    ) -> Self {
        let state = AppState::new(service);
        let router = router(state.clone());
        Self {
            state,
            router,
            mock_sink,
            mock_notifier,
        }
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router.clone()).expect("Failed to create test server")
    }

    /// Records in the in-memory fallback store.
    pub fn stored(&self) -> usize {
        self.state.service.store().len()
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

fn service(admin_key: Option<&str>) -> LeadService {
    LeadService::new(ServiceConfig {
        admin_api_key: admin_key.map(str::to_string),
        persist_timeout: Duration::from_secs(2),
        ..Default::default()
    })
}
