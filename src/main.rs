//! Lead Intake Service
//!
//! Backend for the advisory website contact forms:
//! - Per-IP fixed-window rate limiting
//! - Sanitization and validation of submissions
//! - Best-effort persistence to an external REST store, with an in-memory fallback
//! - Admin listing of recent submissions

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info, warn};

use api::{router, AppState, LeadService, ServiceConfig};
use lead_store::{RestStoreClient, RestStoreConfig};
use telemetry::{init_tracing_from_env, HealthRegistry};
use worker::{NotificationWorker, WorkerConfig, WorkerScheduler};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    /// External REST store; disabled unless url and key are both set
    #[serde(default)]
    store: RestStoreConfig,

    /// Enables new-lead notifications when set
    #[serde(default)]
    notify_key: Option<String>,

    /// Key required by `GET /api/contact`
    #[serde(default)]
    admin_api_key: Option<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store: RestStoreConfig::default(),
            notify_key: None,
            admin_api_key: None,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing_from_env();

    info!("Starting Lead Intake Service v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config()?;

    info!(
        store_configured = config.store.is_configured(),
        notifications = config.notify_key.is_some(),
        admin_listing = config.admin_api_key.is_some(),
        "Loaded configuration"
    );
    if config.admin_api_key.is_none() {
        warn!("No admin API key configured, submission listing is disabled");
    }

    let mut service = LeadService::new(ServiceConfig {
        admin_api_key: config.admin_api_key.clone(),
        persist_timeout: Duration::from_secs(config.store.timeout_secs),
        ..Default::default()
    });

    let store = if config.store.is_configured() {
        let client = Arc::new(
            RestStoreClient::new(config.store.clone())
                .context("Failed to create REST store client")?,
        );
        service = service.with_sink(client.clone());
        check_health(&client, service.health()).await;
        Some(client)
    } else {
        info!("External persistence not configured, using in-memory store only");
        None
    };

    let notifier = Arc::new(NotificationWorker::new());
    if config.notify_key.is_some() {
        service = service.with_notifier(notifier.clone());
    }

    // Start background workers
    let mut worker_scheduler = WorkerScheduler::new(WorkerConfig::default(), notifier);
    if let Some(store) = store {
        worker_scheduler = worker_scheduler.with_store(store, service.health().clone());
    }
    let _worker_handles = Arc::new(worker_scheduler).start();

    let state = AppState::new(service);

    // Start rate limiter cleanup background task
    let _rate_limiter_cleanup = state.start_rate_limiter_cleanup();
    info!("Started rate limiter cleanup task (every 5 minutes)");

    let app = router(state);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("LEADS")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Flat overrides; nested parsing does not cope with underscored field names
    if let Ok(host) = std::env::var("LEADS_HOST") {
        config.host = host;
    }
    if let Ok(port) = std::env::var("LEADS_PORT") {
        config.port = port.parse().context("LEADS_PORT is not a valid port")?;
    }
    if let Ok(url) = std::env::var("LEADS_STORE_URL") {
        config.store.url = url;
    }
    if let Ok(key) = std::env::var("LEADS_STORE_KEY") {
        config.store.api_key = key;
    }
    if let Ok(table) = std::env::var("LEADS_STORE_TABLE") {
        config.store.table = table;
    }
    if let Ok(secs) = std::env::var("LEADS_STORE_TIMEOUT_SECS") {
        config.store.timeout_secs = secs
            .parse()
            .context("LEADS_STORE_TIMEOUT_SECS is not a number")?;
    }
    if let Ok(key) = std::env::var("LEADS_NOTIFY_KEY") {
        config.notify_key = Some(key);
    }
    if let Ok(key) = std::env::var("LEADS_ADMIN_API_KEY") {
        config.admin_api_key = Some(key);
    }

    // Blank secrets behave as unset
    config.notify_key = config.notify_key.filter(|k| !k.trim().is_empty());
    config.admin_api_key = config.admin_api_key.filter(|k| !k.trim().is_empty());

    Ok(config)
}

/// Check the external store on startup.
async fn check_health(store: &RestStoreClient, health: &HealthRegistry) {
    if lead_store::health::check_connection(store).await {
        health.persistence.set_healthy();
        info!("External store connection: healthy");
    } else {
        health.persistence.set_unhealthy("Connection failed");
        error!("External store connection: unhealthy, submissions will be kept in memory");
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
