//! Motor Insurance Core - API Server Binary
//!
//! Starts the HTTP API server and the background policy-expiration poller.
//!
//! # Usage
//!
//! ```bash
//! # Run with default configuration
//! cargo run --bin motor-api
//!
//! # Run with environment variables
//! API_HOST=0.0.0.0 API_PORT=8080 API_DATABASE_URL=postgres://... cargo run --bin motor-api
//! ```
//!
//! # Environment Variables
//!
//! * `API_HOST` - Server host (default: 0.0.0.0)
//! * `API_PORT` - Server port (default: 8080)
//! * `API_DATABASE_URL` / `DATABASE_URL` - PostgreSQL connection string
//! * `API_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `API_TIMEZONE` - IANA timezone for business dates (default: UTC)
//! * `API_EXPIRATION__CHECK_INTERVAL_MINUTES` - Minutes between scans (default: 1)
//! * `API_EXPIRATION__MAX_HOURS_SINCE_EXPIRATION` - Reporting window (default: 24)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_motor::{
    CarService, ExpirationPoller, MotorStore, PolicyExpirationService,
};
use infra_db::{create_pool, run_migrations, DatabaseConfig, PgMotorStore};
use interface_api::{config::ApiConfig, create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = load_config();
    init_tracing(&config.log_level);

    tracing::info!(
        host = %config.host,
        port = %config.port,
        "Starting Motor Insurance Core API Server"
    );

    let pool = create_pool(DatabaseConfig::new(&config.database_url)).await?;
    run_migrations(&pool).await?;

    let timezone = config.business_timezone()?;
    let store: Arc<dyn MotorStore> = Arc::new(PgMotorStore::new(pool));

    let cars = CarService::new(store.clone()).with_timezone(timezone);
    let expiration = Arc::new(
        PolicyExpirationService::new(store, config.expiration_options()).with_timezone(timezone),
    );

    // Background poller with cooperative shutdown.
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let poller = ExpirationPoller::new(expiration.clone(), config.poller_options());
    let poller_handle = tokio::spawn(poller.run(shutdown_rx));

    let app = create_router(AppState { cars, expiration });

    let addr: SocketAddr = config.server_addr().parse()?;
    tracing::info!(%addr, "Server listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Stop the poller and wait for it to log its stop record.
    shutdown_tx.send(true).ok();
    poller_handle.await.ok();

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Loads configuration from the environment, falling back to defaults.
///
/// `DATABASE_URL` is honored as an alias for `API_DATABASE_URL`.
fn load_config() -> ApiConfig {
    let mut config = ApiConfig::from_env().unwrap_or_default();
    if let Ok(url) = std::env::var("DATABASE_URL") {
        config.database_url = url;
    }
    config
}

/// Initializes the tracing subscriber for structured logging.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// This enables graceful shutdown of the server, allowing in-flight
/// requests to complete before the process exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
