//! Axum server setup
//!
//! Server skeleton with:
//! - Permissive CORS (any origin, method, header)
//! - Tracing middleware
//! - Graceful shutdown on SIGTERM/Ctrl+C, followed by a pool drain

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::routes;
use crate::db::{DbError, UserStore};

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:3000)
    pub bind_addr: SocketAddr,

    /// Create the users table before serving (default: false)
    pub run_migrations: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::with_port(3000)
    }
}

impl ServerConfig {
    /// Listen on all interfaces at `port`.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            run_migrations: false,
        }
    }
}

/// Deployment metadata reported by `GET /`
#[derive(Debug, Clone)]
pub struct ServiceInfo {
    /// Environment label (e.g. development, production)
    pub environment: String,
    /// Host/instance identifier
    pub pod: String,
    pub db_host: Option<String>,
    pub db_name: Option<String>,
    pub db_user: Option<String>,
}

impl Default for ServiceInfo {
    fn default() -> Self {
        Self {
            environment: "development".to_owned(),
            pod: "unknown".to_owned(),
            db_host: None,
            db_name: None,
            db_user: None,
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn UserStore>,
    pub info: ServiceInfo,
}

impl AppState {
    pub fn new(store: Arc<dyn UserStore>, info: ServiceInfo) -> Self {
        Self { store, info }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::root::router())
        .merge(routes::health::router())
        .merge(routes::users::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(Arc::new(state))
}

/// Run the HTTP server until SIGTERM/Ctrl+C, then close the store.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(PgUserRepo::new(create_pool(&db)?));
/// run_server(store, ServiceInfo::default(), ServerConfig::default()).await?;
/// ```
pub async fn run_server(
    store: Arc<dyn UserStore>,
    info: ServiceInfo,
    config: ServerConfig,
) -> Result<(), ServerError> {
    run_server_until(store, info, config, shutdown_signal()).await
}

/// Run the HTTP server until `signal` resolves.
///
/// In-flight requests finish before the store is closed; the store's close
/// waits for borrowed connections to come back.
pub async fn run_server_until<F>(
    store: Arc<dyn UserStore>,
    info: ServiceInfo,
    config: ServerConfig,
    signal: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_router(AppState::new(Arc::clone(&store), info));

    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await?;

    tracing::info!("HTTP server stopped, closing database pool");
    store.close().await;
    tracing::info!("Database pool closed");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully");
        }
    }
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Database(#[from] DbError),
}

impl From<sqlx::Error> for ServerError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e.into())
    }
}
