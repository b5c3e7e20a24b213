//! userapi-server: HTTP API over a PostgreSQL users table
//!
//! Exposes list, lookup and create for user records plus a health check.
//! Each request borrows one pooled connection for exactly one statement.

pub mod db;
pub mod http;
pub mod models;

use std::sync::Arc;

pub use db::{DbConfig, DbError, PgUserRepo, PoolSettings, User, UserStore};
pub use http::{build_router, AppState, ServerConfig, ServerError, ServiceInfo};

/// Start the HTTP server
///
/// Builds the pool, probes the database once (a failure is only logged, the
/// listener starts regardless), optionally runs migrations, then serves until
/// SIGTERM/Ctrl+C and drains the pool.
pub async fn serve(
    config: ServerConfig,
    db_config: DbConfig,
    info: ServiceInfo,
) -> Result<(), ServerError> {
    let pool = db::create_pool(&db_config)?;

    match db::probe(&pool).await {
        Ok(()) => tracing::info!("Successfully connected to database"),
        Err(e) => tracing::warn!("Error connecting to database: {}", e),
    }

    if config.run_migrations {
        db::migrations::run(&pool).await?;
    }

    tracing::info!(
        port = config.bind_addr.port(),
        environment = %info.environment,
        pod = %info.pod,
        "Starting API server"
    );

    let store = Arc::new(PgUserRepo::new(pool));
    http::run_server(store, info, config).await
}
