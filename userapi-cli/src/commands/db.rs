//! Database connection flags and one-shot database commands

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use userapi_server::db::{create_pool, migrations, probe};
use userapi_server::{DbConfig, PoolSettings};

/// Database connection flags, each backed by an environment variable
#[derive(Args, Debug, Clone)]
pub struct DbArgs {
    /// Full connection URL (overrides the individual DB_* settings)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Database host
    #[arg(long, env = "DB_HOST")]
    pub db_host: Option<String>,

    /// Database port
    #[arg(long, env = "DB_PORT", default_value_t = 5432)]
    pub db_port: u16,

    /// Database name
    #[arg(long, env = "DB_NAME")]
    pub db_name: Option<String>,

    /// Database user
    #[arg(long, env = "DB_USER")]
    pub db_user: Option<String>,

    /// Database password
    #[arg(long, env = "DB_PASSWORD", hide_env_values = true)]
    pub db_password: Option<String>,

    /// Maximum pooled connections
    #[arg(
        long,
        env = "DB_POOL_MAX",
        default_value_t = 10,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub pool_max: u32,

    /// Close connections idle for longer than this many milliseconds
    #[arg(long, env = "DB_IDLE_TIMEOUT_MS", default_value_t = 30_000)]
    pub idle_timeout_ms: u64,

    /// Give up waiting for a connection after this many milliseconds
    #[arg(long, env = "DB_CONNECT_TIMEOUT_MS", default_value_t = 2_000)]
    pub connect_timeout_ms: u64,
}

impl From<DbArgs> for DbConfig {
    fn from(args: DbArgs) -> Self {
        Self {
            url: args.database_url,
            host: args.db_host,
            port: Some(args.db_port),
            database: args.db_name,
            user: args.db_user,
            password: args.db_password,
            pool: PoolSettings {
                max_connections: args.pool_max,
                idle_timeout: Duration::from_millis(args.idle_timeout_ms),
                connect_timeout: Duration::from_millis(args.connect_timeout_ms),
            },
        }
    }
}

/// Check that the database accepts a connection
pub async fn run_check_db(args: DbArgs) -> Result<()> {
    let pool = create_pool(&DbConfig::from(args)).context("Invalid database configuration")?;

    let result = probe(&pool).await;
    pool.close().await;
    result.context("Database is not reachable")?;

    tracing::info!("Successfully connected to database");
    Ok(())
}

/// Create the users table if it does not exist
pub async fn run_migrate(args: DbArgs) -> Result<()> {
    let pool = create_pool(&DbConfig::from(args)).context("Invalid database configuration")?;

    let result = migrations::run(&pool).await;
    pool.close().await;
    result.context("Failed to run migrations")?;

    Ok(())
}
