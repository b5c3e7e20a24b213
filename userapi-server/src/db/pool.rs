//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits and timeouts.
//! The pool is created lazily so startup never blocks on the network;
//! reachability is checked separately with [`probe`].

use std::time::Duration;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

/// Default maximum connections for the pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Idle connections older than this are closed.
const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_millis(30_000);

/// Bounded wait for a connection (new or pooled).
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_millis(2_000);

const DEFAULT_DB_PORT: u16 = 5432;

/// Pool sizing and timeouts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub idle_timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: DEFAULT_MAX_CONNECTIONS,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

/// Connection parameters for the user store
///
/// Unset fields fall back to libpq defaults (`PGHOST`, `PGUSER`, ...).
/// When `url` is set it takes precedence over the individual fields.
#[derive(Clone, Default)]
pub struct DbConfig {
    pub url: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub pool: PoolSettings,
}

impl std::fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DbConfig")
            .field("url", &self.url.as_ref().map(|_| "<redacted>"))
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("pool", &self.pool)
            .finish()
    }
}

impl DbConfig {
    /// Create config from environment variables
    ///
    /// Reads `DATABASE_URL`, `DB_HOST`, `DB_PORT`, `DB_NAME`, `DB_USER`,
    /// `DB_PASSWORD`, `DB_POOL_MAX`, `DB_IDLE_TIMEOUT_MS` and `DB_CONNECT_TIMEOUT_MS`.
    /// Unparseable numbers and a zero pool size fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from an arbitrary variable source (see [`DbConfig::from_env`]).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let millis = |key: &str| {
            var(key)
                .and_then(|v| v.parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        let defaults = PoolSettings::default();
        Self {
            url: var("DATABASE_URL"),
            host: var("DB_HOST"),
            port: var("DB_PORT").and_then(|v| v.parse().ok()),
            database: var("DB_NAME"),
            user: var("DB_USER"),
            password: var("DB_PASSWORD"),
            pool: PoolSettings {
                max_connections: var("DB_POOL_MAX")
                    .and_then(|v| v.parse::<u32>().ok())
                    .filter(|&n| n > 0)
                    .unwrap_or(defaults.max_connections),
                idle_timeout: millis("DB_IDLE_TIMEOUT_MS").unwrap_or(defaults.idle_timeout),
                connect_timeout: millis("DB_CONNECT_TIMEOUT_MS")
                    .unwrap_or(defaults.connect_timeout),
            },
        }
    }

    /// Build driver connect options from this config.
    ///
    /// # Errors
    ///
    /// Returns an error if `url` is set and cannot be parsed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        if let Some(url) = &self.url {
            return url.parse();
        }

        let mut opts = PgConnectOptions::new().port(self.port.unwrap_or(DEFAULT_DB_PORT));
        if let Some(host) = &self.host {
            opts = opts.host(host);
        }
        if let Some(database) = &self.database {
            opts = opts.database(database);
        }
        if let Some(user) = &self.user {
            opts = opts.username(user);
        }
        if let Some(password) = &self.password {
            opts = opts.password(password);
        }
        Ok(opts)
    }
}

/// Create a PostgreSQL connection pool.
///
/// No connection is opened here; the first query (or [`probe`]) does that.
///
/// # Errors
///
/// Returns an error if the connection URL is malformed or the pool size is zero.
///
/// # Example
///
/// ```ignore
/// let pool = create_pool(&DbConfig::from_env())?;
/// ```
pub fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    let settings = &config.pool;
    if settings.max_connections == 0 {
        return Err(sqlx::Error::Configuration(
            "max_connections must be at least 1".into(),
        ));
    }

    let pool = PgPoolOptions::new()
        .max_connections(settings.max_connections)
        .idle_timeout(settings.idle_timeout)
        .acquire_timeout(settings.connect_timeout)
        .connect_lazy_with(config.connect_options()?);

    tracing::debug!(
        max_connections = settings.max_connections,
        idle_timeout_ms = settings.idle_timeout.as_millis() as u64,
        connect_timeout_ms = settings.connect_timeout.as_millis() as u64,
        "database pool configured"
    );
    Ok(pool)
}

/// Open one connection to confirm the store is reachable, then release it.
pub async fn probe(pool: &PgPool) -> Result<(), sqlx::Error> {
    pool.acquire().await.map(drop)
}
