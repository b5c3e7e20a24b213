//! HTTP server command
//!
//! Runs the users API until SIGTERM/Ctrl+C.

use anyhow::{Context, Result};
use clap::Parser;

use userapi_server::{DbConfig, ServerConfig, ServiceInfo};

use super::DbArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Port to listen on (all interfaces)
    #[arg(long, short = 'p', env = "PORT", default_value_t = 3000)]
    pub port: u16,

    /// Environment label reported by GET /
    #[arg(long, env = "NODE_ENV", default_value = "development")]
    pub environment: String,

    /// Instance identifier reported by GET /
    #[arg(long, env = "HOSTNAME", default_value = "unknown")]
    pub pod: String,

    /// Create the users table before serving
    #[arg(long)]
    pub migrate: bool,

    #[command(flatten)]
    pub db: DbArgs,
}

impl ServeArgs {
    fn service_info(&self) -> ServiceInfo {
        ServiceInfo {
            environment: self.environment.clone(),
            pod: self.pod.clone(),
            db_host: self.db.db_host.clone(),
            db_name: self.db.db_name.clone(),
            db_user: self.db.db_user.clone(),
        }
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let info = args.service_info();
    let config = ServerConfig {
        run_migrations: args.migrate,
        ..ServerConfig::with_port(args.port)
    };

    // Run server (blocks until shutdown)
    userapi_server::serve(config, DbConfig::from(args.db), info)
        .await
        .context("Server error")?;

    Ok(())
}
