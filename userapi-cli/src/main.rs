//! userapi CLI - HTTP API over a PostgreSQL users table
//!
//! Subcommands:
//! - `serve`: run the API (list, lookup, create users; health check)
//! - `check-db`: one-shot connectivity probe
//! - `migrate`: create the users table if missing
//!
//! Every flag can also be supplied through the environment or a `.env` file.

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "userapi",
    author,
    version,
    about = "HTTP API exposing user records stored in PostgreSQL"
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::ServeArgs),

    /// Check that the database accepts connections
    CheckDb(commands::DbArgs),

    /// Create the users table if it does not exist
    Migrate(commands::DbArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Values already in the environment win over .env
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_setup::init(&TracingConfig { debug: cli.debug }).ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::CheckDb(args) => commands::run_check_db(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
    }
    Ok(())
}
