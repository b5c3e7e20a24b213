//! Command implementations for the userapi CLI

pub mod db;
pub mod serve;

pub use db::{run_check_db, run_migrate, DbArgs};
pub use serve::{run_serve, ServeArgs};
