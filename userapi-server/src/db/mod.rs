//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - One pool per process, injected into handlers (never a global)
//! - One statement per request, values always bound as parameters
//! - Rely on DB constraints, handle conflicts - no check-then-insert

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repos;

#[cfg(test)]
pub(crate) mod memory;

pub use error::DbError;
pub use pool::{create_pool, probe, DbConfig, PoolSettings};
pub use repos::*;
