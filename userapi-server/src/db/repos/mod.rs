//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - One parameterized statement per call
//! - Handles conflicts by classifying the store's error (no check-then-insert)

pub mod users;

pub use users::{PgUserRepo, User, UserStore};
