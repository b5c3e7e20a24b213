//! Route handlers
//!
//! - root: service metadata and endpoint map
//! - health: liveness with a database round trip
//! - users: list, lookup and create

pub mod health;
pub mod root;
pub mod users;
