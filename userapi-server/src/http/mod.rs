//! HTTP server layer
//!
//! Axum server with:
//! - CORS (any origin)
//! - Request tracing
//! - Graceful shutdown that drains the pool
//! - JSON error responses

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

pub use error::ApiError;
pub use server::{build_router, run_server, AppState, ServerConfig, ServerError, ServiceInfo};

use chrono::{SecondsFormat, Utc};

/// Current time as RFC 3339 UTC with millisecond precision, e.g. `2025-01-01T00:00:00.000Z`.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
