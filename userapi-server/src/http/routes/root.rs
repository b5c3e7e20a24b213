//! Service metadata endpoint

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::http::server::AppState;

#[derive(Serialize)]
pub struct RootResponse {
    pub message: &'static str,
    pub version: &'static str,
    pub environment: String,
    pub pod: String,
    pub endpoints: Endpoints,
    pub database: DatabaseInfo,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoints {
    pub health: &'static str,
    pub users: &'static str,
    pub user_by_id: &'static str,
    pub create_user: &'static str,
}

/// Connection target, never including credentials
#[derive(Serialize)]
pub struct DatabaseInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

/// GET /
async fn root(State(state): State<Arc<AppState>>) -> Json<RootResponse> {
    let info = &state.info;
    Json(RootResponse {
        message: "Users API",
        version: env!("CARGO_PKG_VERSION"),
        environment: info.environment.clone(),
        pod: info.pod.clone(),
        endpoints: Endpoints {
            health: "/health",
            users: "/api/users",
            user_by_id: "/api/users/:id",
            create_user: "POST /api/users",
        },
        database: DatabaseInfo {
            host: info.db_host.clone(),
            name: info.db_name.clone(),
            user: info.db_user.clone(),
        },
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(root))
}
