//! User endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::{DbError, User};
use crate::http::error::ApiError;
use crate::http::extractors::LenientJson;
use crate::http::server::AppState;
use crate::http::timestamp;
use crate::models::{CreateUserRequest, NewUser};

/// User list response
#[derive(Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub data: Vec<User>,
    pub count: usize,
    pub timestamp: String,
}

/// Single user response
#[derive(Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub data: User,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            success: true,
            data: user,
        }
    }
}

/// GET /api/users - all users by ascending id
async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<Json<UserListResponse>, ApiError> {
    let users = state.store.list().await?;

    Ok(Json(UserListResponse {
        success: true,
        count: users.len(),
        data: users,
        timestamp: timestamp(),
    }))
}

/// GET /api/users/{id} - the id is passed through as-is
async fn get_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, ApiError> {
    let user = state.store.find(&id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// POST /api/users - create a user
async fn create_user(
    State(state): State<Arc<AppState>>,
    LenientJson(req): LenientJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let new_user = NewUser::try_from(req)?;

    let user = state.store.create(new_user).await.map_err(|e| match e {
        DbError::UniqueViolation { ref message, .. } => {
            tracing::warn!("Create rejected by store: {}", message);
            ApiError::Conflict {
                message: "Email already exists",
            }
        }
        other => ApiError::from(other),
    })?;

    tracing::info!(id = user.id, "user created");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// User routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/{id}", get(get_user))
}
