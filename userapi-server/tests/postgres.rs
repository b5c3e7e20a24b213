//! End-to-end tests against a real PostgreSQL
//!
//! Run with: DATABASE_URL=postgres://... cargo test -p userapi-server -- --ignored

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;
use userapi_server::db::{create_pool, migrations};
use userapi_server::{build_router, AppState, DbConfig, PgUserRepo, ServiceInfo, UserStore};

async fn setup() -> (Router, PgUserRepo) {
    let pool = create_pool(&DbConfig::from_env()).expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    let repo = PgUserRepo::new(pool);
    let app = build_router(AppState::new(Arc::new(repo.clone()), ServiceInfo::default()));
    (app, repo)
}

fn unique_email(prefix: &str) -> String {
    let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
    format!("{}-{}@example.test", prefix, nanos)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

fn post_user(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/users")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_fetch_and_conflict() {
    let (app, _) = setup().await;
    let email = unique_email("ann");
    let body = json!({"name": "Ann", "email": email, "department": "Eng"});

    let (status, created) = send(&app, post_user(&body)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["data"]["id"].as_i64().expect("integer id");

    let (status, fetched) = send(&app, get(&format!("/api/users/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"], created["data"]);

    let (status, padded) = send(&app, get(&format!("/api/users/00{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(padded["data"], created["data"]);

    let (status, conflict) = send(&app, post_user(&body)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict, json!({"success": false, "error": "Email already exists"}));
}

#[tokio::test]
#[ignore = "requires database"]
async fn list_is_ascending() {
    let (app, _) = setup().await;
    for name in ["A", "B"] {
        send(&app, post_user(&json!({"name": name, "email": unique_email(name)}))).await;
    }

    let (status, body) = send(&app, get("/api/users")).await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<i64> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["id"].as_i64().unwrap())
        .collect();
    assert_eq!(body["count"], json!(ids.len()));
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn lookup_misses_are_404() {
    let (app, _) = setup().await;

    let (status, body) = send(&app, get("/api/users/2147483647")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"success": false, "error": "User not found"}));

    let (status, _) = send(&app, get("/api/users/not-a-number")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn health_follows_pool_state() {
    let (app, repo) = setup().await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");

    repo.close().await;

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["database"], "disconnected");
}
