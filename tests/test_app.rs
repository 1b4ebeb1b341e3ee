//! Application wiring over in-memory backends

use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use kronium::{Config, build_app};
use kronium_console::ConsoleBackends;
use kronium_core::application::analytics::AnalyticsSessions;
use kronium_core::infrastructure::{CannedChatStore, JwtService, PasswordHasher};
use kronium_core::testing::{MemoryDatabase, MemoryObjectStorage};

fn backends(config: &Config) -> ConsoleBackends {
    let db = Arc::new(MemoryDatabase::new());
    ConsoleBackends {
        user_repository: db.clone(),
        service_repository: db.clone(),
        booking_repository: db.clone(),
        project_repository: db.clone(),
        analytics_source: db,
        object_storage: Arc::new(MemoryObjectStorage::new()),
        chat_store: Arc::new(CannedChatStore::new()),
        password_hasher: Arc::new(PasswordHasher::with_params(4096, 1, 1)),
        jwt_service: Arc::new(JwtService::new(
            config.auth.jwt_secret.clone(),
            config.auth.token_ttl_hours,
            config.auth.refresh_token_ttl_hours,
        )),
        analytics_sessions: Arc::new(AnalyticsSessions::new()),
    }
}

async fn get(router: axum::Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, headers, body.to_vec())
}

#[tokio::test]
async fn test_health_endpoint() {
    let config = Config::default();
    let app = build_app(backends(&config), config);

    let (status, headers, body) = get(app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        headers.get("x-content-type-options").unwrap(),
        "nosniff"
    );

    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn test_docs_follow_config() {
    let config = Config::default();
    let app = build_app(backends(&config), config);
    let (status, _, body) = get(app.router, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    let doc: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(doc["paths"]["/api/v1/analytics"].is_object());

    let mut config = Config::default();
    config.server.enable_docs = false;
    let app = build_app(backends(&config), config);
    let (status, _, _) = get(app.router, "/api-docs/openapi.json").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_console_routes_require_admin_session() {
    let config = Config::default();
    let app = build_app(backends(&config), config);

    let response = app
        .router
        .oneshot(
            Request::builder()
                .uri("/api/v1/bookings")
                .header(header::AUTHORIZATION, "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_shutdown_token_starts_live() {
    let config = Config::default();
    let app = build_app(backends(&config), config);
    assert!(!app.shutdown_token.is_cancelled());
}
