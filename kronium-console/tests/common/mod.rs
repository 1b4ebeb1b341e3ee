//! Router test harness over in-memory backends

#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{HeaderMap, Request, StatusCode, header},
};
use chrono::{Duration, NaiveDate, Utc};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use kronium_console::{ConsoleBackends, ConsoleState, create_router};
use kronium_core::Config;
use kronium_core::application::analytics::AnalyticsSessions;
use kronium_core::domain::auth::{PasswordHash, User, UserForm, UserRole};
use kronium_core::domain::bookings::{Booking, BookingId, BookingStatus};
use kronium_core::domain::catalog::{Service, ServiceForm};
use kronium_core::domain::projects::{Project, ProjectId, ProjectStatus};
use kronium_core::infrastructure::auth::{JwtService, PasswordHasher};
use kronium_core::infrastructure::chat::CannedChatStore;
use kronium_core::testing::{MemoryDatabase, MemoryObjectStorage};

pub const ADMIN_EMAIL: &str = "admin@kronium.test";
pub const ADMIN_PASSWORD: &str = "correct-horse-battery-staple";
pub const MAX_UPLOAD_BYTES: usize = 1024;

pub struct TestApp {
    pub router: Router,
    pub db: Arc<MemoryDatabase>,
    pub storage: Arc<MemoryObjectStorage>,
    pub jwt: Arc<JwtService>,
    pub hasher: Arc<PasswordHasher>,
    pub admin: User,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }

    pub fn set_cookies(&self) -> Vec<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect()
    }
}

pub fn test_config() -> Config {
    let mut config = Config::default();
    config.auth.jwt_secret = "router-test-secret-0123456789".to_string();
    config.storage.max_upload_bytes = MAX_UPLOAD_BYTES;
    config.server.enable_docs = false;
    config
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let db = Arc::new(MemoryDatabase::new());
        let storage = Arc::new(MemoryObjectStorage::new());
        let hasher = Arc::new(PasswordHasher::with_params(4096, 1, 1));
        let jwt = Arc::new(JwtService::new(
            config.auth.jwt_secret.clone(),
            config.auth.token_ttl_hours,
            config.auth.refresh_token_ttl_hours,
        ));

        let admin_hash = hasher.hash(ADMIN_PASSWORD.to_string()).await.unwrap();
        let admin = user("Console Admin", ADMIN_EMAIL, UserRole::Admin, Some(admin_hash));
        db.insert_user(admin.clone());

        let backends = ConsoleBackends {
            user_repository: db.clone(),
            service_repository: db.clone(),
            booking_repository: db.clone(),
            project_repository: db.clone(),
            analytics_source: db.clone(),
            object_storage: storage.clone(),
            chat_store: Arc::new(CannedChatStore::new()),
            password_hasher: hasher.clone(),
            jwt_service: jwt.clone(),
            analytics_sessions: Arc::new(AnalyticsSessions::new()),
        };
        let state = ConsoleState::build(backends, &config);
        let router = create_router(state, Arc::new(config));

        Self {
            router,
            db,
            storage,
            jwt,
            hasher,
            admin,
        }
    }

    pub fn admin_token(&self) -> String {
        self.jwt
            .generate_access_token(self.admin.user_id, &self.admin.email, UserRole::Admin)
            .unwrap()
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::String(
                String::from_utf8_lossy(&bytes).to_string(),
            ))
        };
        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Request carrying the admin's bearer token
    pub async fn admin(&self, method: &str, uri: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", self.admin_token()));
        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send(request).await
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.admin("GET", uri, None).await
    }
}

pub fn user(name: &str, email: &str, role: UserRole, password_hash: Option<PasswordHash>) -> User {
    let profile = UserForm {
        name: name.to_string(),
        email: email.to_string(),
        phone: "+254700000001".to_string(),
        address: None,
        role: Some(role.as_str().to_string()),
        is_active: Some(true),
    }
    .validate()
    .unwrap();

    let mut user = User::new(profile, PasswordHash::new(String::new()));
    user.password_hash = password_hash;
    user
}

pub fn service(title: &str, category: &str, price: &str) -> Service {
    let draft = ServiceForm {
        title: title.to_string(),
        description: format!("{} for homes and offices", title),
        price: price.to_string(),
        category: category.to_string(),
        features: "Site survey, Installation".to_string(),
        location: Some("Nairobi".to_string()),
        ..ServiceForm::default()
    }
    .validate()
    .unwrap();
    Service::new(draft)
}

pub fn booking(
    customer: &User,
    service: &Service,
    status: BookingStatus,
    days_ago: i64,
    amount: Option<i64>,
) -> Booking {
    let created_at = Utc::now() - Duration::days(days_ago);
    Booking {
        booking_id: BookingId::generate(),
        user_id: customer.user_id,
        service_id: service.service_id,
        status,
        booking_date: created_at + Duration::days(3),
        notes: None,
        total_amount: amount.map(Decimal::from),
        created_at,
        updated_at: created_at,
    }
}

pub fn project(owner: &User, title: &str, status: ProjectStatus) -> Project {
    let now = Utc::now();
    Project {
        project_id: ProjectId::generate(),
        user_id: owner.user_id,
        title: title.to_string(),
        description: "Borehole and storage tank".to_string(),
        status,
        location: "Machakos".to_string(),
        budget: Some(Decimal::from(250_000)),
        start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        end_date: None,
        created_at: now,
        updated_at: now,
    }
}

/// Multipart body with a single `file` part
pub fn multipart_upload(content_type: &str, bytes: &[u8]) -> (String, Vec<u8>) {
    let boundary = "kronium-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
    body.extend_from_slice(
        b"Content-Disposition: form-data; name=\"file\"; filename=\"panel.img\"\r\n",
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());
    (format!("multipart/form-data; boundary={}", boundary), body)
}
