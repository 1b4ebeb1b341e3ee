//! API routes

use axum::http::StatusCode;
use axum::{
    Router,
    extract::{DefaultBodyLimit, Request, State},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use kronium_core::Config;

use crate::presentation::{
    auth::controller::{login, logout, me, refresh_token},
    controllers::{
        ConsoleState,
        analytics::{get_analytics, get_latest_analytics},
        bookings::{get_booking, list_bookings, update_booking_status},
        chat::{get_chat_messages, list_chat_sessions, send_chat_message},
        dashboard::get_dashboard,
        health::health_check,
        projects::{delete_project, list_projects, update_project_status},
        services::{
            create_service, delete_service, get_service, list_services, toggle_service_active,
            update_service, upload_service_image,
        },
        users::{create_user, get_user, list_users},
    },
    middleware::{
        logging_middleware, sanitize_errors_middleware, security_headers_middleware,
    },
    models::*,
};

/// Room for multipart framing on top of the image itself
const MULTIPART_OVERHEAD_BYTES: usize = 1024 * 1024;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);

        components.add_security_scheme(
            "cookie_auth",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new("access_token"))),
        );
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::health::health_check,
        crate::presentation::auth::controller::login,
        crate::presentation::auth::controller::refresh_token,
        crate::presentation::auth::controller::logout,
        crate::presentation::auth::controller::me,
        crate::presentation::controllers::dashboard::get_dashboard,
        crate::presentation::controllers::users::list_users,
        crate::presentation::controllers::users::get_user,
        crate::presentation::controllers::users::create_user,
        crate::presentation::controllers::services::list_services,
        crate::presentation::controllers::services::get_service,
        crate::presentation::controllers::services::create_service,
        crate::presentation::controllers::services::update_service,
        crate::presentation::controllers::services::delete_service,
        crate::presentation::controllers::services::toggle_service_active,
        crate::presentation::controllers::services::upload_service_image,
        crate::presentation::controllers::bookings::list_bookings,
        crate::presentation::controllers::bookings::get_booking,
        crate::presentation::controllers::bookings::update_booking_status,
        crate::presentation::controllers::projects::list_projects,
        crate::presentation::controllers::projects::update_project_status,
        crate::presentation::controllers::projects::delete_project,
        crate::presentation::controllers::analytics::get_analytics,
        crate::presentation::controllers::analytics::get_latest_analytics,
        crate::presentation::controllers::chat::list_chat_sessions,
        crate::presentation::controllers::chat::get_chat_messages,
        crate::presentation::controllers::chat::send_chat_message
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            UserResponse,
            UserListResponse,
            CreateUserRequest,
            CreatedUserResponse,
            ServiceResponse,
            ServiceListResponse,
            ServiceRequest,
            ImageUploadResponse,
            BookingResponse,
            BookingCustomerDto,
            BookingServiceDto,
            BookingStatusCountsDto,
            BookingListResponse,
            UpdateBookingStatusRequest,
            ProjectResponse,
            ProjectOwnerDto,
            ProjectStatusCountsDto,
            ProjectListResponse,
            UpdateProjectStatusRequest,
            DashboardTotalsDto,
            DashboardResponse,
            AnalyticsWindowDto,
            AnalyticsTotalsDto,
            GrowthDto,
            MonthlyBucketDto,
            CategoryCountDto,
            CategoryDistributionDto,
            ServiceRankingDto,
            AnalyticsResponse,
            ChatSessionDto,
            ChatSessionListResponse,
            ChatMessageDto,
            ChatMessagesResponse,
            SendChatMessageRequest,
            crate::presentation::auth::models::LoginRequest,
            crate::presentation::auth::models::AuthResponse,
            crate::presentation::auth::models::SessionUserResponse,
            crate::presentation::auth::models::RefreshRequest,
            crate::presentation::auth::models::RefreshResponse,
            crate::presentation::auth::models::LogoutResponse,
            kronium_core::domain::auth::UserRole,
            kronium_core::domain::bookings::BookingStatus,
            kronium_core::domain::projects::ProjectStatus
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Service health"),
        (name = "auth", description = "Admin sign-in (HttpOnly cookie or bearer token)"),
        (name = "dashboard", description = "Overview counts and recent activity"),
        (name = "users", description = "Customer and staff accounts"),
        (name = "services", description = "Service catalog and image uploads"),
        (name = "bookings", description = "Bookings and their lifecycle"),
        (name = "projects", description = "Customer projects"),
        (name = "analytics", description = "Windowed booking and revenue analytics"),
        (name = "chat", description = "Customer support chat")
    ),
    info(
        title = "Kronium Admin API",
        version = "0.3.0",
        description = "Back office of the Kronium services-booking platform. Every endpoint except sign-in, token refresh and health requires an admin session."
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    )
)]
pub struct ApiDoc;

async fn inject_auth_state_middleware(
    State(console_state): State<ConsoleState>,
    mut request: Request,
    next: Next,
) -> Response {
    request
        .extensions_mut()
        .insert(console_state.auth_state.clone());
    next.run(request).await
}

fn cors_layer(config: &Config) -> CorsLayer {
    let methods = [
        axum::http::Method::GET,
        axum::http::Method::POST,
        axum::http::Method::PUT,
        axum::http::Method::PATCH,
        axum::http::Method::DELETE,
        axum::http::Method::OPTIONS,
    ];
    let headers = [
        axum::http::header::CONTENT_TYPE,
        axum::http::header::ACCEPT,
        axum::http::header::AUTHORIZATION,
        axum::http::header::ORIGIN,
        axum::http::header::ACCESS_CONTROL_REQUEST_METHOD,
        axum::http::header::ACCESS_CONTROL_REQUEST_HEADERS,
    ];

    if config.server.allowed_origins.len() == 1 && config.server.allowed_origins[0] == "*" {
        tracing::warn!(
            "CORS: Using wildcard origin (*) - the session cookie will NOT be sent cross-origin. \
             Configure specific origins for the console frontend."
        );
        return CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::any())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(false)
            .max_age(Duration::from_secs(3600));
    }

    let origins: Vec<axum::http::HeaderValue> = config
        .server
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            axum::http::HeaderValue::from_str(origin)
                .map_err(|_| {
                    tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                })
                .ok()
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(methods)
        .allow_headers(headers)
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}

pub fn create_router(console_state: ConsoleState, config: Arc<Config>) -> Router {
    let public_auth_routes = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/refresh", post(refresh_token));

    let protected_auth_routes = Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(me));

    let auth_routes = public_auth_routes
        .merge(protected_auth_routes)
        .with_state(console_state.auth.clone());

    let upload_limit = console_state.catalog.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;
    let service_routes = Router::new()
        .route("/services", get(list_services).post(create_service))
        .route(
            "/services/images",
            post(upload_service_image).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/services/{id}",
            get(get_service).put(update_service).delete(delete_service),
        )
        .route("/services/{id}/active", patch(toggle_service_active));

    let console_routes = Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/users", get(list_users).post(create_user))
        .route("/users/{id}", get(get_user))
        .merge(service_routes)
        .route("/bookings", get(list_bookings))
        .route("/bookings/{id}", get(get_booking))
        .route("/bookings/{id}/status", patch(update_booking_status))
        .route("/projects", get(list_projects))
        .route(
            "/projects/{id}",
            axum::routing::delete(delete_project),
        )
        .route("/projects/{id}/status", patch(update_project_status))
        .route("/analytics", get(get_analytics))
        .route("/analytics/latest", get(get_latest_analytics))
        .route("/chat/sessions", get(list_chat_sessions))
        .route(
            "/chat/sessions/{user_id}/messages",
            get(get_chat_messages).post(send_chat_message),
        )
        .with_state(console_state.clone());

    let api_routes = Router::new().merge(auth_routes).merge(console_routes);

    async fn root_handler() -> Response {
        axum::Json(serde_json::json!({
            "name": "Kronium Admin API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Back office of the Kronium services-booking platform",
            "endpoints": {
                "health": "/health",
                "api": "/api/v1",
                "docs": "/docs"
            }
        }))
        .into_response()
    }

    let health_routes = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check));

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .merge(health_routes);

    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(config.server.request_timeout_seconds),
        ))
        .layer(middleware::from_fn_with_state(
            console_state,
            inject_auth_state_middleware,
        ))
        .layer(middleware::from_fn(logging_middleware))
        .layer(middleware::from_fn_with_state(
            config.server.security.sanitize_errors,
            sanitize_errors_middleware,
        ));

    if config.server.security.enable_security_headers {
        router = router.layer(middleware::from_fn(security_headers_middleware));
    }

    router.layer(service_builder)
}
