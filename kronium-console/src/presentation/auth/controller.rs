//! Console sign-in controllers

use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, header},
    response::{AppendHeaders, IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::info;

use kronium_core::application::analytics::AnalyticsSessions;
use kronium_core::application::auth::{LoginUseCase, RefreshTokenUseCase};
use kronium_core::application::errors::ApplicationError;
use kronium_core::domain::auth::{AuthError, Email};

use crate::presentation::auth::extractors::{
    ACCESS_TOKEN_COOKIE, AdminAuth, REFRESH_TOKEN_COOKIE, extract_cookie,
};
use crate::presentation::auth::models::*;
use crate::presentation::middleware::application_error_to_response;
use crate::presentation::models::ErrorResponse;

/// Path the refresh cookie is scoped to
const REFRESH_COOKIE_PATH: &str = "/api/v1/auth";

/// State for auth endpoints
#[derive(Clone)]
pub struct AuthAppState {
    pub login_use_case: Arc<LoginUseCase>,
    pub refresh_token_use_case: Arc<RefreshTokenUseCase>,
    pub analytics_sessions: Arc<AnalyticsSessions>,
    pub access_token_ttl_seconds: u64,
    pub refresh_token_ttl_seconds: u64,
    pub cookie_secure: bool,
    pub cookie_path: String,
}

impl AuthAppState {
    fn cookie(&self, name: &str, value: &str, path: &str, max_age: u64) -> HeaderValue {
        let mut cookie = format!(
            "{}={}; HttpOnly; SameSite=Lax; Path={}; Max-Age={}",
            name, value, path, max_age
        );
        if self.cookie_secure {
            cookie.push_str("; Secure");
        }
        // Token characters are base64url and dots, always valid header bytes
        HeaderValue::from_str(&cookie).unwrap_or_else(|_| HeaderValue::from_static(""))
    }

    fn access_cookie(&self, token: &str) -> HeaderValue {
        self.cookie(
            ACCESS_TOKEN_COOKIE,
            token,
            &self.cookie_path,
            self.access_token_ttl_seconds,
        )
    }

    fn refresh_cookie(&self, token: &str) -> HeaderValue {
        self.cookie(
            REFRESH_TOKEN_COOKIE,
            token,
            REFRESH_COOKIE_PATH,
            self.refresh_token_ttl_seconds,
        )
    }
}

fn auth_error(error: AuthError) -> Response {
    application_error_to_response(ApplicationError::Authentication(error))
}

/// Login endpoint
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful; access token cookie set", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse),
        (status = 403, description = "Account is not an admin", body = ErrorResponse),
        (status = 422, description = "Malformed email", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AuthAppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse, Response> {
    let email = Email::new(request.email.clone()).map_err(|_| {
        auth_error(AuthError::InvalidEmail {
            email: request.email,
        })
    })?;

    let result = state
        .login_use_case
        .execute(email, request.password)
        .await
        .map_err(auth_error)?;

    // A fresh sign-in starts with no analytics state
    state.analytics_sessions.open(result.session.user_id);

    let cookies = AppendHeaders([
        (header::SET_COOKIE, state.access_cookie(&result.access_token)),
        (header::SET_COOKIE, state.refresh_cookie(&result.refresh_token)),
    ]);

    Ok((
        cookies,
        Json(AuthResponse {
            access_token: result.access_token,
            refresh_token: result.refresh_token,
            token_type: "Bearer".to_string(),
            expires_in: state.access_token_ttl_seconds,
            user: SessionUserResponse::from(&result.session),
        }),
    ))
}

/// Refresh access token endpoint
#[utoipa::path(
    post,
    path = "/api/v1/auth/refresh",
    tag = "auth",
    request_body(content = RefreshRequest, description = "Optional; the refresh_token cookie is used when omitted"),
    responses(
        (status = 200, description = "New access token issued", body = RefreshResponse),
        (status = 401, description = "Missing, invalid or expired refresh token", body = ErrorResponse),
        (status = 403, description = "Account is no longer an admin", body = ErrorResponse)
    )
)]
pub async fn refresh_token(
    State(state): State<AuthAppState>,
    headers: HeaderMap,
    body: Option<Json<RefreshRequest>>,
) -> Result<impl IntoResponse, Response> {
    let token = body
        .and_then(|Json(request)| request.refresh_token)
        .filter(|token| !token.is_empty())
        .or_else(|| extract_cookie(&headers, REFRESH_TOKEN_COOKIE))
        .ok_or_else(|| auth_error(AuthError::InvalidToken))?;

    let access_token = state
        .refresh_token_use_case
        .execute(&token)
        .await
        .map_err(auth_error)?;

    Ok((
        AppendHeaders([(header::SET_COOKIE, state.access_cookie(&access_token))]),
        Json(RefreshResponse {
            access_token,
            expires_in: state.access_token_ttl_seconds,
        }),
    ))
}

/// Logout endpoint
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "auth",
    responses(
        (status = 200, description = "Session ended and cookies cleared", body = LogoutResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn logout(
    State(state): State<AuthAppState>,
    AdminAuth(session): AdminAuth,
) -> impl IntoResponse {
    state.analytics_sessions.end(&session.user_id);
    info!(user_id = %session.user_id, "Admin signed out");

    let cookies = AppendHeaders([
        (
            header::SET_COOKIE,
            state.cookie(ACCESS_TOKEN_COOKIE, "", &state.cookie_path, 0),
        ),
        (
            header::SET_COOKIE,
            state.cookie(REFRESH_TOKEN_COOKIE, "", REFRESH_COOKIE_PATH, 0),
        ),
    ]);

    (
        cookies,
        Json(LogoutResponse {
            message: "Successfully logged out".to_string(),
        }),
    )
}

/// Current session endpoint
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    tag = "auth",
    responses(
        (status = 200, description = "Signed-in admin", body = SessionUserResponse),
        (status = 401, description = "Not signed in", body = ErrorResponse)
    ),
    security(("cookie_auth" = []), ("bearer_auth" = []))
)]
pub async fn me(AdminAuth(session): AdminAuth) -> Json<SessionUserResponse> {
    Json(SessionUserResponse::from(&session))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kronium_core::infrastructure::auth::{JwtService, PasswordHasher};
    use kronium_core::testing::MemoryDatabase;

    fn state(cookie_secure: bool) -> AuthAppState {
        let db = Arc::new(MemoryDatabase::new());
        let jwt = Arc::new(JwtService::new("a-test-secret-of-some-length".to_string(), 1, 24));
        AuthAppState {
            login_use_case: Arc::new(LoginUseCase::new(
                db.clone(),
                Arc::new(PasswordHasher::with_params(4096, 1, 1)),
                jwt.clone(),
            )),
            refresh_token_use_case: Arc::new(RefreshTokenUseCase::new(jwt, db)),
            analytics_sessions: Arc::new(AnalyticsSessions::new()),
            access_token_ttl_seconds: 3600,
            refresh_token_ttl_seconds: 86400,
            cookie_secure,
            cookie_path: "/".to_string(),
        }
    }

    #[test]
    fn test_access_cookie_attributes() {
        let cookie = state(false).access_cookie("abc.def");
        assert_eq!(
            cookie.to_str().unwrap(),
            "access_token=abc.def; HttpOnly; SameSite=Lax; Path=/; Max-Age=3600"
        );
    }

    #[test]
    fn test_secure_flag_and_refresh_path() {
        let cookie = state(true).refresh_cookie("r");
        let value = cookie.to_str().unwrap();
        assert!(value.starts_with("refresh_token=r;"));
        assert!(value.contains("Path=/api/v1/auth"));
        assert!(value.ends_with("; Secure"));
    }
}
