//! Admin-session extraction for Axum

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header, request::Parts},
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use kronium_core::application::auth::ValidateTokenUseCase;
use kronium_core::application::errors::ApplicationError;
use kronium_core::domain::auth::{AdminSession, AuthError};

use crate::presentation::middleware::application_error_to_response;

/// Cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";
/// Cookie carrying the refresh token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// State for authentication extractors
#[derive(Clone)]
pub struct AuthState {
    pub validate_token: Arc<ValidateTokenUseCase>,
}

/// The signed-in admin, resolved from the access token.
///
/// Handlers that need to know who is acting take this extractor and pass the
/// inner [`AdminSession`] on to the use case.
#[derive(Debug, Clone)]
pub struct AdminAuth(pub AdminSession);

/// Value of a cookie from a `Cookie` header
pub(crate) fn extract_cookie(headers: &HeaderMap, cookie_name: &str) -> Option<String> {
    let prefix = format!("{}=", cookie_name);
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(&prefix))
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn extract_bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

impl<S> FromRequestParts<S> for AdminAuth
where
    S: Send + Sync,
{
    type Rejection = AuthErrorResponse;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = parts
            .extensions
            .get::<AuthState>()
            .ok_or_else(|| AuthErrorResponse {
                error: ApplicationError::Configuration {
                    message: "Auth state not found in request extensions".to_string(),
                },
            })?;

        // Cookie first, then the Authorization header
        let token = extract_cookie(&parts.headers, ACCESS_TOKEN_COOKIE)
            .or_else(|| extract_bearer(&parts.headers))
            .ok_or(AuthErrorResponse {
                error: ApplicationError::Authentication(AuthError::InvalidToken),
            })?;

        let session = auth_state
            .validate_token
            .execute(&token)
            .map_err(|e| AuthErrorResponse {
                error: ApplicationError::Authentication(e),
            })?;

        Ok(AdminAuth(session))
    }
}

/// Rejection returned when no admin session can be established
#[derive(Debug)]
pub struct AuthErrorResponse {
    pub error: ApplicationError,
}

impl IntoResponse for AuthErrorResponse {
    fn into_response(self) -> Response {
        application_error_to_response(self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_extract_cookie_among_others() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("theme=dark; access_token=abc.def.ghi; lang=en"),
        );
        assert_eq!(
            extract_cookie(&headers, ACCESS_TOKEN_COOKIE).as_deref(),
            Some("abc.def.ghi")
        );
        assert!(extract_cookie(&headers, REFRESH_TOKEN_COOKIE).is_none());
    }

    #[test]
    fn test_cleared_cookie_counts_as_absent() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("access_token="));
        assert!(extract_cookie(&headers, ACCESS_TOKEN_COOKIE).is_none());
    }

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer token-value"),
        );
        assert_eq!(extract_bearer(&headers).as_deref(), Some("token-value"));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic xyz"));
        assert!(extract_bearer(&headers).is_none());
    }
}
