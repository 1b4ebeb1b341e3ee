//! HTTP middleware and error mapping for the console

use axum::{
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use kronium_core::application::errors::ApplicationError;
use kronium_core::domain::auth::AuthError;
use kronium_core::domain::errors::DomainError;
use kronium_core::domain::storage::StorageError;

use crate::presentation::models::ErrorResponse;

/// Client-safe rendering of a 5xx error, attached to responses that carry internal details
#[derive(Clone)]
struct SanitizedError(Arc<ErrorResponse>);

/// Status, stable code and client-facing message for an error
fn classify(error: &ApplicationError) -> (StatusCode, &'static str, String) {
    match error {
        ApplicationError::Domain(domain) => match domain {
            DomainError::Validation { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                domain.to_string(),
            ),
            DomainError::NotFound { .. } => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", domain.to_string())
            }
            DomainError::InvalidTransition { .. } => (
                StatusCode::CONFLICT,
                "INVALID_TRANSITION",
                domain.to_string(),
            ),
            DomainError::Conflict { .. } => {
                (StatusCode::CONFLICT, "CONFLICT", domain.to_string())
            }
            DomainError::DatabaseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATA_SOURCE_ERROR",
                "Failed to load data. Please try again".to_string(),
            ),
        },
        ApplicationError::Authentication(auth) => match auth {
            AuthError::InvalidCredentials
            | AuthError::UserNotFound { .. }
            | AuthError::UserIdNotFound { .. } => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                "Invalid email or password".to_string(),
            ),
            AuthError::AccessDenied => (
                StatusCode::FORBIDDEN,
                "ACCESS_DENIED",
                auth.to_string(),
            ),
            AuthError::InvalidToken | AuthError::TokenExpired => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AuthError::InvalidEmail { .. } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                auth.to_string(),
            ),
            AuthError::PasswordHashing => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "Internal server error".to_string(),
            ),
            AuthError::DatabaseError { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATA_SOURCE_ERROR",
                "Failed to load data. Please try again".to_string(),
            ),
        },
        ApplicationError::Storage(storage) => match storage {
            StorageError::UnsupportedContentType { .. } => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                storage.to_string(),
            ),
            StorageError::TooLarge { .. } => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                storage.to_string(),
            ),
            StorageError::EmptyPayload => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "VALIDATION_ERROR",
                storage.to_string(),
            ),
            StorageError::UploadFailed { .. } => (
                StatusCode::BAD_GATEWAY,
                "STORAGE_ERROR",
                "Image upload failed. Please try again".to_string(),
            ),
            StorageError::Configuration { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                "Service configuration error".to_string(),
            ),
        },
        ApplicationError::Configuration { .. } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            "CONFIGURATION_ERROR",
            "Service configuration error".to_string(),
        ),
    }
}

/// Field a validation failure is about, if any
fn invalid_field(error: &ApplicationError) -> Option<&str> {
    match error {
        ApplicationError::Domain(domain) => domain.field(),
        ApplicationError::Authentication(AuthError::InvalidEmail { .. }) => Some("email"),
        ApplicationError::Storage(StorageError::EmptyPayload) => Some("file"),
        _ => None,
    }
}

/// Convert ApplicationError to HTTP response
pub fn application_error_to_response(error: ApplicationError) -> Response {
    let (status, code, message) = classify(&error);

    if status.is_server_error() {
        tracing::error!(
            error = %error,
            http_status = %status,
            error_code = code,
            "Server error mapped to HTTP response"
        );
    } else {
        tracing::warn!(
            error = %error,
            http_status = %status,
            error_code = code,
            "Client error mapped to HTTP response"
        );
    }

    let field = invalid_field(&error);
    let details = match field {
        Some(field) => Some(serde_json::json!({ "field": field })),
        None => Some(serde_json::json!({ "error": error.to_string() })),
    };

    let error_response = ErrorResponse {
        code: code.to_string(),
        message,
        details,
        request_id: Uuid::new_v4(),
        timestamp: Utc::now(),
    };

    let sanitized = (field.is_none() && status.is_server_error()).then(|| {
        SanitizedError(Arc::new(ErrorResponse {
            details: None,
            ..error_response.clone()
        }))
    });

    let mut response = (status, Json(error_response)).into_response();
    if let Some(sanitized) = sanitized {
        response.extensions_mut().insert(sanitized);
    }
    response
}

/// Replace internal 5xx error details with the client-safe body when `sanitize` is set
pub async fn sanitize_errors_middleware(
    State(sanitize): State<bool>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let Some(SanitizedError(body)) = response.extensions_mut().remove::<SanitizedError>() else {
        return response;
    };
    if !sanitize {
        return response;
    }

    // Headers from inner layers stay; only the body is swapped
    *response.body_mut() = Json(Arc::unwrap_or_clone(body)).into_response().into_body();
    response
}

/// Security headers middleware
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        "strict-transport-security",
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );
    headers.insert("x-frame-options", HeaderValue::from_static("DENY"));
    headers.insert(
        "x-content-type-options",
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        "x-xss-protection",
        HeaderValue::from_static("1; mode=block"),
    );
    headers.insert(
        "referrer-policy",
        HeaderValue::from_static("strict-origin-when-cross-origin"),
    );
    // Swagger UI needs inline scripts and styles
    headers.insert(
        "content-security-policy",
        HeaderValue::from_static(
            "default-src 'self'; script-src 'self' 'unsafe-inline'; style-src 'self' 'unsafe-inline'; img-src 'self' data: https:; connect-src 'self'; frame-ancestors 'none';",
        ),
    );
    headers.insert(
        "permissions-policy",
        HeaderValue::from_static("camera=(), microphone=(), geolocation=()"),
    );

    response
}

/// Request logging middleware
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let request_id = Uuid::new_v4();
    let start_time = Instant::now();

    tracing::debug!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        "Processing request"
    );

    let response = next.run(request).await;
    let duration = start_time.elapsed();

    tracing::info!(
        request_id = %request_id,
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "Request completed"
    );

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_maps_to_422_with_field() {
        let error: ApplicationError = DomainError::validation("price", "must not be negative").into();
        let (status, code, message) = classify(&error);
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(code, "VALIDATION_ERROR");
        assert_eq!(message, "Invalid price: must not be negative");
        assert_eq!(invalid_field(&error), Some("price"));
    }

    #[test]
    fn test_fetch_failure_message_is_generic() {
        let error: ApplicationError = DomainError::database("connection refused").into();
        let (status, code, message) = classify(&error);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(code, "DATA_SOURCE_ERROR");
        assert!(!message.contains("connection refused"));
    }

    #[test]
    fn test_non_admin_is_forbidden() {
        let error = ApplicationError::Authentication(AuthError::AccessDenied);
        let (status, code, message) = classify(&error);
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(code, "ACCESS_DENIED");
        assert_eq!(message, "Access denied. Admin privileges required");
    }

    #[test]
    fn test_unknown_email_and_bad_password_look_the_same() {
        let unknown = ApplicationError::Authentication(AuthError::UserNotFound {
            email: "ghost@kronium.test".to_string(),
        });
        let wrong = ApplicationError::Authentication(AuthError::InvalidCredentials);
        assert_eq!(classify(&unknown), classify(&wrong));
    }

    #[test]
    fn test_upload_rejections() {
        let unsupported = ApplicationError::Storage(StorageError::UnsupportedContentType {
            content_type: "image/gif".to_string(),
            allowed: "image/png".to_string(),
        });
        assert_eq!(classify(&unsupported).0, StatusCode::UNSUPPORTED_MEDIA_TYPE);

        let too_large = ApplicationError::Storage(StorageError::TooLarge { size: 10, max: 5 });
        assert_eq!(classify(&too_large).0, StatusCode::PAYLOAD_TOO_LARGE);

        let failed = ApplicationError::Storage(StorageError::UploadFailed {
            message: "bucket unreachable".to_string(),
        });
        assert_eq!(classify(&failed).1, "STORAGE_ERROR");
    }
}
