//! Authentication DTOs for API requests and responses

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use kronium_core::domain::auth::{AdminSession, UserRole};

/// Login request DTO
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    #[schema(example = "admin@kronium.test")]
    pub email: String,
    #[schema(example = "correct-horse-battery-staple")]
    pub password: String,
}

/// Identity of the signed-in admin
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SessionUserResponse {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub user_id: Uuid,
    #[schema(example = "admin@kronium.test")]
    pub email: String,
    pub role: UserRole,
}

impl From<&AdminSession> for SessionUserResponse {
    fn from(session: &AdminSession) -> Self {
        Self {
            user_id: session.user_id.as_uuid(),
            email: session.email.as_str().to_string(),
            role: session.role,
        }
    }
}

/// Login response DTO.
///
/// The access token is also set as an HttpOnly cookie; the body copy serves
/// clients that send `Authorization: Bearer` instead.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Access token lifetime in seconds
    #[schema(example = 86400)]
    pub expires_in: u64,
    pub user: SessionUserResponse,
}

/// Refresh request DTO; falls back to the `refresh_token` cookie when absent
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RefreshResponse {
    pub access_token: String,
    #[schema(example = 86400)]
    pub expires_in: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LogoutResponse {
    #[schema(example = "Successfully logged out")]
    pub message: String,
}
