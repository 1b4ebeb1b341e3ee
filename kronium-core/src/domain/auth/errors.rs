//! Authentication domain errors

use thiserror::Error;

/// Authentication-specific domain errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AuthError {
    #[error("User not found: {email}")]
    UserNotFound { email: String },

    #[error("User ID not found: {user_id}")]
    UserIdNotFound { user_id: String },

    #[error("Invalid credentials provided")]
    InvalidCredentials,

    #[error("Access denied. Admin privileges required")]
    AccessDenied,

    #[error("Invalid token provided")]
    InvalidToken,

    #[error("Token has expired")]
    TokenExpired,

    #[error("Password hashing failed")]
    PasswordHashing,

    #[error("Invalid email format: {email}")]
    InvalidEmail { email: String },

    #[error("Database error: {message}")]
    DatabaseError { message: String },
}

impl From<crate::domain::errors::DomainError> for AuthError {
    fn from(error: crate::domain::errors::DomainError) -> Self {
        AuthError::DatabaseError {
            message: error.to_string(),
        }
    }
}
