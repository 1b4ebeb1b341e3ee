//! Configuration validation module

use crate::config::{
    AnalyticsConfig, AuthConfig, DatabaseConfig, LoggingConfig, ServerConfig, StorageBackend,
    StorageConfig,
};

/// Trait for validating configuration sections
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Configuration validation error
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Server configuration error: {message}")]
    Server { message: String },

    #[error("Database configuration error: {message}")]
    Database { message: String },

    #[error("Authentication configuration error: {message}")]
    Auth { message: String },

    #[error("Storage configuration error: {message}")]
    Storage { message: String },

    #[error("Analytics configuration error: {message}")]
    Analytics { message: String },

    #[error("Logging configuration error: {message}")]
    Logging { message: String },
}

impl ValidationError {
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::Auth {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn analytics(message: impl Into<String>) -> Self {
        Self::Analytics {
            message: message.into(),
        }
    }

    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // u16 cannot exceed 65535, so only 0 is out of range
        if self.port == 0 {
            return Err(ValidationError::server(format!(
                "Port must be in range 1-65535, got {}",
                self.port
            )));
        }

        if self.host.is_empty() {
            return Err(ValidationError::server("Host cannot be empty"));
        }

        if self.request_timeout_seconds == 0 {
            return Err(ValidationError::server(
                "Request timeout must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for DatabaseConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.url.is_empty() {
            return Err(ValidationError::database("Database URL cannot be empty"));
        }

        if !self.url.starts_with("postgres://") && !self.url.starts_with("postgresql://") {
            return Err(ValidationError::database(
                "Database URL must start with postgres:// or postgresql://",
            ));
        }

        if self.max_connections == 0 {
            return Err(ValidationError::database(
                "Max connections must be greater than 0",
            ));
        }

        if let Some(min_idle) = self.min_idle
            && min_idle > self.max_connections
        {
            return Err(ValidationError::database(format!(
                "min_idle ({}) cannot exceed max_connections ({})",
                min_idle, self.max_connections
            )));
        }

        Ok(())
    }
}

impl Validate for AuthConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        // Shorter secrets are tolerated for local development
        if self.jwt_secret.len() < 16 {
            return Err(ValidationError::auth(
                "JWT secret must be at least 16 characters long",
            ));
        }

        if self.token_ttl_hours == 0 {
            return Err(ValidationError::auth(
                "Access token TTL must be greater than 0 hours",
            ));
        }

        if self.refresh_token_ttl_hours == 0 {
            return Err(ValidationError::auth(
                "Refresh token TTL must be greater than 0 hours",
            ));
        }

        if self.temporary_password_length < 12 {
            return Err(ValidationError::auth(
                "Temporary password length must be at least 12 characters",
            ));
        }

        Ok(())
    }
}

impl Validate for StorageConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_upload_bytes == 0 {
            return Err(ValidationError::storage(
                "max_upload_bytes must be greater than 0",
            ));
        }

        if self.allowed_content_types.is_empty() {
            return Err(ValidationError::storage(
                "allowed_content_types cannot be empty",
            ));
        }

        if !self.public_base_url.starts_with("http://")
            && !self.public_base_url.starts_with("https://")
        {
            return Err(ValidationError::storage(format!(
                "public_base_url must start with http:// or https://, got: {}",
                self.public_base_url
            )));
        }

        if self.backend == StorageBackend::S3 {
            if self.bucket.is_empty() {
                return Err(ValidationError::storage("S3 bucket cannot be empty"));
            }
            if self.access_key_id.is_some() != self.secret_access_key.is_some() {
                return Err(ValidationError::storage(
                    "access_key_id and secret_access_key must be set together",
                ));
            }
        }

        Ok(())
    }
}

impl Validate for AnalyticsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.allowed_window_days.iter().any(|days| *days == 0) {
            return Err(ValidationError::analytics(
                "allowed_window_days entries must be greater than 0",
            ));
        }

        if !self.allowed_window_days.contains(&self.default_window_days) {
            return Err(ValidationError::analytics(format!(
                "default_window_days ({}) must be one of allowed_window_days {:?}",
                self.default_window_days, self.allowed_window_days
            )));
        }

        if self.top_services_limit == 0 || self.category_display_limit == 0 {
            return Err(ValidationError::analytics(
                "Display limits must be greater than 0",
            ));
        }

        Ok(())
    }
}

impl Validate for LoggingConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if !matches!(self.format.as_str(), "json" | "pretty") {
            return Err(ValidationError::logging(format!(
                "Logging format must be 'json' or 'pretty', got: {}",
                self.format
            )));
        }

        Ok(())
    }
}
