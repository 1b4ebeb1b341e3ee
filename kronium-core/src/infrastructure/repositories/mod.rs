//! PostgreSQL repositories

mod analytics_source;
mod booking_repository;
mod project_repository;
mod service_repository;
mod user_repository;

pub use analytics_source::SqlxAnalyticsSource;
pub use booking_repository::SqlxBookingRepository;
pub use project_repository::SqlxProjectRepository;
pub use service_repository::SqlxServiceRepository;
pub use user_repository::SqlxUserRepository;

use crate::domain::errors::DomainError;

/// Translate a driver error into a `DatabaseError` with a hint for common setup problems
pub(crate) fn database_error(table: &str, action: &str, error: sqlx::Error) -> DomainError {
    tracing::error!(table, action, error = %error, "Database error");

    let error_msg = error.to_string();
    if error_msg.contains("relation") && error_msg.contains("does not exist") {
        DomainError::database(format!(
            "Database table '{}' does not exist. Please run migrations: {}",
            table, error_msg
        ))
    } else if error_msg.contains("permission denied") {
        DomainError::database(format!(
            "Database permission denied. Check user permissions: {}",
            error_msg
        ))
    } else {
        DomainError::database(format!("Database error while {}: {}", action, error_msg))
    }
}

/// Reject a stored value that no longer parses into its domain type
pub(crate) fn corrupt_column(table: &str, column: &str, detail: impl std::fmt::Display) -> DomainError {
    tracing::error!(table, column, %detail, "Unreadable column value");
    DomainError::database(format!("Invalid value in {}.{}: {}", table, column, detail))
}
