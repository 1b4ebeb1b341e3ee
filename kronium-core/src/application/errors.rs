//! Application error types

use thiserror::Error;

use crate::domain::auth::AuthError;
use crate::domain::errors::DomainError;
use crate::domain::storage::StorageError;

/// Error returned by console use cases
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApplicationError {
    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthError),

    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ApplicationError {
    /// True when the failure came from reading or writing the data store
    pub fn is_data_source_failure(&self) -> bool {
        matches!(
            self,
            ApplicationError::Domain(DomainError::DatabaseError { .. })
                | ApplicationError::Authentication(AuthError::DatabaseError { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_names_field() {
        let err: ApplicationError = DomainError::validation("price", "'abc' is not a number").into();
        assert_eq!(err.to_string(), "Invalid price: 'abc' is not a number");
        assert!(!err.is_data_source_failure());
    }

    #[test]
    fn test_database_errors_are_data_source_failures() {
        let err: ApplicationError = DomainError::database("connection reset").into();
        assert!(err.is_data_source_failure());
    }
}
