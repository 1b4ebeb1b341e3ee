//! User repository trait

use async_trait::async_trait;

use super::entities::User;
use super::value_objects::{Email, UserId};
use crate::domain::errors::DomainError;

/// Persistence for console users and customers
#[async_trait]
pub trait IUserRepository: Send + Sync {
    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Find a user by user ID
    async fn find_by_id(&self, user_id: &UserId) -> Result<Option<User>, DomainError>;

    /// Insert a new user. A duplicate email is a `Conflict`.
    async fn create(&self, user: &User) -> Result<(), DomainError>;

    /// All users, newest first
    async fn list(&self) -> Result<Vec<User>, DomainError>;

    /// The `limit` most recently created users
    async fn recent(&self, limit: i64) -> Result<Vec<User>, DomainError>;

    async fn count(&self) -> Result<i64, DomainError>;

    /// Customers that have made at least one booking, by name
    async fn customers_with_bookings(&self) -> Result<Vec<User>, DomainError>;
}
