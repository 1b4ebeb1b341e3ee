//! Infrastructure Layer - External integrations
//!
//! PostgreSQL repositories, token and password services, object storage
//! backends and the canned chat store.

pub mod auth;
pub mod chat;
pub mod repositories;
pub mod storage;

pub use auth::{JwtService, PasswordHasher, TemporaryPasswordGenerator};
pub use chat::CannedChatStore;
pub use repositories::{
    SqlxAnalyticsSource, SqlxBookingRepository, SqlxProjectRepository, SqlxServiceRepository,
    SqlxUserRepository,
};
pub use storage::{LocalObjectStorage, S3ObjectStorage, create_object_storage};
