//! Authentication infrastructure

pub mod jwt_service;
pub mod password_hasher;
pub mod temporary_password;

pub use jwt_service::JwtService;
pub use password_hasher::PasswordHasher;
pub use temporary_password::TemporaryPasswordGenerator;
