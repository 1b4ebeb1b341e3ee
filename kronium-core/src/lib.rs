//! Kronium Core - Foundation crate for the Kronium admin console
//!
//! # Modules
//!
//! - [`config`]: Strongly-typed configuration with TOML and environment variable support
//! - [`domain`]: Users, services, bookings, projects, analytics and chat models
//! - [`application`]: Use cases, the analytics pipeline and error types
//! - [`infrastructure`]: PostgreSQL repositories, token/password services, object storage
//! - [`logging`]: Structured logging with tracing
//!
//! # Architecture
//!
//! ```text
//! kronium-core/
//! ├── domain/           # Entities, value objects, repository traits
//! ├── application/      # Use cases and the analytics service
//! ├── infrastructure/   # sqlx repositories, JWT, Argon2, S3, chat stub
//! └── config/           # Configuration management
//! ```
//!
//! # Configuration
//!
//! Environment variables use the `KRONIUM__` prefix with double underscore separators:
//!
//! ```bash
//! KRONIUM__SERVER__PORT=3000
//! KRONIUM__ANALYTICS__DEFAULT_WINDOW_DAYS=90
//! ```

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod logging;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

pub use config::Config;
pub use logging::init_tracing;
