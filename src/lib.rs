//! Kronium admin console service
//!
//! Wires the Postgres repositories, object storage and chat store into the
//! console router.

mod app;

pub use app::{AppHandle, build_app, create_app, production_backends};
pub use kronium_core::{Config, init_tracing};

pub use kronium_console;
pub use kronium_core;
