//! Shared fixtures and mocks for kronium-core integration tests

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
