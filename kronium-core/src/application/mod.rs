//! Application Layer - Use cases and application services

pub mod analytics;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod chat;
pub mod dashboard;
pub mod errors;
pub mod projects;
pub mod users;

pub use errors::*;
