//! Domain Layer - Core business logic and entities
//!
//! Entities, value objects and repository traits for the services-booking
//! business managed through the console.

pub mod analytics;
pub mod auth;
pub mod bookings;
pub mod catalog;
pub mod chat;
pub mod errors;
pub mod projects;
pub mod storage;

pub use errors::DomainError;
