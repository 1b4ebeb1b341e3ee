//! Console sign-in endpoints and admin-session extraction

pub mod controller;
pub mod extractors;
pub mod models;

pub use extractors::*;
