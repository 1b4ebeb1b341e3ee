//! Analytics domain module
//!
//! Read-only snapshots of bookings over a time window and the derived views
//! (monthly series, category distribution, service ranking, growth) built
//! from them.

pub mod models;
pub mod repositories;
pub mod window;

pub use models::*;
pub use repositories::*;
pub use window::*;
