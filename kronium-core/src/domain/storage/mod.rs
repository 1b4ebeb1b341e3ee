//! Object storage domain module

pub mod errors;
pub mod models;
pub mod traits;

pub use errors::*;
pub use models::*;
pub use traits::*;
