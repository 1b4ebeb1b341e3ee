//! Authentication and user domain module
//!
//! Console users, their roles, sign-in credentials and the admin session
//! context handed to every console operation.

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use repositories::*;
pub use value_objects::*;
