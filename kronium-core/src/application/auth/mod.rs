//! Console sign-in and session use cases

pub mod use_cases;

pub use use_cases::*;
