//! Dashboard summary use case

pub mod use_cases;

pub use use_cases::*;
