//! # Compatibility Helpers

pub mod traits;
