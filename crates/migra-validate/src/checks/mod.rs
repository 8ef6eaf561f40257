//! Validation check modules.
//!
//! Each module performs a specific type of validation check.

pub mod duplicates;
pub mod format;
pub mod required;
