//! CLI library components for client migrations.

pub mod loader;
pub mod logging;
