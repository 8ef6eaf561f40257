//! Value transforms and client record assembly.
//!
//! - **transforms**: the named per-value transforms (`uppercase`,
//!   `phone_format`, ...)
//! - **builder**: maps a parsed row onto a candidate [`ClientRecord`]
//!
//! [`ClientRecord`]: migra_model::ClientRecord

pub mod builder;
pub mod error;
pub mod transforms;

pub use builder::{PROVENANCE_DATE_FORMAT, RecordBuilder, provenance_note};
pub use error::{Result, TransformError};
pub use transforms::{Transform, apply_transform, format_phone};
