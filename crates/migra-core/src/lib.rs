//! Migration execution.
//!
//! - **executor**: the sequential commit pass producing a
//!   [`MigrationResult`](migra_model::MigrationResult)
//! - **dedup**: duplicate detection against existing records
//! - **store**: key-value backed record storage
//! - **cancel**: cooperative cancellation between rows
//! - **redact**: personal data redaction for log output

pub mod cancel;
pub mod dedup;
pub mod executor;
pub mod redact;
pub mod store;

pub use cancel::CancellationToken;
pub use dedup::{ExistingRecords, InMemoryStore, find_duplicate};
pub use executor::{GENERAL_FIELD, MigrationExecutor, execute};
pub use redact::{REDACTED_VALUE, log_data_enabled, redact_value, set_log_data};
pub use store::{CLIENT_PREFIX, KeyValueStore, KvRecordStore, MemoryKv, StoreError};
