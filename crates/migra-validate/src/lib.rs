//! Preview validation.
//!
//! A pure pass over parsed rows that reports what an import would run into
//! without touching any store. Findings never block execution; whether to
//! proceed is the caller's decision.

mod checks;
mod engine;

pub use checks::duplicates::{MSG_DUPLICATE_CPF, MSG_DUPLICATE_EMAIL, normalize_cpf};
pub use checks::format::{MSG_INVALID_CPF, MSG_INVALID_EMAIL, is_valid_cpf_shape, is_valid_email};
pub use checks::required::MSG_REQUIRED_EMPTY;
pub use engine::{Validator, preview};
