use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown import type: {0}")]
    UnknownImportType(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
