//! Error types for the weigh core crate.

use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Input rejected before any persistence attempt. The store is left
    /// unchanged.
    #[error("{0}")]
    Validation(String),

    /// A single-date lookup found no record.
    #[error("No record for {0}")]
    NotFound(NaiveDate),

    /// Underlying persistence failure. Propagated unchanged to the caller.
    #[error("Storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl CoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        CoreError::Validation(message.into())
    }
}
