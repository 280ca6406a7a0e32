//! Error types for rusty-curs

use thiserror::Error;

/// Main error type for rusty-curs
#[derive(Error, Debug)]
pub enum CursError {
    #[error("Rates unavailable: {0}")]
    RatesUnavailable(String),

    #[error("No rate table loaded")]
    NoTableLoaded,

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    #[error("History index out of range: index {index}, length {len}")]
    HistoryIndexOutOfRange { index: usize, len: usize },

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl CursError {
    /// True for failures the user fixes by editing input rather than reloading.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            CursError::InvalidAmount(_)
                | CursError::UnknownCurrency(_)
                | CursError::HistoryIndexOutOfRange { .. }
        )
    }
}

/// Result type alias for rusty-curs operations
pub type Result<T> = std::result::Result<T, CursError>;
