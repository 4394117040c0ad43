//! Error handling - local-recoverable errors only

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Trader error hierarchy.
///
/// Nothing here is fatal to a strategy run: a bad config falls back to the
/// default catalog, a serialization failure degrades to an empty state blob.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization errors (state blob, diagnostics payload)
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
