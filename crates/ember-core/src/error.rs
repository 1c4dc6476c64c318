//! Error types for Ember

use thiserror::Error;

/// The main error type for Ember operations
#[derive(Debug, Error)]
pub enum EmberError {
    #[error("Asset not found: {0}")]
    AssetNotFound(String),

    #[error("Asset decode error: {0}")]
    AssetDecode(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Runtime error: {0}")]
    RuntimeError(String),
}

/// Result type alias for Ember operations
pub type Result<T> = std::result::Result<T, EmberError>;
