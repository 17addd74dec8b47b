//! Error handling for argon

use thiserror::Error;

/// Top-level SDK error enum that can cross module boundaries
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    #[error("decode failed: {0}")]
    Decode(String),

    #[error("invalid construction: {0}")]
    Construction(String),

    #[error("internal error: {0}")]
    Internal(String),
}

/// Result type alias for SDK operations
pub type SdkResult<T> = std::result::Result<T, SdkError>;
