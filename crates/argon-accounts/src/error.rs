//! Account-key error types

use argon_codec::RlpError;
use argon_crypto::KeyError;
use thiserror::Error;

/// Errors from account-key construction and wire decoding.
///
/// These are hard failures: an account key object that would violate its
/// invariants is never constructed.
#[derive(Error, Debug)]
pub enum AccountKeyError {
    #[error("empty account key bytes")]
    Empty,

    #[error("unknown account key tag: {0:#04x}")]
    UnknownTag(u8),

    #[error("malformed account key payload: {0}")]
    Payload(String),

    #[error("rlp decode failed: {0}")]
    Rlp(#[from] RlpError),

    #[error("invalid public key: {0}")]
    Key(#[from] KeyError),

    #[error("invalid account key construction: {0}")]
    Construction(String),
}
