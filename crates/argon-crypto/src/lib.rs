//! Cryptographic primitives for argon
//!
//! This crate provides secp256k1 key types and recoverable-signature
//! operations using well-audited implementations from the RustCrypto
//! project.

pub mod hash;
pub mod keys;
pub mod signature;

pub use hash::{hash_message, keccak256};
pub use keys::{KeyError, PrivateKey, PublicKey};
pub use signature::{recover, sign_hash, SignatureError};
