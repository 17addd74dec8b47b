//! Keccak hashing and message domain separation

use sha3::{Digest, Keccak256};

/// Prefix applied to raw messages before hashing, so a signed message can
/// never be replayed as a transaction signature.
pub const MESSAGE_PREFIX: &str = "\x19Argon Signed Message:\n";

/// keccak256 digest of arbitrary bytes
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Keccak256::digest(data));
    out
}

/// Hash a raw message for signing: keccak256(prefix || len || message)
pub fn hash_message(message: &[u8]) -> [u8; 32] {
    let mut input = Vec::with_capacity(MESSAGE_PREFIX.len() + 20 + message.len());
    input.extend_from_slice(MESSAGE_PREFIX.as_bytes());
    input.extend_from_slice(message.len().to_string().as_bytes());
    input.extend_from_slice(message);
    keccak256(&input)
}
