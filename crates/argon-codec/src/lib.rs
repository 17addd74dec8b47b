//! Encoding and decoding utilities for the argon SDK.
//!
//! This crate provides the canonical RLP wire codec used for on-chain
//! account keys, plus small hex helpers for the 0x-prefixed form used by
//! the RPC interface.

pub mod rlp;

pub use rlp::{decode, encode, Rlp, RlpError};

/// Encode bytes as a 0x-prefixed lowercase hex string
pub fn to_hex(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Decode a hex string, accepting an optional 0x prefix
pub fn from_hex(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(s.strip_prefix("0x").unwrap_or(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(to_hex(&[0x01, 0xc0]), "0x01c0");
        assert_eq!(from_hex("0x01c0").unwrap(), vec![0x01, 0xc0]);
        assert_eq!(from_hex("01c0").unwrap(), vec![0x01, 0xc0]);
    }
}
