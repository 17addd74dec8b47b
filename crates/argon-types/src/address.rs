//! Account address type for argon

use crate::error::SdkError;
use sha3::{Digest, Keccak256};
use std::fmt;
use std::str::FromStr;

/// Account address - 20 bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct Address([u8; 20]);

impl Address {
    /// Create an address from raw bytes
    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Create an address from an uncompressed public key point using the
    /// standard derivation: the last 20 bytes of keccak256(X || Y)
    pub fn from_pubkey(pubkey_xy: &[u8; 64]) -> Self {
        let hash = Keccak256::digest(pubkey_xy);
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&hash[12..]);
        Self(bytes)
    }

    /// Parse from a 0x-prefixed hex string
    pub fn from_hex(s: &str) -> Result<Self, SdkError> {
        let stripped = s.strip_prefix("0x").unwrap_or(s);
        let data = hex::decode(stripped)
            .map_err(|e| SdkError::InvalidAddress(format!("invalid hex: {e}")))?;
        if data.len() != 20 {
            return Err(SdkError::InvalidAddress(format!(
                "expected 20 bytes, got {}",
                data.len()
            )));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&data);
        Ok(Self(bytes))
    }

    /// Get the raw bytes
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for Address {
    type Err = SdkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

// Addresses appear in JSON-RPC payloads as 0x-prefixed hex strings.
impl serde::Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pubkey_derivation() {
        // keccak256 of 64 zero bytes, last 20 bytes
        let addr = Address::from_pubkey(&[0u8; 64]);
        assert_eq!(
            addr.to_string(),
            "0x3f17f1962b36e491b30a40b2405849e597ba5fb5"
        );
    }

    #[test]
    fn test_hex_round_trip() {
        let addr = Address::from_hex("0x2c8ad0ea2e0781db8b8c9242e07de3a5beabb71a").unwrap();
        assert_eq!(
            addr.to_string(),
            "0x2c8ad0ea2e0781db8b8c9242e07de3a5beabb71a"
        );
    }

    #[test]
    fn test_rejects_wrong_length() {
        let result = Address::from_hex("0xdeadbeef");
        assert!(matches!(result, Err(SdkError::InvalidAddress(_))));
    }

    #[test]
    fn test_serde_hex_string() {
        let addr = Address::from_hex("0x2c8ad0ea2e0781db8b8c9242e07de3a5beabb71a").unwrap();
        let json = serde_json_value(&addr);
        assert_eq!(json, "\"0x2c8ad0ea2e0781db8b8c9242e07de3a5beabb71a\"");
    }

    fn serde_json_value(addr: &Address) -> String {
        let mut out = Vec::new();
        let mut ser = serde_json::Serializer::new(&mut out);
        serde::Serialize::serialize(addr, &mut ser).unwrap();
        String::from_utf8(out).unwrap()
    }
}
