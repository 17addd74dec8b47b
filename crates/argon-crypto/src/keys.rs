//! secp256k1 key representations

use argon_types::Address;
use k256::ecdsa::{SigningKey, VerifyingKey};
use k256::{EncodedPoint, FieldBytes};
use thiserror::Error;

/// Errors from key construction
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("invalid public key encoding: {0}")]
    InvalidEncoding(String),

    #[error("point is not on the curve")]
    NotOnCurve,

    #[error("invalid private key: {0}")]
    InvalidPrivateKey(String),
}

/// A validated secp256k1 public key
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Parse a SEC1-encoded key (compressed 33 bytes or uncompressed 65
    /// bytes), rejecting points not on the curve
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        let key = VerifyingKey::from_sec1_bytes(bytes)
            .map_err(|e| KeyError::InvalidEncoding(e.to_string()))?;
        Ok(Self(key))
    }

    /// Reconstruct a key from affine X/Y coordinates
    pub fn from_xy(x: &[u8; 32], y: &[u8; 32]) -> Result<Self, KeyError> {
        let point = EncodedPoint::from_affine_coordinates(
            &FieldBytes::from(*x),
            &FieldBytes::from(*y),
            false,
        );
        let key = VerifyingKey::from_encoded_point(&point).map_err(|_| KeyError::NotOnCurve)?;
        Ok(Self(key))
    }

    /// Compressed SEC1 form, the on-wire representation
    pub fn to_compressed_bytes(&self) -> Vec<u8> {
        self.0.to_encoded_point(true).as_bytes().to_vec()
    }

    /// Canonical X || Y form, 64 bytes
    pub fn to_uncompressed_xy(&self) -> [u8; 64] {
        let point = self.0.to_encoded_point(false);
        let mut xy = [0u8; 64];
        xy.copy_from_slice(&point.as_bytes()[1..]);
        xy
    }

    /// X coordinate, big-endian
    pub fn x(&self) -> [u8; 32] {
        let xy = self.to_uncompressed_xy();
        let mut x = [0u8; 32];
        x.copy_from_slice(&xy[..32]);
        x
    }

    /// Y coordinate, big-endian
    pub fn y(&self) -> [u8; 32] {
        let xy = self.to_uncompressed_xy();
        let mut y = [0u8; 32];
        y.copy_from_slice(&xy[32..]);
        y
    }

    /// Derive the account address for this key
    pub fn to_address(&self) -> Address {
        Address::from_pubkey(&self.to_uncompressed_xy())
    }
}

impl From<VerifyingKey> for PublicKey {
    fn from(key: VerifyingKey) -> Self {
        Self(key)
    }
}

// Public keys appear in hex APIs in compressed SEC1 form.
impl serde::Serialize for PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.to_compressed_bytes())))
    }
}

impl<'de> serde::Deserialize<'de> for PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(&s))
            .map_err(serde::de::Error::custom)?;
        PublicKey::from_sec1_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

/// A secp256k1 private key
#[derive(Clone, Debug)]
pub struct PrivateKey(SigningKey);

impl PrivateKey {
    /// Construct from raw scalar bytes
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, KeyError> {
        let key = SigningKey::from_bytes(&FieldBytes::from(*bytes))
            .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;
        Ok(Self(key))
    }

    /// Construct from a hex string, accepting an optional 0x prefix
    pub fn from_hex(s: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(s.strip_prefix("0x").unwrap_or(s))
            .map_err(|e| KeyError::InvalidPrivateKey(e.to_string()))?;
        let bytes: [u8; 32] = bytes
            .try_into()
            .map_err(|_| KeyError::InvalidPrivateKey("expected 32 bytes".to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Get the corresponding public key
    pub fn public_key(&self) -> PublicKey {
        PublicKey(*self.0.verifying_key())
    }

    pub(crate) fn signing_key(&self) -> &SigningKey {
        &self.0
    }
}

impl From<SigningKey> for PrivateKey {
    fn from(key: SigningKey) -> Self {
        Self(key)
    }
}
