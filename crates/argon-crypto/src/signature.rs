//! Recoverable signature operations

use crate::keys::{PrivateKey, PublicKey};
use argon_types::SignatureData;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::FieldBytes;
use thiserror::Error;

/// Errors from signing and public-key recovery
#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("malformed signature: {0}")]
    Malformed(String),

    #[error("invalid recovery value: {0}")]
    InvalidRecoveryId(u64),

    #[error("public key recovery failed")]
    RecoveryFailed,
}

/// Sign a 32-byte hash, producing a recoverable signature triple.
/// The recovery value is emitted as 27 or 28.
pub fn sign_hash(key: &PrivateKey, hash: &[u8; 32]) -> Result<SignatureData, SignatureError> {
    let (signature, recovery_id) = key
        .signing_key()
        .sign_prehash_recoverable(hash)
        .map_err(|e| SignatureError::SigningFailed(e.to_string()))?;
    let (r, s) = signature.split_bytes();
    Ok(SignatureData::new(
        27 + u64::from(recovery_id.to_byte()),
        r.into(),
        s.into(),
    ))
}

/// Recover the signer's public key from a signature over `hash`
pub fn recover(hash: &[u8; 32], signature: &SignatureData) -> Result<PublicKey, SignatureError> {
    let recovery_byte = normalize_v(signature.v)?;
    let recovery_id = RecoveryId::from_byte(recovery_byte)
        .ok_or(SignatureError::InvalidRecoveryId(signature.v))?;
    let sig = Signature::from_scalars(
        FieldBytes::from(signature.r),
        FieldBytes::from(signature.s),
    )
    .map_err(|e| SignatureError::Malformed(e.to_string()))?;
    let key = VerifyingKey::recover_from_prehash(hash, &sig, recovery_id)
        .map_err(|_| SignatureError::RecoveryFailed)?;
    Ok(PublicKey::from(key))
}

/// Accept recovery values in both raw (0/1) and offset (27/28) form
fn normalize_v(v: u64) -> Result<u8, SignatureError> {
    match v {
        0 | 1 => Ok(v as u8),
        27 | 28 => Ok((v - 27) as u8),
        _ => Err(SignatureError::InvalidRecoveryId(v)),
    }
}
