//! Signature validation against account keys.
//!
//! The functions here are pure and stateless: given a hash, a signature
//! set, and a resolved account key, they decide whether the set satisfies
//! the key's policy. An unsatisfied policy is an ordinary `Ok(false)`;
//! only a malformed input shape is an error.

use crate::key::AccountKey;
use argon_crypto::{hash_message, recover};
use argon_types::{Address, RoleGroup, SignatureData, Transaction};
use thiserror::Error;

/// Malformed validation input. Insufficient or wrong signatures are never
/// an error, they are an ordinary `false` outcome.
#[derive(Error, Debug)]
pub enum ValidateError {
    #[error("nil account key cannot be a validation target")]
    NilKey,

    #[error("role-based key has no slot for role {0:?}")]
    MissingRoleKey(RoleGroup),

    #[error("a public key accepts exactly one signature, got {0}")]
    TooManySignatures(usize),

    #[error("hashed message must be 32 bytes, got {0}")]
    InvalidHashLength(usize),

    #[error("fee-delegated transaction is missing fee payer data")]
    MissingFeePayer,
}

/// Check whether `signatures` over `hash` satisfy `key` under `role`.
///
/// `address` is the account the key belongs to; only the Legacy policy
/// consults it, since a legacy account is identified by address alone.
pub fn validate_signatures(
    hash: &[u8; 32],
    address: &Address,
    signatures: &[SignatureData],
    key: &AccountKey,
    role: RoleGroup,
) -> Result<bool, ValidateError> {
    match key {
        AccountKey::RoleBased(role_key) => {
            let sub_key = role_key
                .key_for(role)
                .ok_or(ValidateError::MissingRoleKey(role))?;
            validate_signatures(hash, address, signatures, sub_key, role)
        }
        AccountKey::Nil => Err(ValidateError::NilKey),
        AccountKey::Fail => Ok(false),
        AccountKey::Legacy => {
            if signatures.len() != 1 {
                return Ok(false);
            }
            match recover(hash, &signatures[0]) {
                Ok(recovered) => Ok(recovered.to_address() == *address),
                Err(_) => Ok(false),
            }
        }
        AccountKey::Public(expected) => {
            if signatures.is_empty() {
                return Ok(false);
            }
            if signatures.len() > 1 {
                return Err(ValidateError::TooManySignatures(signatures.len()));
            }
            match recover(hash, &signatures[0]) {
                Ok(recovered) => Ok(recovered == *expected),
                Err(_) => Ok(false),
            }
        }
        AccountKey::WeightedMultiSig(multisig) => {
            // Single pass with per-entry consumption so two signatures by
            // the same on-chain key cannot double-count its weight.
            // Signatures that fail to recover or match no remaining entry
            // contribute nothing but do not abort.
            let keys = multisig.keys();
            let mut consumed = vec![false; keys.len()];
            let mut total = 0u64;
            for signature in signatures {
                let recovered = match recover(hash, signature) {
                    Ok(recovered) => recovered,
                    Err(_) => continue,
                };
                let matched = (0..keys.len())
                    .find(|&index| !consumed[index] && *keys[index].public_key() == recovered);
                if let Some(index) = matched {
                    consumed[index] = true;
                    total += u64::from(keys[index].weight());
                }
            }
            Ok(total >= u64::from(multisig.threshold()))
        }
    }
}

/// Validate signatures over a signed message. When `is_hashed` is false
/// the message is hashed with the domain-separation prefix first; when
/// true it must already be the 32-byte hash.
pub fn validate_signed_message(
    message: &[u8],
    is_hashed: bool,
    address: &Address,
    signatures: &[SignatureData],
    key: &AccountKey,
    role: RoleGroup,
) -> Result<bool, ValidateError> {
    let hash = if is_hashed {
        let hash: [u8; 32] = message
            .try_into()
            .map_err(|_| ValidateError::InvalidHashLength(message.len()))?;
        hash
    } else {
        hash_message(message)
    };
    validate_signatures(&hash, address, signatures, key, role)
}

/// Validate a transaction's sender signatures. Key updates are checked
/// under the AccountUpdate role, everything else under Transaction.
pub fn validate_sender(tx: &Transaction, key: &AccountKey) -> Result<bool, ValidateError> {
    let role = if tx.tx_type.is_account_update() {
        RoleGroup::AccountUpdate
    } else {
        RoleGroup::Transaction
    };
    validate_signatures(&tx.sig_hash, &tx.sender, &tx.signatures, key, role)
}

/// Validate a transaction's fee-payer signatures under the FeePayer role.
/// A transaction without fee-payer signatures simply does not validate.
pub fn validate_fee_payer(tx: &Transaction, key: &AccountKey) -> Result<bool, ValidateError> {
    if tx.fee_payer_signatures.is_empty() {
        return Ok(false);
    }
    let fee_payer = tx.fee_payer.as_ref().ok_or(ValidateError::MissingFeePayer)?;
    let hash = tx
        .fee_payer_sig_hash
        .as_ref()
        .ok_or(ValidateError::MissingFeePayer)?;
    validate_signatures(hash, fee_payer, &tx.fee_payer_signatures, key, RoleGroup::FeePayer)
}

/// Validate a whole transaction: always the sender, plus the fee payer
/// when the type carries fee delegation.
pub fn validate_transaction(
    tx: &Transaction,
    sender_key: &AccountKey,
    fee_payer_key: Option<&AccountKey>,
) -> Result<bool, ValidateError> {
    let sender_ok = validate_sender(tx, sender_key)?;
    if !tx.tx_type.is_fee_delegated() {
        return Ok(sender_ok);
    }
    let fee_payer_key = fee_payer_key.ok_or(ValidateError::MissingFeePayer)?;
    let fee_payer_ok = validate_fee_payer(tx, fee_payer_key)?;
    Ok(sender_ok && fee_payer_ok)
}
