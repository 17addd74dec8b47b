//! Transaction envelope consumed by signature validation

use crate::address::Address;
use serde::{Deserialize, Serialize};

/// Transaction types the validator distinguishes.
///
/// Key updates are authorized under the AccountUpdate role; fee-delegated
/// types additionally carry fee-payer signatures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxType {
    ValueTransfer,
    AccountUpdate,
    FeeDelegatedValueTransfer,
    FeeDelegatedAccountUpdate,
}

impl TxType {
    /// Whether this transaction updates the account's on-chain key
    pub fn is_account_update(&self) -> bool {
        matches!(
            self,
            TxType::AccountUpdate | TxType::FeeDelegatedAccountUpdate
        )
    }

    /// Whether this transaction carries fee delegation
    pub fn is_fee_delegated(&self) -> bool {
        matches!(
            self,
            TxType::FeeDelegatedValueTransfer | TxType::FeeDelegatedAccountUpdate
        )
    }
}

/// Recoverable ECDSA signature triple
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureData {
    /// Recovery value
    pub v: u64,
    /// R component, big-endian
    pub r: [u8; 32],
    /// S component, big-endian
    pub s: [u8; 32],
}

impl SignatureData {
    pub fn new(v: u64, r: [u8; 32], s: [u8; 32]) -> Self {
        Self { v, r, s }
    }
}

/// Minimal transaction envelope for signature validation.
///
/// The sender always signs `sig_hash`; for fee-delegated types the fee payer
/// signs `fee_payer_sig_hash`, which covers the same body but a different
/// signer slot, so the two hashes differ.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction type
    pub tx_type: TxType,
    /// Sender account address
    pub sender: Address,
    /// Hash the sender signatures were produced over
    pub sig_hash: [u8; 32],
    /// Sender signatures
    pub signatures: Vec<SignatureData>,
    /// Fee payer address, for fee-delegated types
    pub fee_payer: Option<Address>,
    /// Hash the fee-payer signatures were produced over
    pub fee_payer_sig_hash: Option<[u8; 32]>,
    /// Fee payer signatures
    pub fee_payer_signatures: Vec<SignatureData>,
}

impl Transaction {
    /// Create a transaction envelope without fee delegation
    pub fn new(
        tx_type: TxType,
        sender: Address,
        sig_hash: [u8; 32],
        signatures: Vec<SignatureData>,
    ) -> Self {
        Self {
            tx_type,
            sender,
            sig_hash,
            signatures,
            fee_payer: None,
            fee_payer_sig_hash: None,
            fee_payer_signatures: Vec::new(),
        }
    }

    /// Attach fee-payer data to the envelope
    pub fn with_fee_payer(
        mut self,
        fee_payer: Address,
        fee_payer_sig_hash: [u8; 32],
        fee_payer_signatures: Vec<SignatureData>,
    ) -> Self {
        self.fee_payer = Some(fee_payer);
        self.fee_payer_sig_hash = Some(fee_payer_sig_hash);
        self.fee_payer_signatures = fee_payer_signatures;
        self
    }
}
