//! Account value object pairing an address with its authorization key.
//!
//! Used when constructing a key-update payload; validation never needs it,
//! only the address and the key separately.

use crate::error::AccountKeyError;
use crate::key::AccountKey;
use crate::weighted::{WeightedMultiSig, WeightedMultiSigOptions};
use argon_crypto::PublicKey;
use argon_types::Address;
use serde::{Deserialize, Serialize};

/// An address together with the key that will govern it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    address: Address,
    key: AccountKey,
}

impl Account {
    pub fn new(address: Address, key: AccountKey) -> Self {
        Self { address, key }
    }

    /// Account governed by plain address-recoverable signatures
    pub fn with_legacy_key(address: Address) -> Self {
        Self::new(address, AccountKey::Legacy)
    }

    /// Account no signature can ever authorize
    pub fn with_fail_key(address: Address) -> Self {
        Self::new(address, AccountKey::Fail)
    }

    /// Account governed by a single public key
    pub fn from_public_key(address: Address, public_key: PublicKey) -> Self {
        Self::new(address, AccountKey::Public(public_key))
    }

    /// Account governed by a weighted multi-signature key
    pub fn from_weighted_multisig(
        address: Address,
        public_keys: Vec<PublicKey>,
        options: &WeightedMultiSigOptions,
    ) -> Result<Self, AccountKeyError> {
        let multisig = WeightedMultiSig::from_public_keys(public_keys, options)?;
        Ok(Self::new(address, AccountKey::WeightedMultiSig(multisig)))
    }

    /// Account governed by a role-based key. Each role slot takes a list
    /// of public keys with matching options; a slot with a single key and
    /// empty options becomes a bare Public key, a slot with no keys
    /// becomes Nil (leave that role unchanged on update).
    pub fn from_role_based(
        address: Address,
        role_keys: Vec<Vec<PublicKey>>,
        role_options: Vec<WeightedMultiSigOptions>,
    ) -> Result<Self, AccountKeyError> {
        if role_keys.len() != role_options.len() {
            return Err(AccountKeyError::Construction(format!(
                "{} role slots but {} option sets",
                role_keys.len(),
                role_options.len()
            )));
        }
        let mut keys = Vec::with_capacity(role_keys.len());
        for (slot_keys, options) in role_keys.into_iter().zip(role_options) {
            let key = if slot_keys.is_empty() {
                AccountKey::Nil
            } else if options.is_empty() {
                if slot_keys.len() > 1 {
                    return Err(AccountKeyError::Construction(
                        "multiple keys in a role slot require multisig options".to_string(),
                    ));
                }
                AccountKey::Public(slot_keys[0])
            } else {
                AccountKey::WeightedMultiSig(WeightedMultiSig::from_public_keys(
                    slot_keys, &options,
                )?)
            };
            keys.push(key);
        }
        Ok(Self::new(address, AccountKey::role_based(keys)?))
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn key(&self) -> &AccountKey {
        &self.key
    }

    /// Wire encoding of the key, as embedded in an update payload
    pub fn encode_key(&self) -> Vec<u8> {
        self.key.encode()
    }
}
