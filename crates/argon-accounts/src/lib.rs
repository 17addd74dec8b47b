//! Account-key model and signature validation for argon
//!
//! This crate implements the on-chain account authorization model: the
//! six-variant account key, its canonical wire codec and JSON form, and
//! the validator that decides whether a signature set satisfies a key's
//! policy under a given role.

pub mod account;
pub mod error;
mod json;
pub mod key;
pub mod validator;
pub mod weighted;

pub use account::Account;
pub use error::AccountKeyError;
pub use key::{AccountKey, RoleBasedKey};
pub use validator::{
    validate_fee_payer, validate_sender, validate_signatures, validate_signed_message,
    validate_transaction, ValidateError,
};
pub use weighted::{
    WeightedMultiSig, WeightedMultiSigOptions, WeightedPublicKey, MAX_WEIGHTED_KEYS,
};
