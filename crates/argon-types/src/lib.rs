//! Core types for argon
//!
//! This crate provides fundamental data structures used throughout the SDK,
//! including account addresses, role groups, transaction envelopes, and
//! error handling.

pub mod address;
pub mod error;
pub mod role;
pub mod tx;

pub use address::Address;
pub use error::{SdkError, SdkResult};
pub use role::RoleGroup;
pub use tx::{SignatureData, Transaction, TxType};
