//! Role groups for role-partitioned account keys

use serde::{Deserialize, Serialize};

/// Authorization context a signature is checked under.
///
/// A role-based account key assigns a distinct sub-key to each of these
/// contexts; the numeric value is the slot index inside the key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RoleGroup {
    /// Ordinary transactions
    Transaction = 0,
    /// Transactions that update the account's key
    AccountUpdate = 1,
    /// Fee delegation
    FeePayer = 2,
}

impl RoleGroup {
    /// All roles in slot order
    pub const ALL: [RoleGroup; 3] = [
        RoleGroup::Transaction,
        RoleGroup::AccountUpdate,
        RoleGroup::FeePayer,
    ];

    /// Slot index of this role inside a role-based key
    pub fn index(&self) -> usize {
        *self as usize
    }
}
