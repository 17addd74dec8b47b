//! The account-key variant family and its canonical wire codec.
//!
//! Every variant is encoded as `tag byte || RLP(payload)`. The decoder
//! checks the tag exactly and never coerces: a payload that does not match
//! the tagged variant's shape is a hard error.

use crate::error::AccountKeyError;
use crate::weighted::{WeightedMultiSig, WeightedPublicKey};
use argon_codec::rlp::{self, Rlp};
use argon_crypto::PublicKey;
use argon_types::RoleGroup;
use tracing::debug;

/// Wire tag bytes, one per variant.
pub mod tag {
    /// The RLP empty-string marker; an unset key is a single 0x80 byte
    pub const NIL: u8 = 0x80;
    pub const LEGACY: u8 = 0x01;
    pub const PUBLIC: u8 = 0x02;
    pub const FAIL: u8 = 0x03;
    pub const WEIGHTED_MULTISIG: u8 = 0x04;
    pub const ROLE_BASED: u8 = 0x05;
}

/// An account's on-chain authorization policy.
///
/// Immutable once constructed; a key update produces a new value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AccountKey {
    /// Key left unspecified; only meaningful inside a role-based update
    /// payload, never as a top-level account key
    Nil,
    /// Authority derives from plain address-recoverable signatures
    Legacy,
    /// A single public key
    Public(PublicKey),
    /// No signature ever authorizes this account
    Fail,
    /// N-of-weighted-threshold multi-signature
    WeightedMultiSig(WeightedMultiSig),
    /// Distinct sub-keys per role group
    RoleBased(RoleBasedKey),
}

/// Ordered role slots of a role-based key, at most three, indexed by
/// [`RoleGroup`]. Elements cannot themselves be role-based.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoleBasedKey(Vec<AccountKey>);

impl RoleBasedKey {
    /// Validated construction from slot-ordered sub-keys
    pub fn new(keys: Vec<AccountKey>) -> Result<Self, AccountKeyError> {
        if keys.len() > RoleGroup::ALL.len() {
            return Err(AccountKeyError::Construction(format!(
                "a role-based key holds at most {} sub-keys, got {}",
                RoleGroup::ALL.len(),
                keys.len()
            )));
        }
        if keys.iter().any(|k| matches!(k, AccountKey::RoleBased(_))) {
            return Err(AccountKeyError::Construction(
                "role-based keys cannot nest".to_string(),
            ));
        }
        Ok(Self(keys))
    }

    /// Slot-ordered sub-keys
    pub fn keys(&self) -> &[AccountKey] {
        &self.0
    }

    /// The sub-key governing `role`. A role without its own slot defers
    /// to the transaction slot.
    pub fn key_for(&self, role: RoleGroup) -> Option<&AccountKey> {
        self.0.get(role.index()).or_else(|| self.0.first())
    }
}

impl AccountKey {
    /// Convenience constructor for a validated role-based key
    pub fn role_based(keys: Vec<AccountKey>) -> Result<Self, AccountKeyError> {
        Ok(AccountKey::RoleBased(RoleBasedKey::new(keys)?))
    }

    /// Convenience constructor for a validated weighted multisig key
    pub fn weighted_multisig(
        threshold: u32,
        keys: Vec<WeightedPublicKey>,
    ) -> Result<Self, AccountKeyError> {
        Ok(AccountKey::WeightedMultiSig(WeightedMultiSig::new(
            threshold, keys,
        )?))
    }

    /// Wire tag byte for this variant
    pub fn tag(&self) -> u8 {
        match self {
            AccountKey::Nil => tag::NIL,
            AccountKey::Legacy => tag::LEGACY,
            AccountKey::Public(_) => tag::PUBLIC,
            AccountKey::Fail => tag::FAIL,
            AccountKey::WeightedMultiSig(_) => tag::WEIGHTED_MULTISIG,
            AccountKey::RoleBased(_) => tag::ROLE_BASED,
        }
    }

    /// Canonical wire encoding: `tag || RLP(payload)`
    pub fn encode(&self) -> Vec<u8> {
        match self {
            AccountKey::Nil => vec![tag::NIL],
            AccountKey::Legacy => with_tag(tag::LEGACY, &Rlp::List(vec![])),
            AccountKey::Fail => with_tag(tag::FAIL, &Rlp::List(vec![])),
            AccountKey::Public(key) => {
                with_tag(tag::PUBLIC, &Rlp::bytes(key.to_compressed_bytes()))
            }
            AccountKey::WeightedMultiSig(multisig) => {
                let entries = multisig
                    .keys()
                    .iter()
                    .map(|key| {
                        Rlp::List(vec![
                            Rlp::uint(u64::from(key.weight())),
                            Rlp::bytes(key.public_key().to_compressed_bytes()),
                        ])
                    })
                    .collect();
                with_tag(
                    tag::WEIGHTED_MULTISIG,
                    &Rlp::List(vec![
                        Rlp::uint(u64::from(multisig.threshold())),
                        Rlp::List(entries),
                    ]),
                )
            }
            AccountKey::RoleBased(role_key) => {
                let slots = role_key
                    .keys()
                    .iter()
                    .map(|key| Rlp::bytes(key.encode()))
                    .collect();
                with_tag(tag::ROLE_BASED, &Rlp::List(slots))
            }
        }
    }

    /// Hex form of the wire encoding, as exposed over RPC
    pub fn encode_hex(&self) -> String {
        argon_codec::to_hex(&self.encode())
    }

    /// Decode a wire-encoded account key.
    ///
    /// Precedence: the single-byte empty-string marker (Nil) is matched
    /// first; every other variant dispatches on its leading tag byte, and
    /// an unrecognized tag is a hard error.
    pub fn decode(bytes: &[u8]) -> Result<Self, AccountKeyError> {
        let (&tag_byte, payload) = bytes.split_first().ok_or(AccountKeyError::Empty)?;
        debug!(tag = tag_byte, "decoding account key");
        if tag_byte == tag::NIL {
            if !payload.is_empty() {
                return Err(AccountKeyError::Payload(
                    "nil key carries no payload".to_string(),
                ));
            }
            return Ok(AccountKey::Nil);
        }
        match tag_byte {
            tag::LEGACY => {
                expect_empty_list(payload)?;
                Ok(AccountKey::Legacy)
            }
            tag::FAIL => {
                expect_empty_list(payload)?;
                Ok(AccountKey::Fail)
            }
            tag::PUBLIC => {
                let item = rlp::decode(payload)?;
                let key = PublicKey::from_sec1_bytes(item.as_bytes()?)?;
                Ok(AccountKey::Public(key))
            }
            tag::WEIGHTED_MULTISIG => decode_weighted_multisig(payload),
            tag::ROLE_BASED => decode_role_based(payload),
            other => Err(AccountKeyError::UnknownTag(other)),
        }
    }

    /// Decode from the 0x-prefixed hex form
    pub fn decode_hex(s: &str) -> Result<Self, AccountKeyError> {
        let bytes = argon_codec::from_hex(s)
            .map_err(|e| AccountKeyError::Payload(format!("invalid hex: {e}")))?;
        Self::decode(&bytes)
    }
}

fn with_tag(tag: u8, payload: &Rlp) -> Vec<u8> {
    let mut out = vec![tag];
    out.extend_from_slice(&rlp::encode(payload));
    out
}

fn expect_empty_list(payload: &[u8]) -> Result<(), AccountKeyError> {
    let item = rlp::decode(payload)?;
    if !item.as_list()?.is_empty() {
        return Err(AccountKeyError::Payload(
            "expected an empty list payload".to_string(),
        ));
    }
    Ok(())
}

fn decode_uint32(item: &Rlp, what: &str) -> Result<u32, AccountKeyError> {
    let value = item.as_uint()?;
    u32::try_from(value)
        .map_err(|_| AccountKeyError::Payload(format!("{what} {value} out of range")))
}

/// Payload: `[threshold, [[weight, compressedKey], ...]]`. Entry order is
/// significant and preserved. The threshold/weight invariants are
/// re-checked after decode since wire data is untrusted.
fn decode_weighted_multisig(payload: &[u8]) -> Result<AccountKey, AccountKeyError> {
    let item = rlp::decode(payload)?;
    let fields = item.as_list()?;
    if fields.len() != 2 {
        return Err(AccountKeyError::Payload(format!(
            "weighted multisig payload has {} fields, expected 2",
            fields.len()
        )));
    }
    let threshold = decode_uint32(&fields[0], "threshold")?;
    let mut keys = Vec::new();
    for entry in fields[1].as_list()? {
        let pair = entry.as_list()?;
        if pair.len() != 2 {
            return Err(AccountKeyError::Payload(format!(
                "weighted key entry has {} fields, expected 2",
                pair.len()
            )));
        }
        let weight = decode_uint32(&pair[0], "weight")?;
        let key = PublicKey::from_sec1_bytes(pair[1].as_bytes()?)?;
        keys.push(WeightedPublicKey::new(weight, key)?);
    }
    AccountKey::weighted_multisig(threshold, keys)
}

/// Payload: a list of up to three fully-encoded sub-keys in slot order.
/// Each element runs through the generic decoder again; slot order
/// determines role assignment.
fn decode_role_based(payload: &[u8]) -> Result<AccountKey, AccountKeyError> {
    let item = rlp::decode(payload)?;
    let mut keys = Vec::new();
    for slot in item.as_list()? {
        let sub_key = AccountKey::decode(slot.as_bytes()?)?;
        if matches!(sub_key, AccountKey::RoleBased(_)) {
            return Err(AccountKeyError::Construction(
                "role-based keys cannot nest".to_string(),
            ));
        }
        keys.push(sub_key);
    }
    AccountKey::role_based(keys)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weighted::WeightedMultiSigOptions;
    use argon_crypto::PrivateKey;
    use k256::ecdsa::SigningKey;
    use rand::rngs::OsRng;

    fn test_key() -> PublicKey {
        PrivateKey::from(SigningKey::random(&mut OsRng)).public_key()
    }

    fn test_multisig() -> AccountKey {
        let options = WeightedMultiSigOptions::new(3, vec![2, 1, 1]).unwrap();
        let multisig =
            WeightedMultiSig::from_public_keys(vec![test_key(), test_key(), test_key()], &options)
                .unwrap();
        AccountKey::WeightedMultiSig(multisig)
    }

    #[test]
    fn test_legacy_fixture() {
        // tag 0x01 with an empty-list payload
        assert_eq!(AccountKey::Legacy.encode(), vec![0x01, 0xc0]);
        let decoded = AccountKey::decode(&[0x01, 0xc0]).unwrap();
        assert_eq!(decoded, AccountKey::Legacy);
        assert_eq!(decoded.encode(), vec![0x01, 0xc0]);
    }

    #[test]
    fn test_fail_and_nil_fixtures() {
        assert_eq!(AccountKey::Fail.encode(), vec![0x03, 0xc0]);
        assert_eq!(AccountKey::Nil.encode(), vec![0x80]);
        assert_eq!(AccountKey::decode(&[0x03, 0xc0]).unwrap(), AccountKey::Fail);
        assert_eq!(AccountKey::decode(&[0x80]).unwrap(), AccountKey::Nil);
    }

    #[test]
    fn test_public_round_trip() {
        let key = AccountKey::Public(test_key());
        let encoded = key.encode();
        assert_eq!(encoded[0], tag::PUBLIC);
        // 1 tag + 1 RLP string header + 33 compressed bytes
        assert_eq!(encoded.len(), 35);
        assert_eq!(AccountKey::decode(&encoded).unwrap(), key);
    }

    #[test]
    fn test_weighted_multisig_round_trip() {
        let key = test_multisig();
        assert_eq!(AccountKey::decode(&key.encode()).unwrap(), key);
    }

    #[test]
    fn test_role_based_round_trip() {
        let key = AccountKey::role_based(vec![
            AccountKey::Public(test_key()),
            test_multisig(),
            AccountKey::Public(test_key()),
        ])
        .unwrap();
        assert_eq!(AccountKey::decode(&key.encode()).unwrap(), key);
    }

    #[test]
    fn test_role_based_with_nil_slot_round_trips() {
        let key = AccountKey::role_based(vec![
            AccountKey::Public(test_key()),
            AccountKey::Nil,
            AccountKey::Public(test_key()),
        ])
        .unwrap();
        assert_eq!(AccountKey::decode(&key.encode()).unwrap(), key);
    }

    #[test]
    fn test_hex_round_trip() {
        assert_eq!(AccountKey::Legacy.encode_hex(), "0x01c0");
        assert_eq!(
            AccountKey::decode_hex("0x01c0").unwrap(),
            AccountKey::Legacy
        );
    }

    #[test]
    fn test_decode_rejects_unknown_tag() {
        let result = AccountKey::decode(&[0x07, 0xc0]);
        assert!(matches!(result, Err(AccountKeyError::UnknownTag(0x07))));
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(matches!(
            AccountKey::decode(&[]),
            Err(AccountKeyError::Empty)
        ));
    }

    #[test]
    fn test_decode_rejects_nil_with_payload() {
        assert!(matches!(
            AccountKey::decode(&[0x80, 0x01]),
            Err(AccountKeyError::Payload(_))
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_payload() {
        let mut encoded = test_multisig().encode();
        encoded.truncate(encoded.len() - 3);
        assert!(matches!(
            AccountKey::decode(&encoded),
            Err(AccountKeyError::Rlp(_))
        ));
    }

    #[test]
    fn test_decode_rejects_wrong_payload_shape() {
        // legacy tag with a non-empty list payload
        let bytes = with_tag(tag::LEGACY, &Rlp::List(vec![Rlp::uint(1)]));
        assert!(matches!(
            AccountKey::decode(&bytes),
            Err(AccountKeyError::Payload(_))
        ));
    }

    #[test]
    fn test_decode_rejects_off_curve_public_key() {
        // 33 bytes with a valid compression prefix but an invalid X
        let mut garbage = vec![0x02];
        garbage.extend_from_slice(&[0xff; 32]);
        let bytes = with_tag(tag::PUBLIC, &Rlp::bytes(garbage));
        assert!(matches!(
            AccountKey::decode(&bytes),
            Err(AccountKeyError::Key(_))
        ));
    }

    #[test]
    fn test_decode_revalidates_multisig_invariants() {
        // threshold 5 over weights [1, 1]: structurally valid RLP, but the
        // threshold is unreachable, so decode must refuse it
        let entries = vec![
            Rlp::List(vec![
                Rlp::uint(1),
                Rlp::bytes(test_key().to_compressed_bytes()),
            ]),
            Rlp::List(vec![
                Rlp::uint(1),
                Rlp::bytes(test_key().to_compressed_bytes()),
            ]),
        ];
        let bytes = with_tag(
            tag::WEIGHTED_MULTISIG,
            &Rlp::List(vec![Rlp::uint(5), Rlp::List(entries)]),
        );
        assert!(matches!(
            AccountKey::decode(&bytes),
            Err(AccountKeyError::Construction(_))
        ));
    }

    #[test]
    fn test_decode_rejects_nested_role_based() {
        let inner = AccountKey::role_based(vec![AccountKey::Legacy]).unwrap();
        let bytes = with_tag(tag::ROLE_BASED, &Rlp::List(vec![Rlp::bytes(inner.encode())]));
        assert!(matches!(
            AccountKey::decode(&bytes),
            Err(AccountKeyError::Construction(_))
        ));
    }

    #[test]
    fn test_decode_rejects_four_role_slots() {
        let slots = (0..4)
            .map(|_| Rlp::bytes(AccountKey::Legacy.encode()))
            .collect();
        let bytes = with_tag(tag::ROLE_BASED, &Rlp::List(slots));
        assert!(matches!(
            AccountKey::decode(&bytes),
            Err(AccountKeyError::Construction(_))
        ));
    }

    #[test]
    fn test_role_fallback_to_transaction_slot() {
        let transaction_key = AccountKey::Public(test_key());
        let role_key = RoleBasedKey::new(vec![transaction_key.clone()]).unwrap();
        assert_eq!(
            role_key.key_for(RoleGroup::FeePayer),
            Some(&transaction_key)
        );
        assert_eq!(
            role_key.key_for(RoleGroup::AccountUpdate),
            Some(&transaction_key)
        );
    }

    #[test]
    fn test_construction_rejects_nested_role_based() {
        let inner = AccountKey::role_based(vec![AccountKey::Legacy]).unwrap();
        assert!(matches!(
            AccountKey::role_based(vec![inner]),
            Err(AccountKeyError::Construction(_))
        ));
    }
}
