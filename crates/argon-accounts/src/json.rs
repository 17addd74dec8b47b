//! JSON representation of account keys.
//!
//! The RPC interface describes a key as `{ "keyType": <int>, "key": ... }`
//! where `key` is an object (Public, WeightedMultiSig), an array of such
//! objects in role order (RoleBased), or an empty object (Nil, Legacy,
//! Fail). Public keys appear as affine `{x, y}` hex coordinates.

use crate::error::AccountKeyError;
use crate::key::AccountKey;
use crate::weighted::{WeightedMultiSig, WeightedPublicKey};
use argon_crypto::PublicKey;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Serialize, Deserialize)]
struct Repr {
    #[serde(rename = "keyType")]
    key_type: u8,
    #[serde(default)]
    key: Value,
}

impl AccountKey {
    /// JSON `keyType` discriminant
    pub fn key_type(&self) -> u8 {
        match self {
            AccountKey::Nil => 0,
            AccountKey::Legacy => 1,
            AccountKey::Public(_) => 2,
            AccountKey::Fail => 3,
            AccountKey::WeightedMultiSig(_) => 4,
            AccountKey::RoleBased(_) => 5,
        }
    }

    fn key_json(&self) -> Value {
        match self {
            AccountKey::Nil | AccountKey::Legacy | AccountKey::Fail => json!({}),
            AccountKey::Public(key) => public_to_json(key),
            AccountKey::WeightedMultiSig(multisig) => multisig_to_json(multisig),
            AccountKey::RoleBased(role_key) => Value::Array(
                role_key
                    .keys()
                    .iter()
                    .map(|key| json!({ "keyType": key.key_type(), "key": key.key_json() }))
                    .collect(),
            ),
        }
    }

    fn from_repr(key_type: u8, key: Value) -> Result<Self, AccountKeyError> {
        match key_type {
            0 => Ok(AccountKey::Nil),
            1 => Ok(AccountKey::Legacy),
            2 => Ok(AccountKey::Public(public_from_json(&key)?)),
            3 => Ok(AccountKey::Fail),
            4 => {
                let threshold = uint_field(&key, "threshold")?;
                let entries = key
                    .get("keys")
                    .and_then(Value::as_array)
                    .ok_or_else(|| missing_field("keys"))?;
                let mut keys = Vec::new();
                for entry in entries {
                    let weight = uint_field(entry, "weight")?;
                    let public_key = public_from_json(
                        entry.get("key").ok_or_else(|| missing_field("key"))?,
                    )?;
                    keys.push(WeightedPublicKey::new(weight, public_key)?);
                }
                Ok(AccountKey::WeightedMultiSig(WeightedMultiSig::new(
                    threshold, keys,
                )?))
            }
            5 => {
                let slots = key
                    .as_array()
                    .ok_or_else(|| AccountKeyError::Payload(
                        "role-based key field must be an array".to_string(),
                    ))?;
                let mut keys = Vec::new();
                for slot in slots {
                    let repr: Repr = serde_json::from_value(slot.clone())
                        .map_err(|e| AccountKeyError::Payload(e.to_string()))?;
                    keys.push(AccountKey::from_repr(repr.key_type, repr.key)?);
                }
                AccountKey::role_based(keys)
            }
            other => Err(AccountKeyError::Payload(format!(
                "unknown keyType {other}"
            ))),
        }
    }
}

impl Serialize for AccountKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Repr {
            key_type: self.key_type(),
            key: self.key_json(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AccountKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr = Repr::deserialize(deserializer)?;
        AccountKey::from_repr(repr.key_type, repr.key).map_err(serde::de::Error::custom)
    }
}

fn multisig_to_json(multisig: &WeightedMultiSig) -> Value {
    let keys: Vec<Value> = multisig
        .keys()
        .iter()
        .map(|key| {
            json!({
                "weight": key.weight(),
                "key": public_to_json(key.public_key()),
            })
        })
        .collect();
    json!({ "threshold": multisig.threshold(), "keys": keys })
}

fn public_to_json(key: &PublicKey) -> Value {
    json!({
        "x": format!("0x{}", hex::encode(key.x())),
        "y": format!("0x{}", hex::encode(key.y())),
    })
}

fn public_from_json(value: &Value) -> Result<PublicKey, AccountKeyError> {
    let x = coordinate(value, "x")?;
    let y = coordinate(value, "y")?;
    Ok(PublicKey::from_xy(&x, &y)?)
}

/// Parse a 0x-hex coordinate, left-padding values shorter than 32 bytes
/// since RPC endpoints strip leading zeros.
fn coordinate(value: &Value, field: &str) -> Result<[u8; 32], AccountKeyError> {
    let text = value
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| missing_field(field))?;
    let bytes = argon_codec::from_hex(text)
        .map_err(|e| AccountKeyError::Payload(format!("invalid {field} coordinate: {e}")))?;
    if bytes.len() > 32 {
        return Err(AccountKeyError::Payload(format!(
            "{field} coordinate longer than 32 bytes"
        )));
    }
    let mut out = [0u8; 32];
    out[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(out)
}

fn uint_field(value: &Value, field: &str) -> Result<u32, AccountKeyError> {
    let raw = value
        .get(field)
        .and_then(Value::as_u64)
        .ok_or_else(|| missing_field(field))?;
    u32::try_from(raw)
        .map_err(|_| AccountKeyError::Payload(format!("{field} {raw} out of range")))
}

fn missing_field(field: &str) -> AccountKeyError {
    AccountKeyError::Payload(format!("missing field {field}"))
}
