//! Property tests: every account key survives the wire and JSON codecs.

use argon_accounts::{AccountKey, WeightedMultiSig, WeightedPublicKey};
use argon_crypto::{PrivateKey, PublicKey};
use proptest::collection::vec;
use proptest::prelude::*;

fn arb_public_key() -> impl Strategy<Value = PublicKey> {
    any::<[u8; 32]>().prop_filter_map("valid scalar", |bytes| {
        PrivateKey::from_bytes(&bytes).ok().map(|key| key.public_key())
    })
}

fn arb_multisig() -> impl Strategy<Value = WeightedMultiSig> {
    vec((1u32..100, arb_public_key()), 1..=10).prop_flat_map(|entries| {
        let total: u64 = entries.iter().map(|(weight, _)| u64::from(*weight)).sum();
        (1..=total).prop_map(move |threshold| {
            let keys = entries
                .iter()
                .map(|(weight, key)| WeightedPublicKey::new(*weight, *key).unwrap())
                .collect();
            WeightedMultiSig::new(threshold as u32, keys).unwrap()
        })
    })
}

/// Variants allowed inside a role-based key
fn arb_role_slot() -> impl Strategy<Value = AccountKey> {
    prop_oneof![
        Just(AccountKey::Nil),
        Just(AccountKey::Legacy),
        Just(AccountKey::Fail),
        arb_public_key().prop_map(AccountKey::Public),
        arb_multisig().prop_map(AccountKey::WeightedMultiSig),
    ]
}

fn arb_account_key() -> impl Strategy<Value = AccountKey> {
    prop_oneof![
        arb_role_slot(),
        vec(arb_role_slot(), 0..=3)
            .prop_map(|slots| AccountKey::role_based(slots).unwrap()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn wire_round_trip(key in arb_account_key()) {
        let encoded = key.encode();
        prop_assert_eq!(AccountKey::decode(&encoded).unwrap(), key);
    }

    #[test]
    fn hex_round_trip(key in arb_account_key()) {
        prop_assert_eq!(AccountKey::decode_hex(&key.encode_hex()).unwrap(), key);
    }

    #[test]
    fn json_round_trip(key in arb_account_key()) {
        let text = serde_json::to_string(&key).unwrap();
        prop_assert_eq!(serde_json::from_str::<AccountKey>(&text).unwrap(), key);
    }
}
