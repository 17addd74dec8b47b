//! Weighted-key value objects for multi-signature account keys

use crate::error::AccountKeyError;
use argon_crypto::PublicKey;

/// Maximum number of keys a weighted multi-signature key may hold
pub const MAX_WEIGHTED_KEYS: usize = 10;

/// A public key paired with its voting weight
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedPublicKey {
    weight: u32,
    public_key: PublicKey,
}

impl WeightedPublicKey {
    /// Pair a key with a positive weight
    pub fn new(weight: u32, public_key: PublicKey) -> Result<Self, AccountKeyError> {
        if weight == 0 {
            return Err(AccountKeyError::Construction(
                "weight must be positive".to_string(),
            ));
        }
        Ok(Self { weight, public_key })
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }
}

/// Threshold and weights used when building a weighted multi-signature key.
///
/// The empty sentinel (no threshold, no weights) marks a role slot that
/// holds a bare public key rather than a multisig wrapper.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct WeightedMultiSigOptions {
    threshold: u32,
    weights: Vec<u32>,
}

impl WeightedMultiSigOptions {
    /// Validated construction: the threshold must be positive, at most
    /// ten weights may be given, every weight must be positive, and the
    /// threshold must be reachable by the weight sum.
    pub fn new(threshold: u32, weights: Vec<u32>) -> Result<Self, AccountKeyError> {
        if threshold == 0 {
            return Err(AccountKeyError::Construction(
                "threshold must be positive".to_string(),
            ));
        }
        if weights.len() > MAX_WEIGHTED_KEYS {
            return Err(AccountKeyError::Construction(format!(
                "at most {MAX_WEIGHTED_KEYS} weights allowed, got {}",
                weights.len()
            )));
        }
        if weights.iter().any(|w| *w == 0) {
            return Err(AccountKeyError::Construction(
                "weight must be positive".to_string(),
            ));
        }
        let total: u64 = weights.iter().map(|w| u64::from(*w)).sum();
        if u64::from(threshold) > total {
            return Err(AccountKeyError::Construction(format!(
                "threshold {threshold} exceeds weight sum {total}"
            )));
        }
        Ok(Self { threshold, weights })
    }

    /// The "no options" sentinel
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether this is the "no options" sentinel
    pub fn is_empty(&self) -> bool {
        self.threshold == 0 && self.weights.is_empty()
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn weights(&self) -> &[u32] {
        &self.weights
    }
}

/// Payload of a weighted multi-signature account key: a threshold and an
/// ordered list of weighted public keys. Order is significant and is
/// preserved by the wire codec.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedMultiSig {
    threshold: u32,
    keys: Vec<WeightedPublicKey>,
}

impl WeightedMultiSig {
    /// Validated construction over already-weighted keys
    pub fn new(threshold: u32, keys: Vec<WeightedPublicKey>) -> Result<Self, AccountKeyError> {
        if keys.is_empty() {
            return Err(AccountKeyError::Construction(
                "weighted key list must not be empty".to_string(),
            ));
        }
        // delegate the shared invariants to the options check
        WeightedMultiSigOptions::new(threshold, keys.iter().map(|k| k.weight()).collect())?;
        Ok(Self { threshold, keys })
    }

    /// Build from plain public keys and matching options
    pub fn from_public_keys(
        public_keys: Vec<PublicKey>,
        options: &WeightedMultiSigOptions,
    ) -> Result<Self, AccountKeyError> {
        if public_keys.len() != options.weights().len() {
            return Err(AccountKeyError::Construction(format!(
                "{} keys but {} weights",
                public_keys.len(),
                options.weights().len()
            )));
        }
        let keys = public_keys
            .into_iter()
            .zip(options.weights())
            .map(|(key, weight)| WeightedPublicKey::new(*weight, key))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(options.threshold(), keys)
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn keys(&self) -> &[WeightedPublicKey] {
        &self.keys
    }
}
