//! Per-user relevance weights over the pillar taxonomy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::domain::foundation::{Timestamp, UserId};

use super::Pillar;

/// Initial weight given to every pillar on first use.
pub const DEFAULT_WEIGHT: f64 = 0.5;

/// A relevance weight, always within `[0.0, 1.0]`.
///
/// Construction clamps rather than fails: weights are produced by decay
/// and boost arithmetic, and the invariant is a property of the store,
/// not of the caller.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weight(f64);

impl Weight {
    /// Zero relevance.
    pub const MIN: Self = Self(0.0);

    /// Full relevance.
    pub const MAX: Self = Self(1.0);

    /// Creates a weight, clamping into `[0.0, 1.0]`.
    ///
    /// Non-finite inputs clamp to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self(DEFAULT_WEIGHT)
    }
}

impl fmt::Display for Weight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

/// Total mapping from every pillar to its relevance weight.
///
/// # Invariants
///
/// - Every pillar in the taxonomy has an entry (no missing keys)
/// - Every value is within `[0.0, 1.0]`
///
/// Both invariants hold by construction: the map is filled from the
/// default vector and deserialization backfills absent pillars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Pillar, Weight>")]
pub struct PillarWeights(BTreeMap<Pillar, Weight>);

impl PillarWeights {
    /// Creates the default vector: every pillar at [`DEFAULT_WEIGHT`].
    pub fn default_vector() -> Self {
        Self(
            Pillar::ALL
                .iter()
                .map(|p| (*p, Weight::default()))
                .collect(),
        )
    }

    /// Creates a vector with every pillar at the given weight.
    pub fn uniform(weight: Weight) -> Self {
        Self(Pillar::ALL.iter().map(|p| (*p, weight)).collect())
    }

    /// Returns the weight for a pillar.
    pub fn get(&self, pillar: Pillar) -> Weight {
        // Totality is a construction invariant; the fallback covers it defensively.
        self.0.get(&pillar).copied().unwrap_or_default()
    }

    /// Sets the weight for a pillar.
    pub fn set(&mut self, pillar: Pillar, weight: Weight) {
        self.0.insert(pillar, weight);
    }

    /// Iterates over all pillar/weight pairs in taxonomy order.
    pub fn iter(&self) -> impl Iterator<Item = (Pillar, Weight)> + '_ {
        self.0.iter().map(|(p, w)| (*p, *w))
    }

    /// Maps every weight through a function, clamping results.
    pub fn map_values(&self, f: impl Fn(Pillar, Weight) -> f64) -> Self {
        Self(
            self.iter()
                .map(|(p, w)| (p, Weight::new(f(p, w))))
                .collect(),
        )
    }
}

impl Default for PillarWeights {
    fn default() -> Self {
        Self::default_vector()
    }
}

impl From<BTreeMap<Pillar, Weight>> for PillarWeights {
    /// Backfills any missing pillar with the default weight, so a stored
    /// vector written before a taxonomy addition still deserializes total.
    fn from(mut map: BTreeMap<Pillar, Weight>) -> Self {
        for pillar in Pillar::ALL {
            map.entry(pillar).or_default();
        }
        Self(map)
    }
}

/// Stored weight vector for one user.
///
/// One row per user; created with the default vector on first use and
/// mutated only through the decay-and-boost update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightProfile {
    /// Owner of this profile.
    pub user_id: UserId,

    /// Current relevance vector.
    pub weights: PillarWeights,

    /// When the vector was last written.
    pub updated_at: Timestamp,
}

impl WeightProfile {
    /// Creates the initial profile for a user.
    pub fn initial(user_id: UserId) -> Self {
        Self {
            user_id,
            weights: PillarWeights::default_vector(),
            updated_at: Timestamp::now(),
        }
    }

    /// Replaces the vector, stamping the update time.
    pub fn replace_weights(&mut self, weights: PillarWeights) {
        self.weights = weights;
        self.updated_at = Timestamp::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> UserId {
        UserId::new("player-1").unwrap()
    }

    #[test]
    fn weight_new_clamps_out_of_range_values() {
        assert_eq!(Weight::new(1.5).value(), 1.0);
        assert_eq!(Weight::new(-0.2).value(), 0.0);
        assert_eq!(Weight::new(0.3).value(), 0.3);
    }

    #[test]
    fn weight_new_maps_nan_to_zero() {
        assert_eq!(Weight::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn weight_default_is_half() {
        assert_eq!(Weight::default().value(), DEFAULT_WEIGHT);
    }

    #[test]
    fn default_vector_covers_every_pillar_at_half() {
        let weights = PillarWeights::default_vector();
        for pillar in Pillar::ALL {
            assert_eq!(weights.get(pillar).value(), DEFAULT_WEIGHT);
        }
    }

    #[test]
    fn set_and_get_roundtrip() {
        let mut weights = PillarWeights::default_vector();
        weights.set(Pillar::Retention, Weight::new(0.9));
        assert_eq!(weights.get(Pillar::Retention).value(), 0.9);
        assert_eq!(weights.get(Pillar::Social).value(), DEFAULT_WEIGHT);
    }

    #[test]
    fn map_values_clamps_results() {
        let weights = PillarWeights::default_vector().map_values(|_, w| w.value() * 4.0);
        for pillar in Pillar::ALL {
            assert_eq!(weights.get(pillar).value(), 1.0);
        }
    }

    #[test]
    fn iter_yields_taxonomy_order() {
        let weights = PillarWeights::default_vector();
        let pillars: Vec<Pillar> = weights.iter().map(|(p, _)| p).collect();
        assert_eq!(pillars, Pillar::ALL.to_vec());
    }

    #[test]
    fn deserialization_backfills_missing_pillars() {
        let json = r#"{"retention": 0.8}"#;
        let weights: PillarWeights = serde_json::from_str(json).unwrap();
        assert_eq!(weights.get(Pillar::Retention).value(), 0.8);
        assert_eq!(weights.get(Pillar::Store).value(), DEFAULT_WEIGHT);
    }

    #[test]
    fn initial_profile_uses_default_vector() {
        let profile = WeightProfile::initial(user());
        assert_eq!(profile.weights, PillarWeights::default_vector());
    }

    #[test]
    fn replace_weights_advances_updated_at() {
        let mut profile = WeightProfile::initial(user());
        let before = profile.updated_at;
        std::thread::sleep(std::time::Duration::from_millis(5));
        profile.replace_weights(PillarWeights::uniform(Weight::new(0.1)));
        assert!(profile.updated_at.is_after(&before));
        assert_eq!(profile.weights.get(Pillar::Social).value(), 0.1);
    }
}
