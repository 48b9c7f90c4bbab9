//! Pillar taxonomy and per-user relevance weights.

mod decay_policy;
mod taxonomy;
mod weights;

pub use decay_policy::{DecayPolicy, DecaySchedule};
pub use taxonomy::Pillar;
pub use weights::{PillarWeights, Weight, WeightProfile, DEFAULT_WEIGHT};
