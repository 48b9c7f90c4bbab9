//! Engine configuration: decay policy and digest window.

use serde::Deserialize;

use crate::domain::pillar::{DecayPolicy, DecaySchedule};

use super::error::ValidationError;

/// Engine configuration
///
/// One decay/boost pair for the whole engine, regardless of submission
/// source.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Per-update (or per-day) weight decay multiplier
    #[serde(default = "default_decay_factor")]
    pub decay_factor: f64,

    /// Confidence-weighted boost scale for classified pillars
    #[serde(default = "default_boost_factor")]
    pub boost_factor: f64,

    /// Whether decay is indexed per event or per elapsed day
    #[serde(default)]
    pub decay_schedule: DecaySchedule,

    /// Digest lookback window in days
    #[serde(default = "default_digest_window")]
    pub digest_window_days: i64,
}

impl EngineConfig {
    /// Builds the decay policy the engine injects everywhere.
    pub fn decay_policy(&self) -> DecayPolicy {
        DecayPolicy {
            decay_factor: self.decay_factor,
            boost_factor: self.boost_factor,
            schedule: self.decay_schedule,
        }
    }

    /// Validate engine configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !(self.decay_factor > 0.0 && self.decay_factor <= 1.0) {
            return Err(ValidationError::InvalidDecayFactor);
        }
        if !(0.0..=1.0).contains(&self.boost_factor) {
            return Err(ValidationError::InvalidBoostFactor);
        }
        if self.digest_window_days < 1 {
            return Err(ValidationError::InvalidDigestWindow);
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            decay_factor: default_decay_factor(),
            boost_factor: default_boost_factor(),
            decay_schedule: DecaySchedule::default(),
            digest_window_days: default_digest_window(),
        }
    }
}

fn default_decay_factor() -> f64 {
    0.95
}

fn default_boost_factor() -> f64 {
    0.10
}

fn default_digest_window() -> i64 {
    7
}
