//! Decay-and-boost policy for the weight store.
//!
//! The update is an online exponential recency filter: each classified
//! question nudges the profile toward its pillars while every other
//! pillar fades. The policy is configured once and injected; the same
//! pair of constants applies regardless of submission source.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::intent::IntentClassification;

use super::{PillarWeights, Weight};

/// How decay is indexed.
///
/// `PerEvent` decays the whole vector once per update, so heavy askers
/// fade faster in wall-clock terms. `TimeIndexed` decays by
/// `decay_factor^elapsed_days`, matching a stated half-life regardless of
/// question volume; it is applied lazily on read and on update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecaySchedule {
    #[default]
    PerEvent,
    TimeIndexed,
}

/// The pair of constants governing how weights fade and how classified
/// pillars are reinforced, plus the decay indexing mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayPolicy {
    /// Multiplier applied to every weight before boosting. In `(0, 1]`.
    pub decay_factor: f64,

    /// Scale of the confidence-weighted boost for affected pillars.
    /// In `[0, 1]`.
    pub boost_factor: f64,

    /// Decay indexing mode.
    #[serde(default)]
    pub schedule: DecaySchedule,
}

impl DecayPolicy {
    /// Creates a policy after validating the constants.
    pub fn new(
        decay_factor: f64,
        boost_factor: f64,
        schedule: DecaySchedule,
    ) -> Result<Self, ValidationError> {
        if !(decay_factor > 0.0 && decay_factor <= 1.0) {
            return Err(ValidationError::out_of_range(
                "decay_factor",
                0.0,
                1.0,
                decay_factor,
            ));
        }
        if !(0.0..=1.0).contains(&boost_factor) {
            return Err(ValidationError::out_of_range(
                "boost_factor",
                0.0,
                1.0,
                boost_factor,
            ));
        }
        Ok(Self {
            decay_factor,
            boost_factor,
            schedule,
        })
    }

    /// Applies one decay-and-boost update.
    ///
    /// Pure function of its inputs:
    /// 1. every pillar decays by the schedule's multiplier for
    ///    `elapsed_days` since the last write;
    /// 2. every affected pillar gains `boost_factor * confidence` on top
    ///    of its decayed value;
    /// 3. all values clamp into `[0, 1]`.
    ///
    /// Untouched pillars are therefore non-increasing relative to prior,
    /// and touched pillars non-decreasing relative to their decayed value.
    pub fn apply(
        &self,
        prior: &PillarWeights,
        intent: &IntentClassification,
        elapsed_days: f64,
    ) -> PillarWeights {
        let multiplier = self.decay_multiplier(elapsed_days);
        let mut next = prior.map_values(|_, w| w.value() * multiplier);

        let boost = self.boost_factor * intent.confidence.value();
        for pillar in intent.affected_pillars() {
            next.set(pillar, Weight::new(next.get(pillar).value() + boost));
        }
        next
    }

    /// Returns the read-side view of a stored vector.
    ///
    /// Under `PerEvent` the stored vector is already current; under
    /// `TimeIndexed` decay accrues lazily, so reads see the vector faded
    /// by the days since the last write.
    pub fn observe(&self, stored: &PillarWeights, elapsed_days: f64) -> PillarWeights {
        match self.schedule {
            DecaySchedule::PerEvent => stored.clone(),
            DecaySchedule::TimeIndexed => {
                let multiplier = self.decay_multiplier(elapsed_days);
                stored.map_values(|_, w| w.value() * multiplier)
            }
        }
    }

    fn decay_multiplier(&self, elapsed_days: f64) -> f64 {
        match self.schedule {
            DecaySchedule::PerEvent => self.decay_factor,
            DecaySchedule::TimeIndexed => self.decay_factor.powf(elapsed_days.max(0.0)),
        }
    }
}

impl Default for DecayPolicy {
    /// The canonical pair: decay 0.95, boost 0.10, per-event.
    fn default() -> Self {
        Self {
            decay_factor: 0.95,
            boost_factor: 0.10,
            schedule: DecaySchedule::PerEvent,
        }
    }
}
