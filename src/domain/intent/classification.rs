//! Normalized intent classification.
//!
//! The upstream classifier is duck-typed and not trusted: raw payloads are
//! validated here into a closed shape before anything downstream sees them.
//! Unknown pillar names are rejected, never coerced.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::DomainError;
use crate::domain::pillar::Pillar;

/// Classifier confidence, always within `[0.0, 1.0]`.
///
/// Clamped at construction: the model occasionally reports values a hair
/// outside the range and the engine treats that as saturation, not error.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Confidence(f64);

impl Confidence {
    /// Creates a confidence value, clamping into `[0.0, 1.0]`.
    ///
    /// Non-finite inputs clamp to zero.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// Full confidence.
    pub const MAX: Self = Self(1.0);

    /// Returns the value as f64.
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Validated classification of a question into the pillar taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentClassification {
    /// Pillars the question touches. Never empty.
    pub pillars: Vec<Pillar>,

    /// Classifier confidence.
    pub confidence: Confidence,

    /// The single pillar the question is mostly about.
    pub primary_pillar: Pillar,
}

impl IntentClassification {
    /// Creates a classification from already-typed parts.
    ///
    /// An empty pillar set falls back to `{primary_pillar}`.
    pub fn new(pillars: Vec<Pillar>, confidence: Confidence, primary_pillar: Pillar) -> Self {
        let pillars = if pillars.is_empty() {
            vec![primary_pillar]
        } else {
            pillars
        };
        Self {
            pillars,
            confidence,
            primary_pillar,
        }
    }

    /// Normalizes a raw classifier payload into the taxonomy.
    ///
    /// # Errors
    ///
    /// - `UnknownPillar` if any pillar name (including the primary) is not
    ///   in the taxonomy
    pub fn from_raw(
        pillar_names: &[String],
        confidence: f64,
        primary_name: &str,
    ) -> Result<Self, DomainError> {
        let pillars = pillar_names
            .iter()
            .map(|name| name.parse::<Pillar>())
            .collect::<Result<Vec<_>, _>>()?;
        let primary = primary_name.parse::<Pillar>()?;

        Ok(Self::new(pillars, Confidence::new(confidence), primary))
    }

    /// Returns the set of pillars a weight update should boost.
    ///
    /// The classifier is supposed to include the primary pillar in
    /// `pillars`; when it does not, the union is used so the primary is
    /// never dropped from the update.
    pub fn affected_pillars(&self) -> Vec<Pillar> {
        let mut affected = self.pillars.clone();
        if !affected.contains(&self.primary_pillar) {
            affected.push(self.primary_pillar);
        }
        affected.dedup();
        affected
    }
}
