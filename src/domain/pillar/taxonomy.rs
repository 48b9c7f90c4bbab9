//! The closed set of analytics pillars.
//!
//! Pillars are the fixed topic categories every question is classified
//! into. The set is closed: payloads referencing any other name are
//! rejected at the intent adapter boundary, never coerced.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{DomainError, ErrorCode};

/// One of the seven fixed analytics topic categories.
///
/// Serialized with the upstream camelCase names (`userAcquisition`,
/// `techHealth`) so payloads from the classifier and the dashboard share
/// one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Pillar {
    Engagement,
    Retention,
    Monetization,
    Store,
    UserAcquisition,
    TechHealth,
    Social,
}

impl Pillar {
    /// Every pillar, in canonical taxonomy order.
    pub const ALL: [Pillar; 7] = [
        Pillar::Engagement,
        Pillar::Retention,
        Pillar::Monetization,
        Pillar::Store,
        Pillar::UserAcquisition,
        Pillar::TechHealth,
        Pillar::Social,
    ];

    /// Returns the wire name used in external payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Engagement => "engagement",
            Pillar::Retention => "retention",
            Pillar::Monetization => "monetization",
            Pillar::Store => "store",
            Pillar::UserAcquisition => "userAcquisition",
            Pillar::TechHealth => "techHealth",
            Pillar::Social => "social",
        }
    }

    /// Returns a human-readable label for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Pillar::Engagement => "Engagement",
            Pillar::Retention => "Retention",
            Pillar::Monetization => "Monetization",
            Pillar::Store => "Store",
            Pillar::UserAcquisition => "User Acquisition",
            Pillar::TechHealth => "Tech Health",
            Pillar::Social => "Social",
        }
    }

    /// Checks whether a raw name refers to a known pillar.
    pub fn is_valid_name(name: &str) -> bool {
        name.parse::<Pillar>().is_ok()
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Pillar {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pillar::ALL
            .iter()
            .find(|p| p.as_str() == s)
            .copied()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::UnknownPillar,
                    format!("Unknown pillar name: '{}'", s),
                )
                .with_detail("pillar", s.to_string())
            })
    }
}
