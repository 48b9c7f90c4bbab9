//! Digest report types.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::Timestamp;
use crate::domain::pillar::{Pillar, Weight};

/// Direction of a pillar's question volume across the week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Trend::Up => "up",
            Trend::Down => "down",
            Trend::Stable => "stable",
        };
        write!(f, "{}", s)
    }
}

/// One of the week's most-asked-about pillars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopPillar {
    pub pillar: Pillar,

    /// The pillar's current weight store value (not its question share).
    pub weight: Weight,

    /// Share of the week's questions classified under this pillar.
    pub share_percent: f64,
}

/// Narrative insight for one top pillar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PillarInsight {
    pub title: String,
    pub summary: String,
    pub trend: Trend,
    pub recommendation: String,

    /// Up to three of the questions behind the insight.
    pub supporting_questions: Vec<String>,
}

/// The weekly derived trend report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DigestReport {
    pub week_start: Timestamp,
    pub week_end: Timestamp,

    /// Every non-cancelled question submitted in the window.
    pub total_questions: usize,

    /// At most three pillars, by descending question share.
    pub top_pillars: Vec<TopPillar>,

    /// One insight per top pillar.
    pub insights: Vec<PillarInsight>,

    /// At most three prioritized action items.
    pub action_items: Vec<String>,

    /// At most two focus suggestions for next week.
    pub next_week_focus: Vec<String>,
}
