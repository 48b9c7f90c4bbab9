//! Weekly trend digest over a user's question and pillar history.
//!
//! Derived and stateless: recomputed on demand from committed question
//! records and a weight snapshot, never persisted as a source of truth.

mod aggregator;
mod report;
mod templates;

pub use aggregator::generate_digest;
pub use report::{DigestReport, PillarInsight, TopPillar, Trend};
