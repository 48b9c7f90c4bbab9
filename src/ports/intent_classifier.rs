//! IntentClassifier port - boundary to the external NL classifier.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;

/// Untrusted classification payload as the upstream model produced it.
///
/// Pillar names are raw strings on purpose: validation into the closed
/// taxonomy happens in the domain
/// ([`IntentClassification::from_raw`](crate::domain::intent::IntentClassification::from_raw)),
/// so a misbehaving classifier is caught at this boundary rather than
/// deep in a weight update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClassification {
    /// Pillar names the question touches.
    pub pillars: Vec<String>,

    /// Model confidence, nominally in `[0, 1]`.
    pub confidence: f64,

    /// The single pillar the question is mostly about.
    pub primary_pillar: String,
}

/// Port for classifying question text into the pillar taxonomy.
///
/// Implementations must ensure:
/// - calls carry a timeout (classification is the only meaningfully
///   blocking operation in the engine)
/// - transient failures are retried with backoff before surfacing
///   `ClassificationUnavailable`
/// - classification is idempotent: the same text produces the same
///   result within model non-determinism tolerance, so retries are safe
#[async_trait]
pub trait IntentClassifier: Send + Sync {
    /// Classifies free text, optionally with clarification context
    /// appended by the caller.
    async fn classify(&self, text: &str) -> Result<RawClassification, DomainError>;
}
