//! Analysis result: the payload that completes a question.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{QuestionId, Timestamp};

/// Computed statistics for one question, keyed 1:1 to a ready question.
///
/// Append-only: the engine never recomputes or mutates a result, it only
/// attaches one when the downstream analysis pipeline delivers it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The question this result answers.
    pub question_id: QuestionId,

    /// Human-readable summary of the findings.
    pub summary: String,

    /// Raw metrics as produced by the analysis pipeline. Opaque to the
    /// engine.
    pub metrics: JsonValue,

    /// When the pipeline finished computing.
    pub computed_at: Timestamp,
}

impl AnalysisResult {
    /// Creates a result for the given question.
    pub fn new(question_id: QuestionId, summary: impl Into<String>, metrics: JsonValue) -> Self {
        Self {
            question_id,
            summary: summary.into(),
            metrics,
            computed_at: Timestamp::now(),
        }
    }
}
