//! ClarificationSetup port - boundary to the external analysis-setup
//! generator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::DomainError;
use crate::domain::question::AnalysisBrief;

/// A follow-up question proposed by the setup generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposedClarification {
    /// The follow-up question to show the user.
    pub question: String,

    /// Optional input hint (e.g., "e.g., 30 days").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Outcome of the setup step, as a validated tagged union.
///
/// The upstream service is duck-typed; adapters must map its payload into
/// exactly one of these shapes so call sites never branch on raw JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum SetupOutcome {
    /// The question is self-sufficient; a brief was generated.
    Complete { brief: AnalysisBrief },

    /// The question is ambiguous; these follow-ups need answers first.
    Incomplete { questions: Vec<ProposedClarification> },
}

/// Port for deciding whether a question needs clarification.
#[async_trait]
pub trait ClarificationSetup: Send + Sync {
    /// Analyzes question text and either produces a brief or the
    /// follow-up questions required to get one.
    async fn generate_setup(&self, text: &str) -> Result<SetupOutcome, DomainError>;

    /// Proposes an answer for one clarifying question. Advisory only:
    /// failures never block the clarification protocol.
    async fn generate_suggested_answer(
        &self,
        question_text: &str,
        clarifying_question: &str,
    ) -> Result<String, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn ClarificationSetup) {}

    #[test]
    fn complete_outcome_serializes_with_tag() {
        let outcome = SetupOutcome::Complete {
            brief: AnalysisBrief {
                heading: "h".to_string(),
                description: "d".to_string(),
                hypothesis: "hy".to_string(),
                statistical_test: "t".to_string(),
                user_cohort: "c".to_string(),
                time_frame: "f".to_string(),
            },
        };
        let json = serde_json::to_string(&outcome).unwrap();
        assert!(json.contains("\"outcome\":\"complete\""));
    }

    #[test]
    fn incomplete_outcome_roundtrips() {
        let outcome = SetupOutcome::Incomplete {
            questions: vec![ProposedClarification {
                question: "Over what time window?".to_string(),
                placeholder: Some("e.g., 30 days".to_string()),
            }],
        };
        let json = serde_json::to_string(&outcome).unwrap();
        let back: SetupOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(outcome, back);
    }
}
