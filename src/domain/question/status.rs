//! Question lifecycle status and submission source.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a question.
///
/// The vocabulary is closed: any other value is rejected at the
/// boundary during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuestionStatus {
    /// Intent known, no clarification outstanding, awaiting analysis.
    #[default]
    Queued,
    /// Clarification outstanding; answers still being collected.
    WaitingForAnswers,
    /// Terminal success; the analysis result is attached.
    Ready,
    /// Terminal user-initiated abort. Soft-deleted: retained for audit,
    /// excluded from active listings.
    Cancelled,
}

impl QuestionStatus {
    /// Returns true if the question still appears in active listings.
    pub fn is_active(&self) -> bool {
        !matches!(self, QuestionStatus::Cancelled)
    }
}

impl StateMachine for QuestionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use QuestionStatus::*;
        matches!(
            (self, target),
            (Queued, Ready) | (Queued, Cancelled) | (WaitingForAnswers, Queued)
                | (WaitingForAnswers, Cancelled)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use QuestionStatus::*;
        match self {
            Queued => vec![Ready, Cancelled],
            WaitingForAnswers => vec![Queued, Cancelled],
            Ready => vec![],
            Cancelled => vec![],
        }
    }
}

impl fmt::Display for QuestionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionStatus::Queued => "queued",
            QuestionStatus::WaitingForAnswers => "waiting_for_answers",
            QuestionStatus::Ready => "ready",
            QuestionStatus::Cancelled => "cancelled",
        };
        write!(f, "{}", s)
    }
}

/// Channel a question arrived through.
///
/// The entry channel never changes lifecycle or weight semantics; it is
/// carried for audit and for routing replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    Web,
    Slack,
}

impl fmt::Display for QuestionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            QuestionSource::Web => "web",
            QuestionSource::Slack => "slack",
        };
        write!(f, "{}", s)
    }
}
