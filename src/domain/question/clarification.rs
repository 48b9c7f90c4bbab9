//! Clarification bookkeeping for ambiguous questions.
//!
//! Channel-specific parsing (web form fields, chat reply lines) is a
//! collaborator concern; this module only deals in an ordered list of
//! answers aligned to the outstanding questions, or explicit
//! question-to-answer pairs.

use serde::{Deserialize, Serialize};

/// One clarifying question slot on an ambiguous question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClarifyingQuestion {
    /// The follow-up question shown to the user.
    pub question: String,

    /// Placeholder hint from the setup generator (e.g., "e.g., 30 days").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,

    /// Advisory model-suggested answer; never required for progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_answer: Option<String>,

    /// The collected answer, if any.
    pub answer: Option<String>,
}

impl ClarifyingQuestion {
    /// Creates an unanswered slot.
    pub fn unanswered(question: impl Into<String>, placeholder: Option<String>) -> Self {
        Self {
            question: question.into(),
            placeholder,
            suggested_answer: None,
            answer: None,
        }
    }

    /// Creates a slot already carrying an answer.
    pub fn answered(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            placeholder: None,
            suggested_answer: None,
            answer: Some(answer.into()),
        }
    }

    /// Returns true if the slot has a non-empty answer.
    pub fn is_answered(&self) -> bool {
        self.answer
            .as_deref()
            .is_some_and(|a| !a.trim().is_empty())
    }
}

/// An explicit question-to-answer pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub question: String,
    pub answer: String,
}

/// Answers supplied for a question's clarification slots.
///
/// Both shapes collapse into the same slot structure regardless of the
/// channel they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClarificationAnswers {
    /// Positionally aligned to the outstanding questions. Empty strings
    /// leave the corresponding slot unanswered.
    Ordered(Vec<String>),

    /// Explicit pairs matched against slot question text.
    Paired(Vec<QuestionAnswer>),
}

impl ClarificationAnswers {
    /// Builds ordered answers from anything yielding strings.
    pub fn ordered<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Ordered(answers.into_iter().map(Into::into).collect())
    }

    /// Builds paired answers from (question, answer) tuples.
    pub fn paired<I, Q, A>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Q, A)>,
        Q: Into<String>,
        A: Into<String>,
    {
        Self::Paired(
            pairs
                .into_iter()
                .map(|(q, a)| QuestionAnswer {
                    question: q.into(),
                    answer: a.into(),
                })
                .collect(),
        )
    }
}
