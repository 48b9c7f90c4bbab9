//! Scripted classifier and setup doubles.
//!
//! Deterministic implementations for tests and local development; they
//! never touch the network.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{
    ClarificationSetup, IntentClassifier, RawClassification, SetupOutcome,
};

/// Classifier returning a fixed payload, optionally after a scripted
/// number of transient failures.
pub struct ScriptedClassifier {
    response: RawClassification,
    keyword_responses: Vec<(String, RawClassification)>,
    fail_first: AtomicU32,
    always_reject: bool,
    calls: AtomicU32,
}

impl ScriptedClassifier {
    /// Always returns the given payload.
    pub fn returning(response: RawClassification) -> Self {
        Self {
            response,
            keyword_responses: Vec::new(),
            fail_first: AtomicU32::new(0),
            always_reject: false,
            calls: AtomicU32::new(0),
        }
    }

    /// Returns `response` for texts containing `keyword` instead of the
    /// default payload. First matching keyword wins.
    pub fn with_keyword(mut self, keyword: impl Into<String>, response: RawClassification) -> Self {
        self.keyword_responses.push((keyword.into(), response));
        self
    }

    /// Fails the first `n` calls with `ClassificationUnavailable`, then
    /// succeeds.
    pub fn failing_first(mut self, n: u32) -> Self {
        self.fail_first = AtomicU32::new(n);
        self
    }

    /// Always fails with `ClassificationUnavailable`.
    pub fn unavailable() -> Self {
        Self::returning(RawClassification {
            pillars: vec![],
            confidence: 0.0,
            primary_pillar: String::new(),
        })
        .failing_first(u32::MAX)
    }

    /// Always fails with a non-retryable error.
    pub fn rejecting() -> Self {
        Self {
            response: RawClassification {
                pillars: vec![],
                confidence: 0.0,
                primary_pillar: String::new(),
            },
            keyword_responses: Vec::new(),
            fail_first: AtomicU32::new(0),
            always_reject: true,
            calls: AtomicU32::new(0),
        }
    }

    /// Number of classify calls observed.
    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IntentClassifier for ScriptedClassifier {
    async fn classify(&self, text: &str) -> Result<RawClassification, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if self.always_reject {
            return Err(DomainError::new(
                ErrorCode::InternalError,
                "classifier rejected request (400)",
            ));
        }

        let remaining = self.fail_first.load(Ordering::SeqCst);
        if remaining > 0 {
            if remaining != u32::MAX {
                self.fail_first.fetch_sub(1, Ordering::SeqCst);
            }
            return Err(DomainError::new(
                ErrorCode::ClassificationUnavailable,
                "scripted transient failure",
            ));
        }

        let matched = self
            .keyword_responses
            .iter()
            .find(|(keyword, _)| text.contains(keyword.as_str()))
            .map(|(_, response)| response.clone());
        Ok(matched.unwrap_or_else(|| self.response.clone()))
    }
}

/// Setup double returning a fixed outcome.
pub struct ScriptedSetup {
    outcome: Option<SetupOutcome>,
    suggested_answer: Option<String>,
    setup_calls: AtomicU32,
}

impl ScriptedSetup {
    /// Always returns the given outcome.
    pub fn returning(outcome: SetupOutcome) -> Self {
        Self {
            outcome: Some(outcome),
            suggested_answer: None,
            setup_calls: AtomicU32::new(0),
        }
    }

    /// Always fails with `ClassificationUnavailable`.
    pub fn unavailable() -> Self {
        Self {
            outcome: None,
            suggested_answer: None,
            setup_calls: AtomicU32::new(0),
        }
    }

    /// Also answers suggestion requests with a fixed string.
    pub fn with_suggested_answer(mut self, answer: impl Into<String>) -> Self {
        self.suggested_answer = Some(answer.into());
        self
    }

    /// Number of setup calls observed.
    pub fn setup_call_count(&self) -> u32 {
        self.setup_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ClarificationSetup for ScriptedSetup {
    async fn generate_setup(&self, _text: &str) -> Result<SetupOutcome, DomainError> {
        self.setup_calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().ok_or_else(|| {
            DomainError::new(
                ErrorCode::ClassificationUnavailable,
                "scripted setup failure",
            )
        })
    }

    async fn generate_suggested_answer(
        &self,
        _question_text: &str,
        _clarifying_question: &str,
    ) -> Result<String, DomainError> {
        self.suggested_answer.clone().ok_or_else(|| {
            DomainError::new(
                ErrorCode::ClassificationUnavailable,
                "no suggestion scripted",
            )
        })
    }
}
