//! Question aggregate entity.
//!
//! A question is created on submission and owns its clarification slots,
//! cached analysis brief, and (once ready) its analysis result. Weight
//! profiles are referenced by user id but not owned.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{QuestionId, StateMachine, Timestamp, UserId, ValidationError};
use crate::domain::intent::IntentClassification;

use super::{
    AnalysisBrief, AnalysisResult, ClarificationAnswers, ClarifyingQuestion, QuestionError,
    QuestionSource, QuestionStatus,
};

/// Maximum length for question text.
pub const MAX_TEXT_LENGTH: usize = 2000;

/// Question aggregate - one submitted analytics question.
///
/// # Invariants
///
/// - `id` is globally unique
/// - `text` is 1-2000 characters, non-empty
/// - `status` only changes along the lifecycle state machine
/// - `result` is present exactly when status is `Ready`
/// - a `WaitingForAnswers` question always has clarification slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Unique identifier for this question.
    id: QuestionId,

    /// User who asked the question.
    user_id: UserId,

    /// Original free-text question.
    text: String,

    /// Channel the question arrived through.
    source: QuestionSource,

    /// Current lifecycle status.
    status: QuestionStatus,

    /// Normalized classification, if enrichment succeeded.
    intent: Option<IntentClassification>,

    /// Clarification slots, if the question needed (or arrived with)
    /// clarification.
    clarifying_questions: Option<Vec<ClarifyingQuestion>>,

    /// Whether clarification has been finalized (guards duplicate weight
    /// updates on answer resubmission).
    clarification_finalized: bool,

    /// Cached analysis brief, generated once.
    analysis_brief: Option<AnalysisBrief>,

    /// Computed result, attached on completion.
    result: Option<AnalysisResult>,

    /// When the question was submitted.
    created_at: Timestamp,

    /// When the question was last updated.
    updated_at: Timestamp,
}

impl Question {
    /// Creates a question directly in `Queued`.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the text is empty or too long
    pub fn queued(
        id: QuestionId,
        user_id: UserId,
        text: String,
        source: QuestionSource,
    ) -> Result<Self, QuestionError> {
        Self::validate_text(&text)?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            text,
            source,
            status: QuestionStatus::Queued,
            intent: None,
            clarifying_questions: None,
            clarification_finalized: false,
            analysis_brief: None,
            result: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Creates a question in `WaitingForAnswers` with unanswered slots.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the text is empty/too long or no slots
    ///   were provided
    pub fn awaiting_clarification(
        id: QuestionId,
        user_id: UserId,
        text: String,
        source: QuestionSource,
        questions: Vec<ClarifyingQuestion>,
    ) -> Result<Self, QuestionError> {
        Self::validate_text(&text)?;
        if questions.is_empty() {
            return Err(QuestionError::validation(
                "clarifying_questions",
                "an ambiguous question needs at least one clarifying question",
            ));
        }

        let now = Timestamp::now();
        Ok(Self {
            id,
            user_id,
            text,
            source,
            status: QuestionStatus::WaitingForAnswers,
            intent: None,
            clarifying_questions: Some(questions),
            clarification_finalized: false,
            analysis_brief: None,
            result: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attaches a best-effort intent at construction time.
    pub fn with_intent(mut self, intent: Option<IntentClassification>) -> Self {
        self.intent = intent;
        self
    }

    /// Attaches an eagerly generated brief at construction time.
    pub fn with_brief(mut self, brief: Option<AnalysisBrief>) -> Self {
        self.analysis_brief = brief;
        self
    }

    /// Attaches caller-supplied, already-answered clarification slots at
    /// construction time, marking clarification as finalized.
    pub fn with_answered_clarifications(mut self, slots: Vec<ClarifyingQuestion>) -> Self {
        self.clarifying_questions = Some(slots);
        self.clarification_finalized = true;
        self
    }

    /// Reconstitutes a question from persistence (no validation, no events).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: QuestionId,
        user_id: UserId,
        text: String,
        source: QuestionSource,
        status: QuestionStatus,
        intent: Option<IntentClassification>,
        clarifying_questions: Option<Vec<ClarifyingQuestion>>,
        clarification_finalized: bool,
        analysis_brief: Option<AnalysisBrief>,
        result: Option<AnalysisResult>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            text,
            source,
            status,
            intent,
            clarifying_questions,
            clarification_finalized,
            analysis_brief,
            result,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn source(&self) -> QuestionSource {
        self.source
    }

    pub fn status(&self) -> QuestionStatus {
        self.status
    }

    pub fn intent(&self) -> Option<&IntentClassification> {
        self.intent.as_ref()
    }

    pub fn clarifying_questions(&self) -> Option<&[ClarifyingQuestion]> {
        self.clarifying_questions.as_deref()
    }

    pub fn clarification_finalized(&self) -> bool {
        self.clarification_finalized
    }

    pub fn analysis_brief(&self) -> Option<&AnalysisBrief> {
        self.analysis_brief.as_ref()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_ref()
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns true if the question appears in active listings.
    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Authorization
    // ─────────────────────────────────────────────────────────────────────────

    /// Checks if the given user owns this question.
    pub fn is_owner(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Validates that the user can operate on this question.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user is not the owner
    pub fn authorize(&self, user_id: &UserId) -> Result<(), QuestionError> {
        if self.is_owner(user_id) {
            Ok(())
        } else {
            Err(QuestionError::forbidden())
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Clarification
    // ─────────────────────────────────────────────────────────────────────────

    /// Records answers into the clarification slots.
    ///
    /// Empty answers leave their slot untouched, so partial collection
    /// across several calls is possible. Does not transition state.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the question is not waiting for answers
    /// - `ValidationFailed` for positional overflow or an unknown
    ///   question in paired form
    pub fn record_answers(
        &mut self,
        answers: &ClarificationAnswers,
    ) -> Result<(), QuestionError> {
        if self.status != QuestionStatus::WaitingForAnswers {
            return Err(QuestionError::invalid_transition(
                self.status,
                "answer_clarifications",
            ));
        }
        let slots = self.clarifying_questions.as_mut().ok_or_else(|| {
            QuestionError::validation(
                "clarifying_questions",
                "question has no clarification outstanding",
            )
        })?;

        match answers {
            ClarificationAnswers::Ordered(list) => {
                if list.len() > slots.len() {
                    return Err(QuestionError::validation(
                        "answers",
                        format!(
                            "{} answers supplied for {} outstanding questions",
                            list.len(),
                            slots.len()
                        ),
                    ));
                }
                for (slot, answer) in slots.iter_mut().zip(list) {
                    if !answer.trim().is_empty() {
                        slot.answer = Some(answer.clone());
                    }
                }
            }
            ClarificationAnswers::Paired(pairs) => {
                for pair in pairs {
                    let slot = slots
                        .iter_mut()
                        .find(|s| s.question == pair.question)
                        .ok_or_else(|| {
                            QuestionError::validation(
                                "answers",
                                format!("unknown clarifying question: '{}'", pair.question),
                            )
                        })?;
                    if !pair.answer.trim().is_empty() {
                        slot.answer = Some(pair.answer.clone());
                    }
                }
            }
        }

        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Returns the texts of slots still lacking a non-empty answer.
    pub fn unanswered_questions(&self) -> Vec<String> {
        self.clarifying_questions
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter(|slot| !slot.is_answered())
            .map(|slot| slot.question.clone())
            .collect()
    }

    /// Returns true if every clarification slot has a non-empty answer.
    pub fn clarification_complete(&self) -> bool {
        self.unanswered_questions().is_empty()
    }

    /// Checks whether the supplied answers are exactly the ones already
    /// recorded. Used to make clarification finalization idempotent.
    pub fn answers_match(&self, answers: &ClarificationAnswers) -> bool {
        let Some(slots) = self.clarifying_questions.as_deref() else {
            return false;
        };
        match answers {
            ClarificationAnswers::Ordered(list) => {
                list.len() == slots.len()
                    && slots.iter().zip(list).all(|(slot, answer)| {
                        slot.answer.as_deref().map(str::trim) == Some(answer.trim())
                    })
            }
            ClarificationAnswers::Paired(pairs) => pairs.iter().all(|pair| {
                slots.iter().any(|slot| {
                    slot.question == pair.question
                        && slot.answer.as_deref().map(str::trim) == Some(pair.answer.trim())
                })
            }),
        }
    }

    /// Completes the clarification sub-protocol and moves to `Queued`.
    ///
    /// The caller re-runs classification over [`Self::clarification_context`]
    /// first and passes the outcome; `None` keeps whatever intent the
    /// question already had.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` if the question is not waiting for answers
    /// - `IncompleteAnswers` naming every unanswered slot
    pub fn finalize_clarification(
        &mut self,
        intent: Option<IntentClassification>,
    ) -> Result<(), QuestionError> {
        if self.status != QuestionStatus::WaitingForAnswers {
            return Err(QuestionError::invalid_transition(
                self.status,
                "finalize_clarification",
            ));
        }
        let missing = self.unanswered_questions();
        if !missing.is_empty() {
            return Err(QuestionError::incomplete_answers(missing));
        }

        if intent.is_some() {
            self.intent = intent;
        }
        self.status = QuestionStatus::Queued;
        self.clarification_finalized = true;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Returns the original text plus collected answers, the context the
    /// classifier sees on re-classification.
    pub fn clarification_context(&self) -> String {
        let mut context = self.text.clone();
        for slot in self.clarifying_questions.as_deref().unwrap_or_default() {
            if let Some(answer) = slot.answer.as_deref() {
                context.push_str(&format!("\nQ: {}\nA: {}", slot.question, answer));
            }
        }
        context
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    /// Caches the analysis brief. The brief is immutable once generated.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if a brief is already cached
    pub fn set_analysis_brief(&mut self, brief: AnalysisBrief) -> Result<(), QuestionError> {
        if self.analysis_brief.is_some() {
            return Err(QuestionError::validation(
                "analysis_brief",
                "brief is already generated for this question",
            ));
        }
        self.analysis_brief = Some(brief);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Attaches a computed result and moves to `Ready`.
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` unless the question is `Queued`
    /// - `ValidationFailed` if the result is keyed to another question
    pub fn complete(&mut self, result: AnalysisResult) -> Result<(), QuestionError> {
        if self.status != QuestionStatus::Queued {
            return Err(QuestionError::invalid_transition(self.status, "complete"));
        }
        if result.question_id != self.id {
            return Err(QuestionError::validation(
                "result",
                format!(
                    "result is keyed to question {} but attached to {}",
                    result.question_id, self.id
                ),
            ));
        }

        self.status = QuestionStatus::Ready;
        self.result = Some(result);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Cancels the question (soft delete).
    ///
    /// # Errors
    ///
    /// - `InvalidTransition` from `Ready` (a completed analysis cannot be
    ///   retroactively cancelled) or `Cancelled`
    pub fn cancel(&mut self) -> Result<(), QuestionError> {
        if !self.status.can_transition_to(&QuestionStatus::Cancelled) {
            return Err(QuestionError::invalid_transition(self.status, "cancel"));
        }

        self.status = QuestionStatus::Cancelled;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    fn validate_text(text: &str) -> Result<(), ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::empty_field("text"));
        }
        if text.len() > MAX_TEXT_LENGTH {
            return Err(ValidationError::invalid_format(
                "text",
                format!("exceeds maximum length of {}", MAX_TEXT_LENGTH),
            ));
        }
        Ok(())
    }
}
