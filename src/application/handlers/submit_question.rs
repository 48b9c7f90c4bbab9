//! SubmitQuestionHandler - entry point for new questions.
//!
//! A submitted question is always persisted, even when every enrichment
//! call fails: classification degrades to a null intent and the setup
//! step degrades to a plain queued record. Nothing is silently dropped.

use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::{CommandMetadata, UserLocks, WeightUpdater};
use crate::domain::foundation::{
    EventId, QuestionId, SerializableDomainEvent, Timestamp, UserId,
};
use crate::domain::intent::IntentClassification;
use crate::domain::pillar::WeightProfile;
use crate::domain::question::{
    ClarifyingQuestion, Question, QuestionAnswer, QuestionError, QuestionSource,
    QuestionStatus, QuestionSubmitted, WeightsUpdated,
};
use crate::ports::{
    ClarificationSetup, EventPublisher, IntentClassifier, QuestionRepository, SetupOutcome,
};

/// Command to submit a new question.
#[derive(Debug, Clone)]
pub struct SubmitQuestionCommand {
    pub user_id: UserId,
    pub text: String,
    pub source: QuestionSource,

    /// Clarifications the caller already collected (e.g., a form wizard
    /// that asked its own follow-ups). Their presence marks the question
    /// self-sufficient.
    pub pre_answered_clarifications: Option<Vec<QuestionAnswer>>,
}

/// Result of a successful submission.
#[derive(Debug, Clone)]
pub struct SubmitQuestionResult {
    pub question: Question,

    /// The new weight profile, when the submission triggered an update.
    pub weights: Option<WeightProfile>,
}

/// Handler for submitting questions.
pub struct SubmitQuestionHandler {
    questions: Arc<dyn QuestionRepository>,
    classifier: Arc<dyn IntentClassifier>,
    setup: Arc<dyn ClarificationSetup>,
    weight_updater: Arc<WeightUpdater>,
    event_publisher: Arc<dyn EventPublisher>,
    locks: Arc<UserLocks>,
}

impl SubmitQuestionHandler {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        classifier: Arc<dyn IntentClassifier>,
        setup: Arc<dyn ClarificationSetup>,
        weight_updater: Arc<WeightUpdater>,
        event_publisher: Arc<dyn EventPublisher>,
        locks: Arc<UserLocks>,
    ) -> Self {
        Self {
            questions,
            classifier,
            setup,
            weight_updater,
            event_publisher,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitQuestionCommand,
        metadata: CommandMetadata,
    ) -> Result<SubmitQuestionResult, QuestionError> {
        let _guard = self.locks.acquire(&cmd.user_id).await;

        let question_id = QuestionId::new();

        // 1. Setup step: decide queued vs waiting-for-answers.
        let mut question = match &cmd.pre_answered_clarifications {
            Some(pairs) => self.build_pre_answered(question_id, &cmd, pairs).await?,
            None => self.build_from_setup(question_id, &cmd).await?,
        };

        // 2. Best-effort classification over text plus any answers.
        let intent = self.classify(&question.clarification_context()).await;
        question = question.with_intent(intent.clone());

        // 3. Persist the record; a submitted question is never dropped.
        self.questions.save(&question).await?;

        // 4. Weight update, paired with the lifecycle write under the
        //    user lock. Deferred to clarification completion for
        //    ambiguous questions.
        let weights = match (&intent, question.status()) {
            (Some(intent), QuestionStatus::Queued) => Some(
                self.weight_updater
                    .apply(&cmd.user_id, intent)
                    .await
                    .map_err(QuestionError::from)?,
            ),
            _ => None,
        };

        // 5. Notify subscribers after commit, best-effort.
        self.notify(&question, &weights, &intent, &metadata).await;

        Ok(SubmitQuestionResult { question, weights })
    }

    /// Caller supplied answered clarifications: the question is
    /// self-sufficient and goes straight to `Queued`, with the brief
    /// generated eagerly when the setup service cooperates.
    async fn build_pre_answered(
        &self,
        question_id: QuestionId,
        cmd: &SubmitQuestionCommand,
        pairs: &[QuestionAnswer],
    ) -> Result<Question, QuestionError> {
        let slots: Vec<ClarifyingQuestion> = pairs
            .iter()
            .map(|pair| ClarifyingQuestion::answered(&pair.question, &pair.answer))
            .collect();

        let mut question = Question::queued(
            question_id,
            cmd.user_id.clone(),
            cmd.text.clone(),
            cmd.source,
        )?
        .with_answered_clarifications(slots);

        match self.setup.generate_setup(&question.clarification_context()).await {
            Ok(SetupOutcome::Complete { brief }) => {
                question.set_analysis_brief(brief)?;
            }
            Ok(SetupOutcome::Incomplete { .. }) => {
                // Caller asserted self-sufficiency; proceed without a brief.
                debug!(question = %question_id, "setup still reports gaps for pre-answered question");
            }
            Err(err) => {
                warn!(question = %question_id, error = %err, "setup unavailable, skipping brief");
            }
        }

        Ok(question)
    }

    /// No pre-answered clarifications: ask the setup service whether the
    /// question is complete, and branch the lifecycle on its answer.
    async fn build_from_setup(
        &self,
        question_id: QuestionId,
        cmd: &SubmitQuestionCommand,
    ) -> Result<Question, QuestionError> {
        match self.setup.generate_setup(&cmd.text).await {
            Ok(SetupOutcome::Complete { brief }) => Ok(Question::queued(
                question_id,
                cmd.user_id.clone(),
                cmd.text.clone(),
                cmd.source,
            )?
            .with_brief(Some(brief))),

            Ok(SetupOutcome::Incomplete { questions }) => {
                let mut slots: Vec<ClarifyingQuestion> = questions
                    .into_iter()
                    .map(|p| ClarifyingQuestion::unanswered(p.question, p.placeholder))
                    .collect();

                // Advisory suggestions, fetched concurrently; failures
                // leave the slot bare.
                let suggestions = join_all(slots.iter().map(|slot| {
                    self.setup
                        .generate_suggested_answer(&cmd.text, &slot.question)
                }))
                .await;
                for (slot, suggestion) in slots.iter_mut().zip(suggestions) {
                    if let Ok(suggestion) = suggestion {
                        slot.suggested_answer = Some(suggestion);
                    }
                }

                Question::awaiting_clarification(
                    question_id,
                    cmd.user_id.clone(),
                    cmd.text.clone(),
                    cmd.source,
                    slots,
                )
            }

            Err(err) => {
                warn!(question = %question_id, error = %err, "setup unavailable, queueing without brief");
                Question::queued(
                    question_id,
                    cmd.user_id.clone(),
                    cmd.text.clone(),
                    cmd.source,
                )
            }
        }
    }

    /// Classification degrades to `None`: the record is persisted either
    /// way, and a later retry path can re-enrich it.
    async fn classify(&self, context: &str) -> Option<IntentClassification> {
        match self.classifier.classify(context).await {
            Ok(raw) => {
                match IntentClassification::from_raw(&raw.pillars, raw.confidence, &raw.primary_pillar)
                {
                    Ok(intent) => Some(intent),
                    Err(err) => {
                        warn!(error = %err, "rejected malformed classifier payload");
                        None
                    }
                }
            }
            Err(err) => {
                warn!(error = %err, "classification unavailable, submitting with null intent");
                None
            }
        }
    }

    async fn notify(
        &self,
        question: &Question,
        weights: &Option<WeightProfile>,
        intent: &Option<IntentClassification>,
        metadata: &CommandMetadata,
    ) {
        let mut events = vec![QuestionSubmitted {
            event_id: EventId::new(),
            question_id: *question.id(),
            user_id: question.user_id().clone(),
            text: question.text().to_string(),
            source: question.source(),
            status: question.status(),
            occurred_at: Timestamp::now(),
        }
        .to_envelope()
        .with_correlation_id(metadata.correlation_id())
        .with_user_id(metadata.user_id.to_string())];

        if let (Some(profile), Some(intent)) = (weights, intent) {
            events.push(
                WeightsUpdated {
                    event_id: EventId::new(),
                    user_id: profile.user_id.clone(),
                    question_id: *question.id(),
                    weights: profile.weights.clone(),
                    intent: intent.clone(),
                    occurred_at: Timestamp::now(),
                }
                .to_envelope()
                .with_correlation_id(metadata.correlation_id())
                .with_user_id(metadata.user_id.to_string()),
            );
        }

        if let Err(err) = self.event_publisher.publish_all(events).await {
            warn!(error = %err, "subscriber notification failed; state is committed");
        }
    }
}
