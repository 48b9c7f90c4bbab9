//! AnswerClarificationsHandler - collects clarifying answers and, once
//! every slot is filled, re-runs classification and re-queues the
//! question.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::application::{CommandMetadata, UserLocks, WeightUpdater};
use crate::domain::foundation::{EventId, QuestionId, SerializableDomainEvent, Timestamp, UserId};
use crate::domain::intent::IntentClassification;
use crate::domain::pillar::WeightProfile;
use crate::domain::question::{
    ClarificationAnswers, Question, QuestionClarified, QuestionError, QuestionStatus,
    WeightsUpdated,
};
use crate::ports::{EventPublisher, IntentClassifier, QuestionRepository};

/// Command to answer a question's outstanding clarifications.
#[derive(Debug, Clone)]
pub struct AnswerClarificationsCommand {
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub answers: ClarificationAnswers,

    /// When true, answers that leave slots unfilled are stored and the
    /// question stays waiting. When false (the default posture for a
    /// caller asserting completion), unfilled slots fail the call.
    pub allow_partial: bool,
}

/// Result of answering clarifications.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerClarificationsResult {
    pub question: Question,

    /// The new weight profile, when finalization triggered an update.
    pub weights: Option<WeightProfile>,
}

/// Handler for the clarification answer flow.
pub struct AnswerClarificationsHandler {
    questions: Arc<dyn QuestionRepository>,
    classifier: Arc<dyn IntentClassifier>,
    weight_updater: Arc<WeightUpdater>,
    event_publisher: Arc<dyn EventPublisher>,
    locks: Arc<UserLocks>,
}

impl AnswerClarificationsHandler {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        classifier: Arc<dyn IntentClassifier>,
        weight_updater: Arc<WeightUpdater>,
        event_publisher: Arc<dyn EventPublisher>,
        locks: Arc<UserLocks>,
    ) -> Self {
        Self {
            questions,
            classifier,
            weight_updater,
            event_publisher,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: AnswerClarificationsCommand,
        metadata: CommandMetadata,
    ) -> Result<AnswerClarificationsResult, QuestionError> {
        let _guard = self.locks.acquire(&cmd.user_id).await;

        let mut question = self
            .questions
            .find_by_id(&cmd.question_id)
            .await?
            .ok_or(QuestionError::NotFound(cmd.question_id))?;
        question.authorize(&cmd.user_id)?;

        // Idempotence: resubmitting the answers of an already-finalized
        // clarification is a no-op, with no second weight update.
        if question.status() != QuestionStatus::WaitingForAnswers {
            if question.clarification_finalized() && question.answers_match(&cmd.answers) {
                debug!(question = %cmd.question_id, "duplicate clarification submission ignored");
                return Ok(AnswerClarificationsResult {
                    question,
                    weights: None,
                });
            }
            return Err(QuestionError::invalid_transition(
                question.status(),
                "answer_clarifications",
            ));
        }

        question.record_answers(&cmd.answers)?;

        if !question.clarification_complete() {
            if cmd.allow_partial {
                self.questions.update(&question).await?;
                return Ok(AnswerClarificationsResult {
                    question,
                    weights: None,
                });
            }
            // Caller asserted completion prematurely; nothing persisted.
            return Err(QuestionError::incomplete_answers(
                question.unanswered_questions(),
            ));
        }

        // Re-run classification over the original text plus answers.
        let intent = self.classify(&question.clarification_context()).await;
        question.finalize_clarification(intent.clone())?;

        // Lifecycle write and weight update commit together under the
        // user lock, before any notification.
        self.questions.update(&question).await?;
        let weights = match &intent {
            Some(intent) => Some(
                self.weight_updater
                    .apply(&cmd.user_id, intent)
                    .await
                    .map_err(QuestionError::from)?,
            ),
            None => None,
        };

        self.notify(&question, &weights, &intent, &metadata).await;

        Ok(AnswerClarificationsResult { question, weights })
    }

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
                warn!(error = %err, "reclassification unavailable, keeping prior intent");
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
        let mut events = vec![QuestionClarified {
            event_id: EventId::new(),
            question_id: *question.id(),
            user_id: question.user_id().clone(),
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
