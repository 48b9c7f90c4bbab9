//! CompleteQuestionHandler - attaches a computed analysis result.

use std::sync::Arc;
use tracing::warn;

use crate::application::{CommandMetadata, UserLocks};
use crate::domain::foundation::{EventId, QuestionId, SerializableDomainEvent, Timestamp, UserId};
use crate::domain::question::{AnalysisResult, Question, QuestionCompleted, QuestionError};
use crate::ports::{EventPublisher, QuestionRepository};

/// Command to complete a queued question with its result.
#[derive(Debug, Clone)]
pub struct CompleteQuestionCommand {
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub result: AnalysisResult,
}

/// Handler for completing questions.
pub struct CompleteQuestionHandler {
    questions: Arc<dyn QuestionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    locks: Arc<UserLocks>,
}

impl CompleteQuestionHandler {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
        locks: Arc<UserLocks>,
    ) -> Self {
        Self {
            questions,
            event_publisher,
            locks,
        }
    }

    pub async fn handle(
        &self,
        cmd: CompleteQuestionCommand,
        metadata: CommandMetadata,
    ) -> Result<Question, QuestionError> {
        let _guard = self.locks.acquire(&cmd.user_id).await;

        let mut question = self
            .questions
            .find_by_id(&cmd.question_id)
            .await?
            .ok_or(QuestionError::NotFound(cmd.question_id))?;
        question.authorize(&cmd.user_id)?;

        question.complete(cmd.result.clone())?;

        self.questions.update(&question).await?;
        self.questions.save_result(&cmd.result).await?;

        let event = QuestionCompleted {
            event_id: EventId::new(),
            question_id: *question.id(),
            user_id: question.user_id().clone(),
            occurred_at: Timestamp::now(),
        }
        .to_envelope()
        .with_correlation_id(metadata.correlation_id())
        .with_user_id(metadata.user_id.to_string());

        if let Err(err) = self.event_publisher.publish(event).await {
            warn!(error = %err, "subscriber notification failed; state is committed");
        }

        Ok(question)
    }
}
