//! CancelQuestionHandler - user-initiated soft delete.

use std::sync::Arc;
use tracing::warn;

use crate::application::{CommandMetadata, UserLocks};
use crate::domain::foundation::{EventId, QuestionId, SerializableDomainEvent, Timestamp, UserId};
use crate::domain::question::{Question, QuestionCancelled, QuestionError};
use crate::ports::{EventPublisher, QuestionRepository};

/// Command to cancel a question.
#[derive(Debug, Clone)]
pub struct CancelQuestionCommand {
    pub user_id: UserId,
    pub question_id: QuestionId,
}

/// Handler for cancelling questions.
pub struct CancelQuestionHandler {
    questions: Arc<dyn QuestionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
    locks: Arc<UserLocks>,
}

impl CancelQuestionHandler {
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
        cmd: CancelQuestionCommand,
        metadata: CommandMetadata,
    ) -> Result<Question, QuestionError> {
        let _guard = self.locks.acquire(&cmd.user_id).await;

        let mut question = self
            .questions
            .find_by_id(&cmd.question_id)
            .await?
            .ok_or(QuestionError::NotFound(cmd.question_id))?;
        question.authorize(&cmd.user_id)?;

        question.cancel()?;
        self.questions.update(&question).await?;

        let event = QuestionCancelled {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::storage::InMemoryQuestionRepository;
    use crate::domain::question::{
        AnalysisResult, ClarifyingQuestion, QuestionSource, QuestionStatus,
    };
    use serde_json::json;

    fn user() -> UserId {
        UserId::new("player-1").unwrap()
    }

    fn metadata() -> CommandMetadata {
        CommandMetadata::new(user())
    }

    struct Fixture {
        questions: Arc<InMemoryQuestionRepository>,
        bus: Arc<InMemoryEventBus>,
        handler: CancelQuestionHandler,
    }

    fn fixture() -> Fixture {
        let questions = Arc::new(InMemoryQuestionRepository::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let handler =
            CancelQuestionHandler::new(questions.clone(), bus.clone(), Arc::new(UserLocks::new()));
        Fixture {
            questions,
            bus,
            handler,
        }
    }

    fn command(question_id: QuestionId) -> CancelQuestionCommand {
        CancelQuestionCommand {
            user_id: user(),
            question_id,
        }
    }

    #[tokio::test]
    async fn cancels_queued_question() {
        let f = fixture();
        let question = Question::queued(
            QuestionId::new(),
            user(),
            "Cancel me".to_string(),
            QuestionSource::Web,
        )
        .unwrap();
        f.questions.save(&question).await.unwrap();

        let cancelled = f
            .handler
            .handle(command(*question.id()), metadata())
            .await
            .unwrap();

        assert_eq!(cancelled.status(), QuestionStatus::Cancelled);
        assert!(f.bus.has_event("question.cancelled.v1").await);
        // Soft delete: gone from active listings, still stored.
        assert!(f
            .questions
            .list_active_by_user(&user())
            .await
            .unwrap()
            .is_empty());
        assert!(f.questions.find_by_id(question.id()).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn cancels_waiting_question() {
        let f = fixture();
        let question = Question::awaiting_clarification(
            QuestionId::new(),
            user(),
            "Cancel me".to_string(),
            QuestionSource::Slack,
            vec![ClarifyingQuestion::unanswered("Which cohort?", None)],
        )
        .unwrap();
        f.questions.save(&question).await.unwrap();

        let cancelled = f
            .handler
            .handle(command(*question.id()), metadata())
            .await
            .unwrap();
        assert_eq!(cancelled.status(), QuestionStatus::Cancelled);
    }

    #[tokio::test]
    async fn cancel_fails_on_ready_question_and_leaves_it_unchanged() {
        let f = fixture();
        let mut question = Question::queued(
            QuestionId::new(),
            user(),
            "Already done".to_string(),
            QuestionSource::Web,
        )
        .unwrap();
        question
            .complete(AnalysisResult::new(*question.id(), "s", json!({})))
            .unwrap();
        f.questions.save(&question).await.unwrap();

        let result = f.handler.handle(command(*question.id()), metadata()).await;

        assert!(matches!(
            result,
            Err(QuestionError::InvalidTransition { .. })
        ));
        let stored = f.questions.find_by_id(question.id()).await.unwrap().unwrap();
        assert_eq!(stored.status(), QuestionStatus::Ready);
        assert_eq!(f.bus.event_count().await, 0);
    }

    #[tokio::test]
    async fn fails_for_foreign_user() {
        let f = fixture();
        let question = Question::queued(
            QuestionId::new(),
            user(),
            "Not yours".to_string(),
            QuestionSource::Web,
        )
        .unwrap();
        f.questions.save(&question).await.unwrap();

        let stranger = UserId::new("player-2").unwrap();
        let result = f
            .handler
            .handle(
                CancelQuestionCommand {
                    user_id: stranger.clone(),
                    question_id: *question.id(),
                },
                CommandMetadata::new(stranger),
            )
            .await;

        assert_eq!(result, Err(QuestionError::Forbidden));
    }
}
