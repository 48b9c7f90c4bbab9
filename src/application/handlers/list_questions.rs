//! ListActiveQuestionsHandler - active question listing.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::question::{Question, QuestionError};
use crate::ports::QuestionRepository;

/// Handler for listing a user's active questions.
///
/// Read-only: no lock is taken, and cancelled records never appear.
pub struct ListActiveQuestionsHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl ListActiveQuestionsHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<Vec<Question>, QuestionError> {
        Ok(self.questions.list_active_by_user(user_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryQuestionRepository;
    use crate::domain::foundation::QuestionId;
    use crate::domain::question::QuestionSource;

    fn user() -> UserId {
        UserId::new("player-1").unwrap()
    }

    #[tokio::test]
    async fn lists_only_active_questions() {
        let repo = Arc::new(InMemoryQuestionRepository::new());
        let handler = ListActiveQuestionsHandler::new(repo.clone());

        let keep = Question::queued(
            QuestionId::new(),
            user(),
            "keep".to_string(),
            QuestionSource::Web,
        )
        .unwrap();
        let mut gone = Question::queued(
            QuestionId::new(),
            user(),
            "gone".to_string(),
            QuestionSource::Web,
        )
        .unwrap();
        repo.save(&keep).await.unwrap();
        repo.save(&gone).await.unwrap();
        gone.cancel().unwrap();
        repo.update(&gone).await.unwrap();

        let active = handler.handle(&user()).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].text(), "keep");
    }

    #[tokio::test]
    async fn empty_for_unknown_user() {
        let handler =
            ListActiveQuestionsHandler::new(Arc::new(InMemoryQuestionRepository::new()));
        assert!(handler.handle(&user()).await.unwrap().is_empty());
    }
}
