//! GenerateDigestHandler - weekly trend report.
//!
//! A periodic batch read: no user lock is taken, committed snapshots are
//! good enough, and a run concurrent with in-flight submissions may see
//! a slightly stale week. The report is recomputed on every call and
//! never persisted as a source of truth.

use std::sync::Arc;
use tracing::debug;

use crate::application::WeightUpdater;
use crate::domain::digest::{generate_digest, DigestReport};
use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::ports::QuestionRepository;

/// Handler computing the digest for one user.
pub struct GenerateDigestHandler {
    questions: Arc<dyn QuestionRepository>,
    weight_updater: Arc<WeightUpdater>,
    window_days: i64,
}

impl GenerateDigestHandler {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        weight_updater: Arc<WeightUpdater>,
        window_days: i64,
    ) -> Self {
        Self {
            questions,
            weight_updater,
            window_days,
        }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<DigestReport, DomainError> {
        let now = Timestamp::now();
        let from = now.minus_days(self.window_days);

        let questions = self.questions.list_in_window(user_id, &from, &now).await?;
        let weights = self.weight_updater.current(user_id).await?;

        let report = generate_digest(&questions, &weights, now, self.window_days);
        debug!(
            user = %user_id,
            total = report.total_questions,
            top = report.top_pillars.len(),
            "digest generated"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::{InMemoryQuestionRepository, InMemoryWeightRepository};
    use crate::domain::foundation::QuestionId;
    use crate::domain::intent::{Confidence, IntentClassification};
    use crate::domain::pillar::{DecayPolicy, Pillar};
    use crate::domain::question::{Question, QuestionSource};

    fn user() -> UserId {
        UserId::new("player-1").unwrap()
    }

    async fn seed(repo: &InMemoryQuestionRepository, pillar: Pillar, text: &str) {
        let q = Question::queued(
            QuestionId::new(),
            user(),
            text.to_string(),
            QuestionSource::Web,
        )
        .unwrap()
        .with_intent(Some(IntentClassification::new(
            vec![pillar],
            Confidence::new(0.9),
            pillar,
        )));
        repo.save(&q).await.unwrap();
    }

    #[tokio::test]
    async fn digest_reflects_the_weeks_questions() {
        let questions = Arc::new(InMemoryQuestionRepository::new());
        let weights = Arc::new(InMemoryWeightRepository::new());
        let handler = GenerateDigestHandler::new(
            questions.clone(),
            Arc::new(WeightUpdater::new(weights, DecayPolicy::default())),
            7,
        );

        seed(&questions, Pillar::Retention, "Why churn?").await;
        seed(&questions, Pillar::Retention, "Day-7 retention?").await;
        seed(&questions, Pillar::Monetization, "ARPU trend?").await;

        let report = handler.handle(&user()).await.unwrap();

        assert_eq!(report.total_questions, 3);
        assert_eq!(report.top_pillars[0].pillar, Pillar::Retention);
        assert!((report.top_pillars[0].share_percent - 66.7).abs() < 0.1);
        assert!(report.next_week_focus.len() <= 2);
    }

    #[tokio::test]
    async fn digest_for_quiet_user_is_empty() {
        let handler = GenerateDigestHandler::new(
            Arc::new(InMemoryQuestionRepository::new()),
            Arc::new(WeightUpdater::new(
                Arc::new(InMemoryWeightRepository::new()),
                DecayPolicy::default(),
            )),
            7,
        );

        let report = handler.handle(&user()).await.unwrap();
        assert_eq!(report.total_questions, 0);
        assert!(report.top_pillars.is_empty());
    }
}
