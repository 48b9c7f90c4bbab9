//! In-memory repository adapters.
//!
//! Back tests and single-process deployments. Rows live in maps behind
//! async RwLocks; clones in, clones out, so callers never observe a
//! half-written aggregate.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, Timestamp, UserId};
use crate::domain::pillar::WeightProfile;
use crate::domain::question::{AnalysisResult, Question};
use crate::ports::{QuestionRepository, WeightRepository};

/// In-memory question store: one row per question, one result row per
/// ready question.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<QuestionId, Question>>>,
    results: Arc<RwLock<HashMap<QuestionId, AnalysisResult>>>,
}

impl InMemoryQuestionRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored questions (test helper).
    pub async fn question_count(&self) -> usize {
        self.questions.read().await.len()
    }

    /// Clears all rows (test helper).
    pub async fn clear(&self) {
        self.questions.write().await.clear();
        self.results.write().await.clear();
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn save(&self, question: &Question) -> Result<(), DomainError> {
        let mut questions = self.questions.write().await;
        if questions.contains_key(question.id()) {
            return Err(DomainError::new(
                ErrorCode::StorageError,
                format!("question {} already exists", question.id()),
            ));
        }
        questions.insert(*question.id(), question.clone());
        Ok(())
    }

    async fn update(&self, question: &Question) -> Result<(), DomainError> {
        let mut questions = self.questions.write().await;
        if !questions.contains_key(question.id()) {
            return Err(DomainError::new(
                ErrorCode::QuestionNotFound,
                format!("question {} does not exist", question.id()),
            ));
        }
        questions.insert(*question.id(), question.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError> {
        Ok(self.questions.read().await.get(id).cloned())
    }

    async fn list_active_by_user(&self, user_id: &UserId) -> Result<Vec<Question>, DomainError> {
        let questions = self.questions.read().await;
        let mut active: Vec<Question> = questions
            .values()
            .filter(|q| q.user_id() == user_id && q.is_active())
            .cloned()
            .collect();
        active.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(active)
    }

    async fn list_in_window(
        &self,
        user_id: &UserId,
        from: &Timestamp,
        to: &Timestamp,
    ) -> Result<Vec<Question>, DomainError> {
        let questions = self.questions.read().await;
        let mut in_window: Vec<Question> = questions
            .values()
            .filter(|q| q.user_id() == user_id)
            .filter(|q| !q.created_at().is_before(from) && q.created_at().is_before(to))
            .cloned()
            .collect();
        in_window.sort_by(|a, b| a.created_at().cmp(b.created_at()));
        Ok(in_window)
    }

    async fn save_result(&self, result: &AnalysisResult) -> Result<(), DomainError> {
        self.results
            .write()
            .await
            .insert(result.question_id, result.clone());
        Ok(())
    }

    async fn find_result(&self, id: &QuestionId) -> Result<Option<AnalysisResult>, DomainError> {
        Ok(self.results.read().await.get(id).cloned())
    }
}

/// In-memory weight store: one row per user.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWeightRepository {
    profiles: Arc<RwLock<HashMap<UserId, WeightProfile>>>,
}

impl InMemoryWeightRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored profiles (test helper).
    pub async fn profile_count(&self) -> usize {
        self.profiles.read().await.len()
    }
}

#[async_trait]
impl WeightRepository for InMemoryWeightRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<WeightProfile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn save(&self, profile: &WeightProfile) -> Result<(), DomainError> {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }
}
