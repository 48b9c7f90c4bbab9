//! QuestionRepository port - persistence for question records and their
//! analysis results.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, QuestionId, Timestamp, UserId};
use crate::domain::question::{AnalysisResult, Question};

/// Port for question persistence.
///
/// The logical shape is one row per question plus one analysis-result
/// row keyed 1:1 to a ready question; the storage mechanics behind that
/// are the adapter's business.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Persists a newly submitted question.
    async fn save(&self, question: &Question) -> Result<(), DomainError>;

    /// Persists a mutated question.
    async fn update(&self, question: &Question) -> Result<(), DomainError>;

    /// Finds a question by id, cancelled ones included (they are soft
    /// deleted, not gone).
    async fn find_by_id(&self, id: &QuestionId) -> Result<Option<Question>, DomainError>;

    /// Lists a user's questions excluding cancelled ones, newest first.
    async fn list_active_by_user(&self, user_id: &UserId) -> Result<Vec<Question>, DomainError>;

    /// Lists a user's questions created within `[from, to)`, cancelled
    /// ones included; the digest aggregator applies its own filters.
    async fn list_in_window(
        &self,
        user_id: &UserId,
        from: &Timestamp,
        to: &Timestamp,
    ) -> Result<Vec<Question>, DomainError>;

    /// Persists the analysis result row for a ready question.
    async fn save_result(&self, result: &AnalysisResult) -> Result<(), DomainError>;

    /// Finds the analysis result for a question, if computed.
    async fn find_result(&self, id: &QuestionId) -> Result<Option<AnalysisResult>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Compile-time check that the trait is object-safe.
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn QuestionRepository) {}
}
