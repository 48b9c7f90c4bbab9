//! Shared decay-and-boost update against the weight store.
//!
//! Both lifecycle paths that learn from an intent (submission and
//! clarification completion) go through here, so the policy is applied
//! in exactly one place. Callers hold the per-user lock.

use std::sync::Arc;
use tracing::debug;

use crate::domain::foundation::{DomainError, Timestamp, UserId};
use crate::domain::intent::IntentClassification;
use crate::domain::pillar::{DecayPolicy, WeightProfile};
use crate::ports::WeightRepository;

/// Applies the configured decay policy to a user's stored profile.
pub struct WeightUpdater {
    repository: Arc<dyn WeightRepository>,
    policy: DecayPolicy,
}

impl WeightUpdater {
    pub fn new(repository: Arc<dyn WeightRepository>, policy: DecayPolicy) -> Self {
        Self { repository, policy }
    }

    /// Returns the configured policy.
    pub fn policy(&self) -> &DecayPolicy {
        &self.policy
    }

    /// Loads (or initializes) the user's profile, applies one
    /// decay-and-boost update for the intent, and persists the result.
    pub async fn apply(
        &self,
        user_id: &UserId,
        intent: &IntentClassification,
    ) -> Result<WeightProfile, DomainError> {
        let mut profile = self
            .repository
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| WeightProfile::initial(user_id.clone()));

        let elapsed_days = Timestamp::now().days_since(&profile.updated_at);
        let next = self.policy.apply(&profile.weights, intent, elapsed_days);
        profile.replace_weights(next);

        self.repository.save(&profile).await?;
        debug!(user = %user_id, primary = %intent.primary_pillar, "weight profile updated");
        Ok(profile)
    }

    /// Returns the user's current vector as a read-side view: the stored
    /// profile (or the default vector) with any lazily accrued decay
    /// applied.
    pub async fn current(
        &self,
        user_id: &UserId,
    ) -> Result<crate::domain::pillar::PillarWeights, DomainError> {
        let profile = self.repository.find_by_user(user_id).await?;
        Ok(match profile {
            Some(profile) => {
                let elapsed_days = Timestamp::now().days_since(&profile.updated_at);
                self.policy.observe(&profile.weights, elapsed_days)
            }
            None => crate::domain::pillar::PillarWeights::default_vector(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryWeightRepository;
    use crate::domain::intent::Confidence;
    use crate::domain::pillar::{DecaySchedule, Pillar};

    fn user() -> UserId {
        UserId::new("player-1").unwrap()
    }

    fn retention_intent() -> IntentClassification {
        IntentClassification::new(
            vec![Pillar::Retention],
            Confidence::MAX,
            Pillar::Retention,
        )
    }

    fn updater(repo: Arc<InMemoryWeightRepository>) -> WeightUpdater {
        WeightUpdater::new(repo, DecayPolicy::default())
    }

    #[tokio::test]
    async fn first_update_starts_from_default_vector() {
        let repo = Arc::new(InMemoryWeightRepository::new());
        let updater = updater(repo.clone());

        let profile = updater.apply(&user(), &retention_intent()).await.unwrap();

        assert!((profile.weights.get(Pillar::Retention).value() - 0.575).abs() < 1e-12);
        assert!((profile.weights.get(Pillar::Social).value() - 0.475).abs() < 1e-12);
        assert_eq!(repo.profile_count().await, 1);
    }

    #[tokio::test]
    async fn updates_compound_across_calls() {
        let repo = Arc::new(InMemoryWeightRepository::new());
        let updater = updater(repo.clone());

        updater.apply(&user(), &retention_intent()).await.unwrap();
        let second = updater.apply(&user(), &retention_intent()).await.unwrap();

        // 0.575 * 0.95 + 0.1
        let expected = 0.575 * 0.95 + 0.1;
        assert!((second.weights.get(Pillar::Retention).value() - expected).abs() < 1e-12);
    }

    #[tokio::test]
    async fn current_returns_default_vector_for_new_user() {
        let repo = Arc::new(InMemoryWeightRepository::new());
        let updater = updater(repo);

        let weights = updater.current(&user()).await.unwrap();
        for pillar in Pillar::ALL {
            assert_eq!(weights.get(pillar).value(), 0.5);
        }
    }

    #[tokio::test]
    async fn current_matches_stored_vector_under_per_event_schedule() {
        let repo = Arc::new(InMemoryWeightRepository::new());
        let updater = updater(repo.clone());

        let stored = updater.apply(&user(), &retention_intent()).await.unwrap();
        let seen = updater.current(&user()).await.unwrap();
        assert_eq!(seen, stored.weights);
    }

    #[tokio::test]
    async fn time_indexed_policy_fades_reads() {
        let repo = Arc::new(InMemoryWeightRepository::new());
        let policy = DecayPolicy {
            schedule: DecaySchedule::TimeIndexed,
            ..DecayPolicy::default()
        };
        let updater = WeightUpdater::new(repo.clone(), policy);

        // Store a profile stamped two days in the past.
        let mut profile = WeightProfile::initial(user());
        profile.updated_at = Timestamp::now().minus_days(2);
        repo.save(&profile).await.unwrap();

        let seen = updater.current(&user()).await.unwrap();
        let expected = 0.5 * 0.95_f64.powf(2.0);
        assert!((seen.get(Pillar::Retention).value() - expected).abs() < 1e-9);
    }
}
