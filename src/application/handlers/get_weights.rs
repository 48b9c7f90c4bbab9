//! GetWeightsHandler - read-side view of a user's relevance vector.

use std::sync::Arc;

use crate::application::WeightUpdater;
use crate::domain::foundation::{DomainError, UserId};
use crate::domain::pillar::PillarWeights;

/// Handler returning a user's current weights.
///
/// New users see the default vector; under a time-indexed decay policy
/// the stored vector is faded by the days since its last write.
pub struct GetWeightsHandler {
    weight_updater: Arc<WeightUpdater>,
}

impl GetWeightsHandler {
    pub fn new(weight_updater: Arc<WeightUpdater>) -> Self {
        Self { weight_updater }
    }

    pub async fn handle(&self, user_id: &UserId) -> Result<PillarWeights, DomainError> {
        self.weight_updater.current(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::InMemoryWeightRepository;
    use crate::domain::intent::{Confidence, IntentClassification};
    use crate::domain::pillar::{DecayPolicy, Pillar};

    fn user() -> UserId {
        UserId::new("player-1").unwrap()
    }

    #[tokio::test]
    async fn new_user_sees_default_vector() {
        let updater = Arc::new(WeightUpdater::new(
            Arc::new(InMemoryWeightRepository::new()),
            DecayPolicy::default(),
        ));
        let handler = GetWeightsHandler::new(updater);

        let weights = handler.handle(&user()).await.unwrap();
        for pillar in Pillar::ALL {
            assert_eq!(weights.get(pillar).value(), 0.5);
        }
    }

    #[tokio::test]
    async fn reflects_committed_updates() {
        let updater = Arc::new(WeightUpdater::new(
            Arc::new(InMemoryWeightRepository::new()),
            DecayPolicy::default(),
        ));
        let handler = GetWeightsHandler::new(updater.clone());

        let intent = IntentClassification::new(
            vec![Pillar::Monetization],
            Confidence::MAX,
            Pillar::Monetization,
        );
        updater.apply(&user(), &intent).await.unwrap();

        let weights = handler.handle(&user()).await.unwrap();
        assert!((weights.get(Pillar::Monetization).value() - 0.575).abs() < 1e-12);
    }
}
