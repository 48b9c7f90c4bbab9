//! WeightRepository port - persistence for per-user weight profiles.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::pillar::WeightProfile;

/// Port for weight profile persistence. One row per user.
///
/// Callers serialize writes per user (the engine holds a per-user lock
/// across the read-modify-write), so implementations only need
/// last-write-wins semantics.
#[async_trait]
pub trait WeightRepository: Send + Sync {
    /// Finds a user's weight profile, if one has been created.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<WeightProfile>, DomainError>;

    /// Creates or replaces a user's weight profile.
    async fn save(&self, profile: &WeightProfile) -> Result<(), DomainError>;
}
