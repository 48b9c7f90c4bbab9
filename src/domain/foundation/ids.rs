//! Strongly-typed identifier value objects.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use super::ValidationError;

/// Unique identifier for a submitted question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(Uuid);

impl QuestionId {
    /// Creates a new random QuestionId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a QuestionId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QuestionId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Maximum length for a user identifier.
const MAX_USER_ID_LENGTH: usize = 255;

/// Identifier for a user, as issued by the surrounding identity layer.
///
/// Stored as an opaque non-empty string rather than a UUID because the
/// identity provider controls the format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a UserId after validating the raw value.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the value is empty or whitespace
    /// - `InvalidFormat` if the value exceeds the maximum length
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        if value.len() > MAX_USER_ID_LENGTH {
            return Err(ValidationError::invalid_format(
                "user_id",
                format!("exceeds maximum length of {}", MAX_USER_ID_LENGTH),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn question_id_new_generates_unique_ids() {
        let id1 = QuestionId::new();
        let id2 = QuestionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn question_id_roundtrips_through_string() {
        let id = QuestionId::new();
        let parsed: QuestionId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn question_id_serializes_transparently() {
        let id = QuestionId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
    }

    #[test]
    fn user_id_accepts_valid_values() {
        let id = UserId::new("player-42").unwrap();
        assert_eq!(id.as_str(), "player-42");
    }

    #[test]
    fn user_id_rejects_empty_string() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_rejects_overlong_value() {
        let long = "x".repeat(MAX_USER_ID_LENGTH + 1);
        assert!(UserId::new(long).is_err());
    }
}
