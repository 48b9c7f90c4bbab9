//! Domain events emitted by the question lifecycle.
//!
//! Events are committed-state notifications: the repository writes land
//! first, then these go out to subscribers best-effort.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EventId, QuestionId, Timestamp, UserId};
use crate::domain::intent::IntentClassification;
use crate::domain::pillar::PillarWeights;
use crate::domain_event;

use super::{QuestionSource, QuestionStatus};

/// A question was submitted and persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionSubmitted {
    pub event_id: EventId,
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub text: String,
    pub source: QuestionSource,
    pub status: QuestionStatus,
    pub occurred_at: Timestamp,
}

domain_event!(
    QuestionSubmitted,
    event_type = "question.submitted.v1",
    aggregate_id = question_id,
    aggregate_type = "Question",
    occurred_at = occurred_at,
    event_id = event_id
);

/// All clarifying answers were collected and the question re-entered the
/// analysis queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionClarified {
    pub event_id: EventId,
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub occurred_at: Timestamp,
}

domain_event!(
    QuestionClarified,
    event_type = "question.clarified.v1",
    aggregate_id = question_id,
    aggregate_type = "Question",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A computed result was attached; the question is ready.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCompleted {
    pub event_id: EventId,
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub occurred_at: Timestamp,
}

domain_event!(
    QuestionCompleted,
    event_type = "question.completed.v1",
    aggregate_id = question_id,
    aggregate_type = "Question",
    occurred_at = occurred_at,
    event_id = event_id
);

/// The question was cancelled by its owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCancelled {
    pub event_id: EventId,
    pub question_id: QuestionId,
    pub user_id: UserId,
    pub occurred_at: Timestamp,
}

domain_event!(
    QuestionCancelled,
    event_type = "question.cancelled.v1",
    aggregate_id = question_id,
    aggregate_type = "Question",
    occurred_at = occurred_at,
    event_id = event_id
);

/// A lifecycle transition committed a new weight vector.
///
/// Carries the full new vector and the triggering intent so live
/// dashboards can render without a read-back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightsUpdated {
    pub event_id: EventId,
    pub user_id: UserId,
    pub question_id: QuestionId,
    pub weights: PillarWeights,
    pub intent: IntentClassification,
    pub occurred_at: Timestamp,
}

domain_event!(
    WeightsUpdated,
    event_type = "weights.updated.v1",
    aggregate_id = user_id,
    aggregate_type = "WeightProfile",
    occurred_at = occurred_at,
    event_id = event_id
);
