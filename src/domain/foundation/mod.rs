//! Foundation value objects shared across the domain.

mod errors;
mod events;
mod ids;
mod state_machine;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::{QuestionId, UserId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
