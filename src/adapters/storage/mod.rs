//! Storage adapters.

mod in_memory;

pub use in_memory::{InMemoryQuestionRepository, InMemoryWeightRepository};
