//! Classifier adapters.
//!
//! `HttpClassifierService` talks to the external classifier/setup
//! service; `RetryingClassifier` adds the backoff-retry discipline;
//! the scripted doubles back tests and local development.

mod http;
mod retry;
mod scripted;

pub use http::{ClassifierServiceConfig, HttpClassifierService};
pub use retry::RetryingClassifier;
pub use scripted::{ScriptedClassifier, ScriptedSetup};
