//! Backoff-retry wrapper for intent classification.
//!
//! Classification is idempotent, so transient failures are safe to
//! retry. The wrapper retries only errors the taxonomy marks transient;
//! a malformed payload comes back immediately.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

use crate::domain::foundation::DomainError;
use crate::ports::{IntentClassifier, RawClassification};

/// Wraps any classifier with exponential-backoff retries.
pub struct RetryingClassifier {
    inner: Arc<dyn IntentClassifier>,
    max_retries: u32,
    backoff_base: Duration,
}

impl RetryingClassifier {
    /// Creates a wrapper performing up to `max_retries` retries after the
    /// first attempt, backing off 1x, 2x, 4x... the base delay.
    pub fn new(inner: Arc<dyn IntentClassifier>, max_retries: u32) -> Self {
        Self {
            inner,
            max_retries,
            backoff_base: Duration::from_secs(1),
        }
    }

    /// Overrides the backoff base delay (tests use milliseconds).
    pub fn with_backoff_base(mut self, base: Duration) -> Self {
        self.backoff_base = base;
        self
    }
}

#[async_trait]
impl IntentClassifier for RetryingClassifier {
    async fn classify(&self, text: &str) -> Result<RawClassification, DomainError> {
        let mut attempt = 0;
        loop {
            match self.inner.classify(text).await {
                Ok(raw) => return Ok(raw),
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = self.backoff_base * (1 << attempt);
                    warn!(
                        error = %err,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "classification failed, retrying"
                    );
                    sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
