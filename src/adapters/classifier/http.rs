//! HTTP client for the external classifier/setup service.
//!
//! Single-attempt calls with a configured timeout; wrap in
//! [`RetryingClassifier`](super::RetryingClassifier) for the
//! backoff-retry discipline.

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::{ClarificationSetup, IntentClassifier, RawClassification, SetupOutcome};

/// Configuration for the classifier service client.
#[derive(Debug, Clone)]
pub struct ClassifierServiceConfig {
    /// API key for authentication.
    api_key: Secret<String>,
    /// Base URL for the service.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl ClassifierServiceConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: "http://localhost:8089".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

#[derive(Debug, Serialize)]
struct ClassifyRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct SuggestRequest<'a> {
    text: &'a str,
    question: &'a str,
}

#[derive(Debug, Deserialize)]
struct SuggestResponse {
    answer: String,
}

/// HTTP implementation of the classifier and setup ports.
pub struct HttpClassifierService {
    config: ClassifierServiceConfig,
    client: Client,
}

impl HttpClassifierService {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// - `InternalError` if the HTTP client cannot be constructed
    pub fn new(config: ClassifierServiceConfig) -> Result<Self, DomainError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                DomainError::new(
                    ErrorCode::InternalError,
                    format!("failed to build HTTP client: {}", e),
                )
            })?;

        Ok(Self { config, client })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    async fn post_json<B: Serialize>(&self, path: &str, body: &B) -> Result<Response, DomainError> {
        let response = self
            .client
            .post(self.url(path))
            .bearer_auth(self.config.api_key())
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::new(
                        ErrorCode::ClassificationUnavailable,
                        format!(
                            "classifier timed out after {}s",
                            self.config.timeout.as_secs()
                        ),
                    )
                } else if e.is_connect() {
                    DomainError::new(
                        ErrorCode::ClassificationUnavailable,
                        format!("classifier connection failed: {}", e),
                    )
                } else {
                    DomainError::new(
                        ErrorCode::ClassificationUnavailable,
                        format!("classifier request failed: {}", e),
                    )
                }
            })?;

        Self::check_status(response).await
    }

    /// Maps HTTP status codes onto the error taxonomy: server-side and
    /// throttling failures are transient, anything else is a caller bug.
    async fn check_status(response: Response) -> Result<Response, DomainError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
            Err(DomainError::new(
                ErrorCode::ClassificationUnavailable,
                format!("classifier unavailable ({}): {}", status, body),
            ))
        } else {
            Err(DomainError::new(
                ErrorCode::InternalError,
                format!("classifier rejected request ({}): {}", status, body),
            )
            .with_detail("status", status.as_str().to_string()))
        }
    }

    async fn decode<T: for<'de> Deserialize<'de>>(response: Response) -> Result<T, DomainError> {
        response.json().await.map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("failed to parse classifier response: {}", e),
            )
        })
    }
}

#[async_trait]
impl IntentClassifier for HttpClassifierService {
    async fn classify(&self, text: &str) -> Result<RawClassification, DomainError> {
        let response = self
            .post_json("/v1/classify", &ClassifyRequest { text })
            .await?;
        Self::decode(response).await
    }
}

#[async_trait]
impl ClarificationSetup for HttpClassifierService {
    async fn generate_setup(&self, text: &str) -> Result<SetupOutcome, DomainError> {
        let response = self
            .post_json("/v1/setup", &ClassifyRequest { text })
            .await?;
        Self::decode(response).await
    }

    async fn generate_suggested_answer(
        &self,
        question_text: &str,
        clarifying_question: &str,
    ) -> Result<String, DomainError> {
        let response = self
            .post_json(
                "/v1/suggest",
                &SuggestRequest {
                    text: question_text,
                    question: clarifying_question,
                },
            )
            .await?;
        let suggestion: SuggestResponse = Self::decode(response).await?;
        Ok(suggestion.answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder_sets_fields() {
        let config = ClassifierServiceConfig::new("key-123")
            .with_base_url("https://intent.example.com")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.base_url, "https://intent.example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.api_key(), "key-123");
    }

    #[test]
    fn client_builds_from_config() {
        let service = HttpClassifierService::new(ClassifierServiceConfig::new("key"));
        assert!(service.is_ok());
    }

    #[test]
    fn url_joins_base_and_path() {
        let service =
            HttpClassifierService::new(ClassifierServiceConfig::new("key")).unwrap();
        assert_eq!(service.url("/v1/classify"), "http://localhost:8089/v1/classify");
    }
}
