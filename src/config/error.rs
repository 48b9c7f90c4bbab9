//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid classifier base URL")]
    InvalidBaseUrl,

    #[error("Decay factor must be in (0, 1]")]
    InvalidDecayFactor,

    #[error("Boost factor must be in [0, 1]")]
    InvalidBoostFactor,

    #[error("Digest window must be at least one day")]
    InvalidDigestWindow,
}
