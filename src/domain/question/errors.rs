//! Question-specific error types.

use crate::domain::foundation::{DomainError, ErrorCode, QuestionId, ValidationError};

use super::QuestionStatus;

/// Errors surfaced by question lifecycle operations.
///
/// All variants are recoverable at the API boundary and carry enough
/// context (current state, offending field) for the caller to decide.
#[derive(Debug, Clone, PartialEq)]
pub enum QuestionError {
    /// Question was not found.
    NotFound(QuestionId),
    /// Caller does not own the question.
    Forbidden,
    /// The attempted lifecycle move is not legal from the current state.
    InvalidTransition {
        current: QuestionStatus,
        operation: String,
    },
    /// Clarification finalize attempted before all slots were filled.
    IncompleteAnswers { missing: Vec<String> },
    /// Validation failed.
    ValidationFailed { field: String, message: String },
    /// Infrastructure error (storage, event bus).
    Infrastructure(String),
}

impl QuestionError {
    pub fn not_found(id: QuestionId) -> Self {
        QuestionError::NotFound(id)
    }

    pub fn forbidden() -> Self {
        QuestionError::Forbidden
    }

    pub fn invalid_transition(current: QuestionStatus, operation: impl Into<String>) -> Self {
        QuestionError::InvalidTransition {
            current,
            operation: operation.into(),
        }
    }

    pub fn incomplete_answers(missing: Vec<String>) -> Self {
        QuestionError::IncompleteAnswers { missing }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        QuestionError::ValidationFailed {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        QuestionError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            QuestionError::NotFound(_) => ErrorCode::QuestionNotFound,
            QuestionError::Forbidden => ErrorCode::Forbidden,
            QuestionError::InvalidTransition { .. } => ErrorCode::InvalidTransition,
            QuestionError::IncompleteAnswers { .. } => ErrorCode::IncompleteAnswers,
            QuestionError::ValidationFailed { .. } => ErrorCode::ValidationFailed,
            QuestionError::Infrastructure(_) => ErrorCode::StorageError,
        }
    }

    pub fn message(&self) -> String {
        match self {
            QuestionError::NotFound(id) => format!("Question not found: {}", id),
            QuestionError::Forbidden => "Permission denied".to_string(),
            QuestionError::InvalidTransition { current, operation } => {
                format!("Operation '{}' is not legal from status '{}'", operation, current)
            }
            QuestionError::IncompleteAnswers { missing } => format!(
                "Clarification incomplete; unanswered: {}",
                missing.join("; ")
            ),
            QuestionError::ValidationFailed { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            QuestionError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for QuestionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for QuestionError {}

impl From<ValidationError> for QuestionError {
    fn from(err: ValidationError) -> Self {
        let field = match &err {
            ValidationError::EmptyField { field } => field.clone(),
            ValidationError::OutOfRange { field, .. } => field.clone(),
            ValidationError::InvalidFormat { field, .. } => field.clone(),
        };
        QuestionError::ValidationFailed {
            field,
            message: err.to_string(),
        }
    }
}

impl From<DomainError> for QuestionError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::QuestionNotFound | ErrorCode::UserNotFound => QuestionError::Forbidden,
            ErrorCode::Forbidden => QuestionError::Forbidden,
            ErrorCode::ValidationFailed
            | ErrorCode::EmptyField
            | ErrorCode::OutOfRange
            | ErrorCode::InvalidFormat
            | ErrorCode::UnknownPillar => QuestionError::ValidationFailed {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.to_string(),
            },
            _ => QuestionError::Infrastructure(err.to_string()),
        }
    }
}
