//! Crate-level error type.
//!
//! Every service operation returns [`AppError`]. Client-fault variants carry a
//! human-readable message plus structured `details`; store failures other than
//! uniqueness violations pass through unchanged in [`AppError::Store`].

use crate::domain::repositories::StoreError;
use serde_json::Value;

static NO_DETAILS: Value = Value::Null;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The submitted URL or alias is malformed.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    /// The requested custom alias is already used as a short code.
    #[error("{message}")]
    AliasTaken { message: String, details: Value },

    /// Every salted generation attempt collided.
    #[error("{message}")]
    GenerationExhausted { message: String, details: Value },

    /// Unknown or expired short code, or unknown id.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }
    pub fn alias_taken(message: impl Into<String>, details: Value) -> Self {
        Self::AliasTaken {
            message: message.into(),
            details,
        }
    }
    pub fn generation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::GenerationExhausted {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::AliasTaken { .. } => "alias_taken",
            AppError::GenerationExhausted { .. } => "generation_exhausted",
            AppError::NotFound { .. } => "not_found",
            AppError::Store(_) => "store_error",
        }
    }

    /// Structured context, `Value::Null` for store errors.
    pub fn details(&self) -> &Value {
        match self {
            AppError::InvalidInput { details, .. }
            | AppError::AliasTaken { details, .. }
            | AppError::GenerationExhausted { details, .. }
            | AppError::NotFound { details, .. } => details,
            AppError::Store(_) => &NO_DETAILS,
        }
    }
}
