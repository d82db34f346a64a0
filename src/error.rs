//! Custom error types for marc-audit
//!
//! This module defines the error hierarchy for the crate using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for marc-audit operations
#[derive(Error, Debug)]
pub enum AuditError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for inbound events
    #[error("Validation error: {0}")]
    Validation(String),

    /// Event type outside CREATED/UPDATED/DELETED
    #[error("Unsupported event type: {0}")]
    UnsupportedEventType(String),

    /// The event branch needs a record side the payload doesn't carry
    #[error("{event_type} event has no '{side}' record")]
    MissingRecord {
        event_type: String,
        side: &'static str,
    },
}

impl AuditError {
    /// Check if this error is a validation-class failure of the event itself
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Validation(_) | Self::UnsupportedEventType(_) | Self::MissingRecord { .. }
        )
    }

    /// Check if retrying the same input could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<std::io::Error> for AuditError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AuditError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for marc-audit operations
pub type AuditResult<T> = Result<T, AuditError>;
