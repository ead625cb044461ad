//! Error types for conformance validation and JSON-LD rendering.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{Action, EventType};
use crate::util::DurationParseError;

/// Conformance error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// C001: Kind-fixed type tag does not match
    TypeMismatch,
    /// C002: Required attribute absent or blank
    MissingRequiredField,
    /// C003: Action outside the event kind's vocabulary
    ActionNotSupported,
    /// C004: Duration is not an ISO 8601 period
    InvalidDurationFormat,
    /// C005: Start time does not precede end time
    TimeOrderingViolation,
    /// C006: Too many values for a single-valued attribute
    CardinalityExceeded,
}

impl ErrorCode {
    /// Returns the error code string (e.g., "C001").
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::TypeMismatch => "C001",
            ErrorCode::MissingRequiredField => "C002",
            ErrorCode::ActionNotSupported => "C003",
            ErrorCode::InvalidDurationFormat => "C004",
            ErrorCode::TimeOrderingViolation => "C005",
            ErrorCode::CardinalityExceeded => "C006",
        }
    }
}

/// A conformance rule violated while building an entity or event.
///
/// Every variant is raised synchronously by `build()`. The first violation
/// aborts construction; nothing partially built is returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConformanceError {
    #[error("[C001] {field} type mismatch: expected {expected}, found {actual}")]
    TypeMismatch {
        field: &'static str,
        expected: String,
        actual: String,
    },

    #[error("[C002] required field {field} is missing or blank")]
    MissingRequiredField { field: &'static str },

    #[error("[C003] action {action} is not supported by {event_type}")]
    ActionNotSupported {
        action: Action,
        event_type: EventType,
    },

    #[error(
        "[C004] duration {duration:?} does not conform to ISO 8601 format P[n]Y[n]M[n]DT[n]H[n]M[n]S or P[n]W: {reason}"
    )]
    InvalidDurationFormat {
        duration: String,
        reason: DurationParseError,
    },

    #[error("[C005] start time {start} must precede end time {end}")]
    TimeOrderingViolation {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("[C006] {field} holds {actual} values (max {max})")]
    CardinalityExceeded {
        field: &'static str,
        max: usize,
        actual: usize,
    },
}

impl ConformanceError {
    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            ConformanceError::TypeMismatch { .. } => ErrorCode::TypeMismatch,
            ConformanceError::MissingRequiredField { .. } => ErrorCode::MissingRequiredField,
            ConformanceError::ActionNotSupported { .. } => ErrorCode::ActionNotSupported,
            ConformanceError::InvalidDurationFormat { .. } => ErrorCode::InvalidDurationFormat,
            ConformanceError::TimeOrderingViolation { .. } => ErrorCode::TimeOrderingViolation,
            ConformanceError::CardinalityExceeded { .. } => ErrorCode::CardinalityExceeded,
        }
    }

    pub(crate) fn missing(field: &'static str) -> Self {
        ConformanceError::MissingRequiredField { field }
    }
}

/// Error while rendering a built value to JSON text.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("JSON rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}
