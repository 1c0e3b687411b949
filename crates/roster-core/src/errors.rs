//! Cross-cutting error types for Roster.
//!
//! Domain-specific errors (e.g., `DatabaseError`) live in their respective
//! crates. This module holds only what every crate agrees on: validation
//! failures, which are raised before any persistence is attempted and are
//! always surfaced to the caller.

use thiserror::Error;

/// A value rejected by synchronous validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required text field is empty after trimming.
    #[error("{field} must not be empty")]
    Empty { field: &'static str },

    /// A numeric field holds a negative value.
    #[error("{field} must not be negative (got {value})")]
    Negative { field: &'static str, value: f64 },

    /// A date range ends on or before it starts.
    #[error("{field}: end date {end} is not after start date {start}")]
    DateOrder {
        field: &'static str,
        start: String,
        end: String,
    },

    /// A field failed a format or range constraint.
    #[error("{field} is invalid: {reason}")]
    Invalid {
        field: &'static str,
        reason: String,
    },
}
