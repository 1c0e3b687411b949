//! Database error types for roster-db.

use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Input rejected before any persistence attempt.
    #[error(transparent)]
    Validation(#[from] roster_core::errors::ValidationError),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A SQL query failed or returned data in an unusable shape.
    #[error("Query failed: {0}")]
    Query(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    Driver(#[from] libsql::Error),
}

/// Detect constraint violations reported by the store.
///
/// `SQLite` phrases these as `FOREIGN KEY constraint failed`,
/// `UNIQUE constraint failed: <col>`, and so on; other dialects say
/// "constraint violation". Delete operations use this to report an
/// ordinary referential conflict as `false` instead of an error.
///
/// The predicate is intentionally narrow so that genuine faults are
/// never downgraded to a boolean.
#[must_use]
pub fn is_constraint_violation(e: &libsql::Error) -> bool {
    let msg = e.to_string().to_ascii_lowercase();
    msg.contains("constraint failed") || msg.contains("constraint violation")
}
