//! Schema drift error classification.
//!
//! Distinguishes "the store's schema doesn't match the mapped one" from
//! every other failure. Only classified errors may engage the fallback
//! chain; everything else must surface to the caller unchanged, so the
//! indicator set is deliberately narrow. A false negative surfaces as an
//! ordinary error (correct); a false positive would silently swallow a
//! real fault (must be avoided).

use std::error::Error;

use crate::error::DatabaseError;

/// Substrings that identify a schema mismatch in a driver error message.
///
/// `SQLite` phrases missing schema objects as `no such column` /
/// `no such table` / `has no column named`; other dialects say
/// `invalid column name` or `does not exist`. `invalid column type` is
/// what the mapped-row decoders in [`crate::helpers`] report when a
/// stored value's storage class does not match the mapped type (a legacy
/// TEXT hour column); the driver uses the same phrase for its own decode
/// failures. `term_id` is the known transitional column whose location
/// moves between generations.
const DRIFT_INDICATORS: &[&str] = &[
    "no such column",
    "no such table",
    "has no column named",
    "invalid column name",
    "invalid column type",
    "does not exist",
    "term_id",
];

/// Decide whether an error (or any of its causes) reports schema drift.
///
/// Matches case-insensitively against the display text of the error and,
/// recursively, every `source()` in its chain.
#[must_use]
pub fn is_schema_drift(err: &(dyn Error + 'static)) -> bool {
    let msg = err.to_string().to_ascii_lowercase();
    if DRIFT_INDICATORS.iter().any(|needle| msg.contains(needle)) {
        return true;
    }
    err.source().is_some_and(is_schema_drift)
}

/// [`is_schema_drift`] over the crate's own error type.
#[must_use]
pub fn is_drift_error(err: &DatabaseError) -> bool {
    is_schema_drift(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_missing_table() {
        let err = libsql::Error::SqliteFailure(1, "no such table: terms".into());
        assert!(is_schema_drift(&err));
    }

    #[test]
    fn classifies_missing_column_case_insensitive() {
        let err = libsql::Error::SqliteFailure(1, "No Such Column: c.term_id".into());
        assert!(is_schema_drift(&err));
    }

    #[test]
    fn classifies_decode_mismatch() {
        assert!(is_schema_drift(&libsql::Error::InvalidColumnType));
    }

    #[test]
    fn classifies_storage_class_mismatch_from_mapped_reads() {
        let err = DatabaseError::Query(
            "invalid column type for hours: expected REAL, found TEXT".into(),
        );
        assert!(is_drift_error(&err));
    }

    #[test]
    fn classifies_transitional_column_mention() {
        let err = libsql::Error::SqliteFailure(1, "table workloads has no column named term_id".into());
        assert!(is_schema_drift(&err));
    }

    #[test]
    fn classifies_wrapped_cause() {
        // Wrapper whose display hides the cause: only the source() walk
        // can find the indicator.
        #[derive(Debug, thiserror::Error)]
        #[error("course read failed")]
        struct Wrapper(#[source] libsql::Error);

        let inner = libsql::Error::SqliteFailure(1, "no such column: hours".into());
        assert!(is_schema_drift(&Wrapper(inner)));
    }

    #[test]
    fn ignores_unrelated_failures() {
        let err = libsql::Error::ConnectionFailed("connection refused".into());
        assert!(!is_schema_drift(&err));

        let err = libsql::Error::SqliteFailure(1, "database is locked".into());
        assert!(!is_schema_drift(&err));

        let err = DatabaseError::Query("Failed to parse date 'garbage'".into());
        assert!(!is_drift_error(&err));
    }

    #[test]
    fn ignores_constraint_failures() {
        let err = libsql::Error::SqliteFailure(787, "FOREIGN KEY constraint failed".into());
        assert!(!is_schema_drift(&err));
    }
}
