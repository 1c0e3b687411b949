//! Row-to-entity decoding for the mapped (structured) query path.
//!
//! The driver's typed getters are unusable here: handed a storage class
//! the mapped type cannot hold (a legacy TEXT hour column, a corrupt
//! key), `Row::get::<f64>` panics instead of returning an error. Mapped
//! `row_to_*` functions decode through these helpers instead: they read
//! the raw storage value and report a mismatch as a `Query` error whose
//! text the drift classifier recognizes, so a structured read over a
//! drifted store hands the request to the fallback chain rather than
//! aborting the task. The helpers also handle the dual date format issue
//! (our ISO `YYYY-MM-DD` writes vs legacy importers that stored full
//! datetimes).

use chrono::NaiveDate;
use roster_core::enums::CourseType;

use crate::error::DatabaseError;

const fn storage_class(value: &libsql::Value) -> &'static str {
    match value {
        libsql::Value::Null => "NULL",
        libsql::Value::Integer(_) => "INTEGER",
        libsql::Value::Real(_) => "REAL",
        libsql::Value::Text(_) => "TEXT",
        libsql::Value::Blob(_) => "BLOB",
    }
}

// The "invalid column type" phrasing is what drift::classify keys on.
fn type_mismatch(column: &str, expected: &str, value: &libsql::Value) -> DatabaseError {
    DatabaseError::Query(format!(
        "invalid column type for {column}: expected {expected}, found {}",
        storage_class(value)
    ))
}

/// Decode a required INTEGER column.
///
/// # Errors
///
/// Returns a classifiable `DatabaseError::Query` for any other storage
/// class, or `DatabaseError::Driver` if the column cannot be read.
pub fn get_integer(row: &libsql::Row, idx: i32, column: &str) -> Result<i64, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Integer(i) => Ok(i),
        other => Err(type_mismatch(column, "INTEGER", &other)),
    }
}

/// Decode a nullable INTEGER column.
///
/// # Errors
///
/// Returns a classifiable `DatabaseError::Query` for any storage class
/// other than NULL or INTEGER.
pub fn get_optional_integer(
    row: &libsql::Row,
    idx: i32,
    column: &str,
) -> Result<Option<i64>, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Null => Ok(None),
        libsql::Value::Integer(i) => Ok(Some(i)),
        other => Err(type_mismatch(column, "INTEGER", &other)),
    }
}

/// Decode a required REAL column. INTEGER widens — `SQLite` may hand a
/// fraction-free REAL back as INTEGER.
///
/// # Errors
///
/// Returns a classifiable `DatabaseError::Query` for any other storage
/// class.
#[allow(clippy::cast_precision_loss)]
pub fn get_number(row: &libsql::Row, idx: i32, column: &str) -> Result<f64, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Real(r) => Ok(r),
        libsql::Value::Integer(i) => Ok(i as f64),
        other => Err(type_mismatch(column, "REAL", &other)),
    }
}

/// Decode a nullable REAL column, with the same widening as [`get_number`].
///
/// # Errors
///
/// Returns a classifiable `DatabaseError::Query` for any storage class
/// other than NULL, REAL, or INTEGER.
#[allow(clippy::cast_precision_loss)]
pub fn get_optional_number(
    row: &libsql::Row,
    idx: i32,
    column: &str,
) -> Result<Option<f64>, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Null => Ok(None),
        libsql::Value::Real(r) => Ok(Some(r)),
        libsql::Value::Integer(i) => Ok(Some(i as f64)),
        other => Err(type_mismatch(column, "REAL", &other)),
    }
}

/// Decode a required TEXT column.
///
/// # Errors
///
/// Returns a classifiable `DatabaseError::Query` for any other storage
/// class.
pub fn get_text(row: &libsql::Row, idx: i32, column: &str) -> Result<String, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Text(s) => Ok(s),
        other => Err(type_mismatch(column, "TEXT", &other)),
    }
}

/// Decode a nullable TEXT column. Returns `None` for both SQL NULL and
/// empty string.
///
/// # Errors
///
/// Returns a classifiable `DatabaseError::Query` for any storage class
/// other than NULL or TEXT.
pub fn get_opt_string(
    row: &libsql::Row,
    idx: i32,
    column: &str,
) -> Result<Option<String>, DatabaseError> {
    match row.get_value(idx)? {
        libsql::Value::Null => Ok(None),
        libsql::Value::Text(s) if s.is_empty() => Ok(None),
        libsql::Value::Text(s) => Ok(Some(s)),
        other => Err(type_mismatch(column, "TEXT", &other)),
    }
}

/// Parse a required TEXT column as `NaiveDate`.
///
/// Handles both plain ISO dates (`"2025-08-25"`) and legacy datetime text
/// (`"2025-08-25 00:00:00"`).
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string cannot be parsed as either format.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(date);
    }
    chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map(|dt| dt.date())
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// Parse a TEXT column as `CourseType`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not a known course type.
pub fn parse_course_type(s: &str) -> Result<CourseType, DatabaseError> {
    CourseType::parse(s)
        .ok_or_else(|| DatabaseError::Query(format!("Unknown course type '{s}'")))
}
