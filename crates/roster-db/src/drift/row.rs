//! Column-presence-safe row reading.
//!
//! Raw fallback tiers cannot trust positional decoding: the column set of a
//! drifted store is exactly what's in question. Materializers read by name
//! through these helpers instead. A required column that is absent or
//! uncoercible makes the row a fault (the caller skips it); an optional one
//! leaves its field unset.

use crate::drift::coerce::{coerce_integer, coerce_number};

/// Index of a named column in the row, case-insensitive. `None` when absent.
#[must_use]
pub fn column_index(row: &libsql::Row, name: &str) -> Option<i32> {
    (0..row.column_count())
        .find(|&idx| row.column_name(idx).is_some_and(|col| col.eq_ignore_ascii_case(name)))
}

/// Whether the row carries a column with this name. Never errors.
#[must_use]
pub fn has_column(row: &libsql::Row, name: &str) -> bool {
    column_index(row, name).is_some()
}

/// Raw storage value of a named column, if the column exists and is readable.
#[must_use]
pub fn value_by_name(row: &libsql::Row, name: &str) -> Option<libsql::Value> {
    let idx = column_index(row, name)?;
    row.get_value(idx).ok()
}

/// Named column coerced to `i64` (see [`coerce_integer`]).
#[must_use]
pub fn integer_by_name(row: &libsql::Row, name: &str) -> Option<i64> {
    coerce_integer(&value_by_name(row, name)?)
}

/// Named column coerced to `f64` (see [`coerce_number`]).
#[must_use]
pub fn number_by_name(row: &libsql::Row, name: &str) -> Option<f64> {
    coerce_number(&value_by_name(row, name)?)
}

/// Named TEXT column, trimmed. `None` when absent, non-text, or blank —
/// text here means stored text, not a rendering of a numeric column.
#[must_use]
pub fn text_by_name(row: &libsql::Row, name: &str) -> Option<String> {
    match value_by_name(row, name)? {
        libsql::Value::Text(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    async fn test_conn() -> (libsql::Database, libsql::Connection) {
        let db = libsql::Builder::new_local(":memory:").build().await.unwrap();
        let conn = db.connect().unwrap();
        (db, conn)
    }

    #[tokio::test]
    async fn has_column_is_case_insensitive_and_never_errors() {
        let (_db, conn) = test_conn().await;
        let mut rows = conn
            .query("SELECT 1 AS id, 'Fall' AS Name", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();

        assert!(has_column(&row, "id"));
        assert!(has_column(&row, "ID"));
        assert!(has_column(&row, "name"));
        assert!(has_column(&row, "NAME"));
        assert!(!has_column(&row, "term_id"));
        assert!(!has_column(&row, ""));
    }

    #[tokio::test]
    async fn reads_by_name_with_coercion() {
        let (_db, conn) = test_conn().await;
        let mut rows = conn
            .query("SELECT 7 AS id, '3' AS hours, '  Fall  ' AS term_name", ())
            .await
            .unwrap();
        let row = rows.next().await.unwrap().unwrap();

        assert_eq!(integer_by_name(&row, "id"), Some(7));
        assert_eq!(number_by_name(&row, "hours"), Some(3.0));
        assert_eq!(text_by_name(&row, "term_name"), Some("Fall".to_string()));
    }

    #[tokio::test]
    async fn absent_column_reads_as_none() {
        let (_db, conn) = test_conn().await;
        let mut rows = conn.query("SELECT 7 AS id", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();

        assert_eq!(value_by_name(&row, "hours"), None);
        assert_eq!(integer_by_name(&row, "hours"), None);
        assert_eq!(text_by_name(&row, "hours"), None);
    }

    #[tokio::test]
    async fn numeric_column_is_not_text() {
        let (_db, conn) = test_conn().await;
        let mut rows = conn.query("SELECT 2025 AS name", ()).await.unwrap();
        let row = rows.next().await.unwrap().unwrap();

        assert_eq!(text_by_name(&row, "name"), None);
        assert_eq!(integer_by_name(&row, "name"), Some(2025));
    }
}
