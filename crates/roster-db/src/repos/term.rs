//! Term repository.
//!
//! Full `Term` entities (with dates) exist only in stores that have the
//! current `terms` table; the legacy singular spelling carries names
//! only. [`RosterService::term_name_map`] is the read surface that works
//! on every generation, and is what course reads use to attach names.

use std::collections::HashMap;

use chrono::NaiveDate;
use roster_core::entities::Term;
use roster_core::validate::{require_date_order, require_name};

use crate::RosterDb;
use crate::drift::classify::is_drift_error;
use crate::drift::row::{integer_by_name, text_by_name};
use crate::drift::tiers::{QueryTier, run_chain};
use crate::error::{DatabaseError, is_constraint_violation};
use crate::helpers::{get_integer, get_text, parse_date};
use crate::service::RosterService;

const TERM_COLS: &str = "id, name, start_date, end_date";

const TERM_LIST_TIERS: &[QueryTier] = &[QueryTier {
    name: "terms",
    sql: "SELECT id, name, start_date, end_date FROM terms ORDER BY start_date",
    advance_on_empty: false,
}];

const TERM_GET_TIERS: &[QueryTier] = &[QueryTier {
    name: "term by id",
    sql: "SELECT id, name, start_date, end_date FROM terms WHERE id = ?1",
    advance_on_empty: false,
}];

fn row_to_term(row: &libsql::Row) -> Result<Term, DatabaseError> {
    Ok(Term {
        id: get_integer(row, 0, "id")?,
        name: get_text(row, 1, "name")?,
        start_date: parse_date(&get_text(row, 2, "start_date")?)?,
        end_date: parse_date(&get_text(row, 3, "end_date")?)?,
    })
}

fn materialize_term(row: &libsql::Row) -> Option<Term> {
    Some(Term {
        id: integer_by_name(row, "id")?,
        name: text_by_name(row, "name")?,
        start_date: parse_date(&text_by_name(row, "start_date")?).ok()?,
        end_date: parse_date(&text_by_name(row, "end_date")?).ok()?,
    })
}

async fn structured_list(db: &RosterDb) -> Result<Vec<Term>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {TERM_COLS} FROM terms ORDER BY start_date"),
            (),
        )
        .await?;
    let mut terms = Vec::new();
    while let Some(row) = rows.next().await? {
        terms.push(row_to_term(&row)?);
    }
    Ok(terms)
}

async fn structured_get(db: &RosterDb, id: i64) -> Result<Option<Term>, DatabaseError> {
    let mut rows = db
        .query(&format!("SELECT {TERM_COLS} FROM terms WHERE id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_term(&row)?)),
        None => Ok(None),
    }
}

impl RosterService {
    /// Create a term. The name is trimmed; the end date must fall
    /// strictly after the start date.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name or an empty
    /// or inverted date range, or a driver error if the insert fails.
    pub async fn add_term(
        &self,
        name: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<Term, DatabaseError> {
        let name = require_name("term name", name)?;
        require_date_order("term dates", start_date, end_date)?;

        self.db()
            .execute(
                "INSERT INTO terms (name, start_date, end_date) VALUES (?1, ?2, ?3)",
                libsql::params![
                    name.as_str(),
                    start_date.to_string(),
                    end_date.to_string()
                ],
            )
            .await?;

        Ok(Term {
            id: self.db().last_insert_rowid(),
            name,
            start_date,
            end_date,
        })
    }

    /// List all terms, ordered by start date.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn list_terms(&self) -> Result<Vec<Term>, DatabaseError> {
        match structured_list(self.db()).await {
            Ok(terms) => Ok(terms),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured term list drifted, engaging fallback: {e}");
                Ok(run_chain(self.db().conn(), TERM_LIST_TIERS, || (), materialize_term).await)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one term by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_term(&self, id: i64) -> Result<Option<Term>, DatabaseError> {
        match structured_get(self.db(), id).await {
            Ok(term) => Ok(term),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured term get drifted, engaging fallback: {e}");
                Ok(
                    run_chain(self.db().conn(), TERM_GET_TIERS, || [id], materialize_term)
                        .await
                        .into_iter()
                        .next(),
                )
            }
            Err(e) => Err(e),
        }
    }

    /// Map of term id to display name, from whichever spelling of the
    /// term table this store has. Never errors: a store with no term
    /// table yields an empty map.
    pub async fn term_name_map(&self) -> HashMap<i64, String> {
        crate::drift::term::term_name_map(self.db().conn()).await
    }

    /// Delete a term. Returns `false` when no row matched or when
    /// courses or workloads still reference it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than a constraint conflict.
    pub async fn delete_term(&self, id: i64) -> Result<bool, DatabaseError> {
        match self
            .db()
            .execute("DELETE FROM terms WHERE id = ?1", [id])
            .await
        {
            Ok(n) => Ok(n > 0),
            Err(DatabaseError::Driver(e)) if is_constraint_violation(&e) => {
                tracing::warn!("term {id} is still referenced, delete refused: {e}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{GENERATION_A_DDL, drifted_service, test_service};
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn add_list_get_term() {
        let svc = test_service().await;

        let spring = svc
            .add_term("Spring 2026", date(2026, 1, 12), date(2026, 5, 8))
            .await
            .unwrap();
        let fall = svc
            .add_term(" Fall 2025 ", date(2025, 8, 25), date(2025, 12, 12))
            .await
            .unwrap();
        assert_eq!(fall.name, "Fall 2025");

        let terms = svc.list_terms().await.unwrap();
        assert_eq!(terms, vec![fall.clone(), spring]);
        assert_eq!(svc.get_term(fall.id).await.unwrap(), Some(fall));
        assert_eq!(svc.get_term(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn add_term_rejects_empty_range() {
        let svc = test_service().await;

        let err = svc
            .add_term("Fall 2025", date(2025, 8, 25), date(2025, 8, 25))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        assert!(svc.list_terms().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn term_name_map_covers_both_spellings() {
        let svc = test_service().await;
        let term = svc
            .add_term("Fall 2025", date(2025, 8, 25), date(2025, 12, 12))
            .await
            .unwrap();
        assert_eq!(
            svc.term_name_map().await.get(&term.id).map(String::as_str),
            Some("Fall 2025")
        );

        let legacy = drifted_service(GENERATION_A_DDL).await;
        legacy
            .db()
            .conn()
            .execute("INSERT INTO term VALUES (4, 'Fall 2019')", ())
            .await
            .unwrap();
        assert_eq!(
            legacy.term_name_map().await.get(&4).map(String::as_str),
            Some("Fall 2019")
        );
    }

    #[tokio::test]
    async fn legacy_store_has_no_full_terms_but_map_still_works() {
        let svc = drifted_service(GENERATION_A_DDL).await;
        svc.db()
            .conn()
            .execute("INSERT INTO term VALUES (4, 'Fall 2019')", ())
            .await
            .unwrap();

        assert!(svc.list_terms().await.unwrap().is_empty());
        assert_eq!(svc.term_name_map().await.len(), 1);
    }

    #[tokio::test]
    async fn delete_term_is_refused_while_referenced() {
        let svc = test_service().await;
        let school = svc.add_school("Science").await.unwrap();
        let dept = svc.add_department("Computing", school.id).await.unwrap();
        let program = svc.add_program("Computer Science", dept.id).await.unwrap();
        let term = svc
            .add_term("Fall 2025", date(2025, 8, 25), date(2025, 12, 12))
            .await
            .unwrap();
        let course = svc
            .add_course("Databases", None, program.id, Some(term.id))
            .await
            .unwrap();

        assert!(!svc.delete_term(term.id).await.unwrap());
        assert!(svc.delete_course(course.id).await.unwrap());
        assert!(svc.delete_term(term.id).await.unwrap());
    }
}
