//! School repository — the root of the academic hierarchy.

use roster_core::entities::School;
use roster_core::validate::require_name;

use crate::RosterDb;
use crate::drift::classify::is_drift_error;
use crate::drift::row::{integer_by_name, text_by_name};
use crate::drift::tiers::{QueryTier, run_chain};
use crate::error::{DatabaseError, is_constraint_violation};
use crate::helpers::{get_integer, get_text};
use crate::service::RosterService;

const SCHOOL_COLS: &str = "id, name";

const SCHOOL_LIST_TIERS: &[QueryTier] = &[QueryTier {
    name: "schools",
    sql: "SELECT id, name FROM schools ORDER BY name",
    advance_on_empty: false,
}];

const SCHOOL_GET_TIERS: &[QueryTier] = &[QueryTier {
    name: "school by id",
    sql: "SELECT id, name FROM schools WHERE id = ?1",
    advance_on_empty: false,
}];

const SCHOOL_BY_NAME_TIERS: &[QueryTier] = &[QueryTier {
    name: "school by name",
    sql: "SELECT id, name FROM schools WHERE name = ?1",
    advance_on_empty: false,
}];

fn row_to_school(row: &libsql::Row) -> Result<School, DatabaseError> {
    Ok(School {
        id: get_integer(row, 0, "id")?,
        name: get_text(row, 1, "name")?,
    })
}

fn materialize_school(row: &libsql::Row) -> Option<School> {
    Some(School {
        id: integer_by_name(row, "id")?,
        name: text_by_name(row, "name")?,
    })
}

async fn structured_list(db: &RosterDb) -> Result<Vec<School>, DatabaseError> {
    let mut rows = db
        .query(&format!("SELECT {SCHOOL_COLS} FROM schools ORDER BY name"), ())
        .await?;
    let mut schools = Vec::new();
    while let Some(row) = rows.next().await? {
        schools.push(row_to_school(&row)?);
    }
    Ok(schools)
}

async fn structured_get(db: &RosterDb, id: i64) -> Result<Option<School>, DatabaseError> {
    let mut rows = db
        .query(&format!("SELECT {SCHOOL_COLS} FROM schools WHERE id = ?1"), [id])
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_school(&row)?)),
        None => Ok(None),
    }
}

async fn structured_get_by_name(db: &RosterDb, name: &str) -> Result<Option<School>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {SCHOOL_COLS} FROM schools WHERE name = ?1"),
            [name],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_school(&row)?)),
        None => Ok(None),
    }
}

impl RosterService {
    /// Create a school. The name is trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name, or a driver
    /// error if the insert fails.
    pub async fn add_school(&self, name: &str) -> Result<School, DatabaseError> {
        let name = require_name("school name", name)?;

        self.db()
            .execute("INSERT INTO schools (name) VALUES (?1)", [name.as_str()])
            .await?;

        Ok(School {
            id: self.db().last_insert_rowid(),
            name,
        })
    }

    /// List all schools, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn list_schools(&self) -> Result<Vec<School>, DatabaseError> {
        match structured_list(self.db()).await {
            Ok(schools) => Ok(schools),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured school list drifted, engaging fallback: {e}");
                Ok(run_chain(self.db().conn(), SCHOOL_LIST_TIERS, || (), materialize_school).await)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one school by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_school(&self, id: i64) -> Result<Option<School>, DatabaseError> {
        match structured_get(self.db(), id).await {
            Ok(school) => Ok(school),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured school get drifted, engaging fallback: {e}");
                Ok(
                    run_chain(self.db().conn(), SCHOOL_GET_TIERS, || [id], materialize_school)
                        .await
                        .into_iter()
                        .next(),
                )
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one school by exact name (input is trimmed first).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_school_by_name(&self, name: &str) -> Result<Option<School>, DatabaseError> {
        let name = name.trim().to_string();
        match structured_get_by_name(self.db(), &name).await {
            Ok(school) => Ok(school),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured school lookup drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    SCHOOL_BY_NAME_TIERS,
                    || [name.as_str()],
                    materialize_school,
                )
                .await
                .into_iter()
                .next())
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a school. Returns `false` when no row matched or when
    /// departments still reference it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than a constraint conflict.
    pub async fn delete_school(&self, id: i64) -> Result<bool, DatabaseError> {
        match self
            .db()
            .execute("DELETE FROM schools WHERE id = ?1", [id])
            .await
        {
            Ok(n) => Ok(n > 0),
            Err(DatabaseError::Driver(e)) if is_constraint_violation(&e) => {
                tracing::warn!("school {id} is still referenced, delete refused: {e}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::test_service;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn add_and_get_school() {
        let svc = test_service().await;

        let school = svc.add_school("  Science  ").await.unwrap();
        assert_eq!(school.name, "Science");

        let fetched = svc.get_school(school.id).await.unwrap().unwrap();
        assert_eq!(fetched, school);
        assert_eq!(svc.get_school(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn add_school_rejects_blank_name() {
        let svc = test_service().await;

        let err = svc.add_school("   ").await.unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        assert!(svc.list_schools().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn list_schools_ordered_by_name() {
        let svc = test_service().await;
        svc.add_school("Science").await.unwrap();
        svc.add_school("Arts").await.unwrap();

        let names: Vec<String> = svc
            .list_schools()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name)
            .collect();
        assert_eq!(names, vec!["Arts".to_string(), "Science".to_string()]);
    }

    #[tokio::test]
    async fn get_school_by_name_trims_lookup() {
        let svc = test_service().await;
        let school = svc.add_school("Science").await.unwrap();

        let found = svc.get_school_by_name(" Science ").await.unwrap().unwrap();
        assert_eq!(found, school);
        assert_eq!(svc.get_school_by_name("Humanities").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_school_is_refused_while_referenced() {
        let svc = test_service().await;
        let school = svc.add_school("Science").await.unwrap();
        let dept = svc.add_department("Physics", school.id).await.unwrap();

        assert!(!svc.delete_school(school.id).await.unwrap());
        assert!(svc.get_school(school.id).await.unwrap().is_some());
        assert!(!svc.delete_school(999).await.unwrap());

        assert!(svc.delete_department(dept.id).await.unwrap());
        assert!(svc.delete_school(school.id).await.unwrap());
        assert_eq!(svc.get_school(school.id).await.unwrap(), None);
    }
}
