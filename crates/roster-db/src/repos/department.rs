//! Department repository.

use roster_core::entities::Department;
use roster_core::validate::require_name;

use crate::RosterDb;
use crate::drift::classify::is_drift_error;
use crate::drift::row::{integer_by_name, text_by_name};
use crate::drift::tiers::{QueryTier, run_chain};
use crate::error::{DatabaseError, is_constraint_violation};
use crate::helpers::{get_integer, get_text};
use crate::service::RosterService;

const DEPARTMENT_COLS: &str = "id, name, school_id";

const DEPARTMENT_LIST_TIERS: &[QueryTier] = &[QueryTier {
    name: "departments",
    sql: "SELECT id, name, school_id FROM departments ORDER BY name",
    advance_on_empty: false,
}];

const DEPARTMENT_GET_TIERS: &[QueryTier] = &[QueryTier {
    name: "department by id",
    sql: "SELECT id, name, school_id FROM departments WHERE id = ?1",
    advance_on_empty: false,
}];

const DEPARTMENT_BY_NAME_TIERS: &[QueryTier] = &[QueryTier {
    name: "department by name",
    sql: "SELECT id, name, school_id FROM departments WHERE name = ?1",
    advance_on_empty: false,
}];

fn row_to_department(row: &libsql::Row) -> Result<Department, DatabaseError> {
    Ok(Department {
        id: get_integer(row, 0, "id")?,
        name: get_text(row, 1, "name")?,
        school_id: get_integer(row, 2, "school_id")?,
    })
}

fn materialize_department(row: &libsql::Row) -> Option<Department> {
    Some(Department {
        id: integer_by_name(row, "id")?,
        name: text_by_name(row, "name")?,
        school_id: integer_by_name(row, "school_id")?,
    })
}

async fn structured_list(db: &RosterDb) -> Result<Vec<Department>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {DEPARTMENT_COLS} FROM departments ORDER BY name"),
            (),
        )
        .await?;
    let mut departments = Vec::new();
    while let Some(row) = rows.next().await? {
        departments.push(row_to_department(&row)?);
    }
    Ok(departments)
}

async fn structured_get(db: &RosterDb, id: i64) -> Result<Option<Department>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {DEPARTMENT_COLS} FROM departments WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_department(&row)?)),
        None => Ok(None),
    }
}

async fn structured_get_by_name(
    db: &RosterDb,
    name: &str,
) -> Result<Option<Department>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {DEPARTMENT_COLS} FROM departments WHERE name = ?1"),
            [name],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_department(&row)?)),
        None => Ok(None),
    }
}

impl RosterService {
    /// Create a department under a school. The name is trimmed before
    /// storage; an unknown `school_id` surfaces as a driver error.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name, or a driver
    /// error if the insert fails.
    pub async fn add_department(
        &self,
        name: &str,
        school_id: i64,
    ) -> Result<Department, DatabaseError> {
        let name = require_name("department name", name)?;

        self.db()
            .execute(
                "INSERT INTO departments (name, school_id) VALUES (?1, ?2)",
                libsql::params![name.as_str(), school_id],
            )
            .await?;

        Ok(Department {
            id: self.db().last_insert_rowid(),
            name,
            school_id,
        })
    }

    /// List all departments, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn list_departments(&self) -> Result<Vec<Department>, DatabaseError> {
        match structured_list(self.db()).await {
            Ok(departments) => Ok(departments),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured department list drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    DEPARTMENT_LIST_TIERS,
                    || (),
                    materialize_department,
                )
                .await)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one department by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_department(&self, id: i64) -> Result<Option<Department>, DatabaseError> {
        match structured_get(self.db(), id).await {
            Ok(department) => Ok(department),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured department get drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    DEPARTMENT_GET_TIERS,
                    || [id],
                    materialize_department,
                )
                .await
                .into_iter()
                .next())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one department by exact name (input is trimmed first).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_department_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Department>, DatabaseError> {
        let name = name.trim().to_string();
        match structured_get_by_name(self.db(), &name).await {
            Ok(department) => Ok(department),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured department lookup drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    DEPARTMENT_BY_NAME_TIERS,
                    || [name.as_str()],
                    materialize_department,
                )
                .await
                .into_iter()
                .next())
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a department. Returns `false` when no row matched or when
    /// programs still reference it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than a constraint conflict.
    pub async fn delete_department(&self, id: i64) -> Result<bool, DatabaseError> {
        match self
            .db()
            .execute("DELETE FROM departments WHERE id = ?1", [id])
            .await
        {
            Ok(n) => Ok(n > 0),
            Err(DatabaseError::Driver(e)) if is_constraint_violation(&e) => {
                tracing::warn!("department {id} is still referenced, delete refused: {e}");
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
    async fn add_list_get_department() {
        let svc = test_service().await;
        let school = svc.add_school("Science").await.unwrap();

        let physics = svc.add_department(" Physics ", school.id).await.unwrap();
        let biology = svc.add_department("Biology", school.id).await.unwrap();
        assert_eq!(physics.name, "Physics");

        let names: Vec<String> = svc
            .list_departments()
            .await
            .unwrap()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["Biology".to_string(), "Physics".to_string()]);

        assert_eq!(svc.get_department(biology.id).await.unwrap(), Some(biology));
        let by_name = svc.get_department_by_name("Physics").await.unwrap();
        assert_eq!(by_name, Some(physics));
    }

    #[tokio::test]
    async fn add_department_requires_existing_school() {
        let svc = test_service().await;

        let result = svc.add_department("Physics", 999).await;
        assert!(result.is_err());
        assert!(svc.list_departments().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn delete_department_is_refused_while_referenced() {
        let svc = test_service().await;
        let school = svc.add_school("Science").await.unwrap();
        let dept = svc.add_department("Physics", school.id).await.unwrap();
        let program = svc.add_program("Astrophysics", dept.id).await.unwrap();

        assert!(!svc.delete_department(dept.id).await.unwrap());

        assert!(svc.delete_program(program.id).await.unwrap());
        assert!(svc.delete_department(dept.id).await.unwrap());
        assert_eq!(svc.get_department(dept.id).await.unwrap(), None);
    }
}
