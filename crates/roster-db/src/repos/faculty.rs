//! Faculty repository. Faculty are keyed by email, not a surrogate id.

use roster_core::entities::Faculty;
use roster_core::validate::{require_email, require_name};

use crate::RosterDb;
use crate::drift::classify::is_drift_error;
use crate::drift::row::{integer_by_name, text_by_name};
use crate::drift::tiers::{QueryTier, run_chain};
use crate::error::{DatabaseError, is_constraint_violation};
use crate::helpers::{get_opt_string, get_optional_integer, get_text};
use crate::service::RosterService;

const FACULTY_COLS: &str = "email, first_name, last_name, phone_number, workload_category_id";

const FACULTY_LIST_TIERS: &[QueryTier] = &[QueryTier {
    name: "faculty",
    sql: "SELECT email, first_name, last_name, phone_number, workload_category_id
          FROM faculty ORDER BY last_name, first_name",
    advance_on_empty: false,
}];

const FACULTY_GET_TIERS: &[QueryTier] = &[QueryTier {
    name: "faculty by email",
    sql: "SELECT email, first_name, last_name, phone_number, workload_category_id
          FROM faculty WHERE email = ?1",
    advance_on_empty: false,
}];

fn row_to_faculty(row: &libsql::Row) -> Result<Faculty, DatabaseError> {
    Ok(Faculty {
        email: get_text(row, 0, "email")?,
        first_name: get_text(row, 1, "first_name")?,
        last_name: get_text(row, 2, "last_name")?,
        phone_number: get_opt_string(row, 3, "phone_number")?.unwrap_or_default(),
        workload_category_id: get_optional_integer(row, 4, "workload_category_id")?,
    })
}

fn materialize_faculty(row: &libsql::Row) -> Option<Faculty> {
    Some(Faculty {
        email: text_by_name(row, "email")?,
        first_name: text_by_name(row, "first_name")?,
        last_name: text_by_name(row, "last_name")?,
        phone_number: text_by_name(row, "phone_number").unwrap_or_default(),
        workload_category_id: integer_by_name(row, "workload_category_id"),
    })
}

async fn structured_list(db: &RosterDb) -> Result<Vec<Faculty>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {FACULTY_COLS} FROM faculty ORDER BY last_name, first_name"),
            (),
        )
        .await?;
    let mut members = Vec::new();
    while let Some(row) = rows.next().await? {
        members.push(row_to_faculty(&row)?);
    }
    Ok(members)
}

async fn structured_get(db: &RosterDb, email: &str) -> Result<Option<Faculty>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {FACULTY_COLS} FROM faculty WHERE email = ?1"),
            [email],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_faculty(&row)?)),
        None => Ok(None),
    }
}

impl RosterService {
    /// Create a faculty member, optionally placed in a workload category.
    /// Email and names are trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a malformed email or blank
    /// name, or a driver error if the insert fails (including a duplicate
    /// email).
    pub async fn add_faculty(
        &self,
        email: &str,
        first_name: &str,
        last_name: &str,
        phone_number: &str,
        workload_category_id: Option<i64>,
    ) -> Result<Faculty, DatabaseError> {
        let email = require_email("email", email)?;
        let first_name = require_name("first name", first_name)?;
        let last_name = require_name("last name", last_name)?;
        let phone_number = phone_number.trim().to_string();

        self.db()
            .execute(
                "INSERT INTO faculty (email, first_name, last_name, phone_number, workload_category_id)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    email.as_str(),
                    first_name.as_str(),
                    last_name.as_str(),
                    phone_number.as_str(),
                    workload_category_id
                ],
            )
            .await?;

        Ok(Faculty {
            email,
            first_name,
            last_name,
            phone_number,
            workload_category_id,
        })
    }

    /// List all faculty, ordered by last then first name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn list_faculty(&self) -> Result<Vec<Faculty>, DatabaseError> {
        match structured_list(self.db()).await {
            Ok(members) => Ok(members),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured faculty list drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    FACULTY_LIST_TIERS,
                    || (),
                    materialize_faculty,
                )
                .await)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one faculty member by email (input is trimmed first).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_faculty(&self, email: &str) -> Result<Option<Faculty>, DatabaseError> {
        let email = email.trim().to_string();
        match structured_get(self.db(), &email).await {
            Ok(member) => Ok(member),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured faculty get drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    FACULTY_GET_TIERS,
                    || [email.as_str()],
                    materialize_faculty,
                )
                .await
                .into_iter()
                .next())
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a faculty member. Returns `false` when no row matched or
    /// when workloads still reference them.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than a constraint conflict.
    pub async fn delete_faculty(&self, email: &str) -> Result<bool, DatabaseError> {
        let email = email.trim();
        match self
            .db()
            .execute("DELETE FROM faculty WHERE email = ?1", [email])
            .await
        {
            Ok(n) => Ok(n > 0),
            Err(DatabaseError::Driver(e)) if is_constraint_violation(&e) => {
                tracing::warn!("faculty '{email}' is still referenced, delete refused: {e}");
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
    async fn add_and_get_faculty() {
        let svc = test_service().await;

        let member = svc
            .add_faculty(" jdoe@example.edu ", " Jo ", "Doe", "555-0101", None)
            .await
            .unwrap();
        assert_eq!(member.email, "jdoe@example.edu");
        assert_eq!(member.first_name, "Jo");

        let fetched = svc.get_faculty("jdoe@example.edu").await.unwrap().unwrap();
        assert_eq!(fetched, member);
        assert_eq!(svc.get_faculty("ghost@example.edu").await.unwrap(), None);
    }

    #[tokio::test]
    async fn add_faculty_rejects_duplicate_email() {
        let svc = test_service().await;
        svc.add_faculty("jdoe@example.edu", "Jo", "Doe", "555-0101", None)
            .await
            .unwrap();

        let result = svc
            .add_faculty("jdoe@example.edu", "Jay", "Doe", "555-0102", None)
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn add_faculty_rejects_unknown_category() {
        let svc = test_service().await;

        let result = svc
            .add_faculty("jdoe@example.edu", "Jo", "Doe", "555-0101", Some(999))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn list_faculty_ordered_by_name() {
        let svc = test_service().await;
        svc.add_faculty("zz@example.edu", "Zoe", "Zhang", "", None)
            .await
            .unwrap();
        svc.add_faculty("aa@example.edu", "Al", "Adams", "", None)
            .await
            .unwrap();

        let emails: Vec<String> = svc
            .list_faculty()
            .await
            .unwrap()
            .into_iter()
            .map(|f| f.email)
            .collect();
        assert_eq!(
            emails,
            vec!["aa@example.edu".to_string(), "zz@example.edu".to_string()]
        );
    }

    #[tokio::test]
    async fn delete_faculty_is_refused_while_assigned() {
        let svc = test_service().await;
        let school = svc.add_school("Science").await.unwrap();
        let dept = svc.add_department("Computing", school.id).await.unwrap();
        let program = svc.add_program("Computer Science", dept.id).await.unwrap();
        let course = svc
            .add_course("Databases", None, program.id, None)
            .await
            .unwrap();
        svc.add_faculty("jdoe@example.edu", "Jo", "Doe", "555-0101", None)
            .await
            .unwrap();
        let workload = svc
            .add_workload(
                course.id,
                "jdoe@example.edu",
                "001",
                None,
                roster_core::enums::CourseType::Lecture,
            )
            .await
            .unwrap();

        assert!(!svc.delete_faculty("jdoe@example.edu").await.unwrap());
        assert!(svc.delete_workload(workload.id).await.unwrap());
        assert!(svc.delete_faculty(" jdoe@example.edu ").await.unwrap());
        assert_eq!(svc.get_faculty("jdoe@example.edu").await.unwrap(), None);
    }
}
