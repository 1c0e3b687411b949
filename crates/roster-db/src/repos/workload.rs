//! Workload repository.
//!
//! A workload is one faculty-to-section assignment. The column set has
//! been stable across generations; what drifts is representation (legacy
//! TEXT hour columns) and row hygiene, so the fallback chain is a single
//! defensive re-read of the same columns.

use roster_core::entities::Workload;
use roster_core::enums::CourseType;
use roster_core::validate::{require_email, require_name, require_optional_hours};

use crate::RosterDb;
use crate::drift::bind::bind_row_fields;
use crate::drift::classify::is_drift_error;
use crate::drift::row::{integer_by_name, text_by_name};
use crate::drift::tiers::{QueryTier, run_chain};
use crate::error::{DatabaseError, is_constraint_violation};
use crate::helpers::{get_integer, get_optional_number, get_text, parse_course_type};
use crate::service::RosterService;

const WORKLOAD_COLS: &str = "id, course_id, faculty_email, section, hours, course_type";

const WORKLOAD_LIST_TIERS: &[QueryTier] = &[QueryTier {
    name: "workloads",
    sql: "SELECT id, course_id, faculty_email, section, hours, course_type
          FROM workloads ORDER BY id",
    advance_on_empty: false,
}];

const WORKLOAD_GET_TIERS: &[QueryTier] = &[QueryTier {
    name: "workload by id",
    sql: "SELECT id, course_id, faculty_email, section, hours, course_type
          FROM workloads WHERE id = ?1",
    advance_on_empty: false,
}];

const WORKLOAD_BY_FACULTY_TIERS: &[QueryTier] = &[QueryTier {
    name: "workloads by faculty",
    sql: "SELECT id, course_id, faculty_email, section, hours, course_type
          FROM workloads WHERE faculty_email = ?1 ORDER BY id",
    advance_on_empty: false,
}];

const WORKLOAD_BY_COURSE_TIERS: &[QueryTier] = &[QueryTier {
    name: "workloads by course",
    sql: "SELECT id, course_id, faculty_email, section, hours, course_type
          FROM workloads WHERE course_id = ?1 ORDER BY id",
    advance_on_empty: false,
}];

fn row_to_workload(row: &libsql::Row) -> Result<Workload, DatabaseError> {
    Ok(Workload {
        id: get_integer(row, 0, "id")?,
        course_id: get_integer(row, 1, "course_id")?,
        faculty_email: get_text(row, 2, "faculty_email")?,
        section: get_text(row, 3, "section")?,
        hours: get_optional_number(row, 4, "hours")?,
        course_type: parse_course_type(&get_text(row, 5, "course_type")?)?,
    })
}

fn materialize_workload(row: &libsql::Row) -> Option<Workload> {
    let mut workload = Workload {
        id: integer_by_name(row, "id")?,
        course_id: integer_by_name(row, "course_id")?,
        faculty_email: text_by_name(row, "faculty_email")?,
        section: text_by_name(row, "section")?,
        hours: None,
        course_type: CourseType::parse(&text_by_name(row, "course_type")?)?,
    };
    bind_row_fields(&mut workload, row);
    Some(workload)
}

async fn collect_workloads(rows: &mut libsql::Rows) -> Result<Vec<Workload>, DatabaseError> {
    let mut workloads = Vec::new();
    while let Some(row) = rows.next().await? {
        workloads.push(row_to_workload(&row)?);
    }
    Ok(workloads)
}

async fn structured_list(db: &RosterDb) -> Result<Vec<Workload>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {WORKLOAD_COLS} FROM workloads ORDER BY id"),
            (),
        )
        .await?;
    collect_workloads(&mut rows).await
}

async fn structured_by_faculty(
    db: &RosterDb,
    email: &str,
) -> Result<Vec<Workload>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {WORKLOAD_COLS} FROM workloads WHERE faculty_email = ?1 ORDER BY id"),
            [email],
        )
        .await?;
    collect_workloads(&mut rows).await
}

async fn structured_by_course(db: &RosterDb, course_id: i64) -> Result<Vec<Workload>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {WORKLOAD_COLS} FROM workloads WHERE course_id = ?1 ORDER BY id"),
            [course_id],
        )
        .await?;
    collect_workloads(&mut rows).await
}

async fn structured_get(db: &RosterDb, id: i64) -> Result<Option<Workload>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {WORKLOAD_COLS} FROM workloads WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_workload(&row)?)),
        None => Ok(None),
    }
}

impl RosterService {
    /// Assign a faculty member to one section of a course.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a malformed email, blank
    /// section, or negative hours, or a driver error if the insert fails
    /// (including unknown course or faculty references).
    pub async fn add_workload(
        &self,
        course_id: i64,
        faculty_email: &str,
        section: &str,
        hours: Option<f64>,
        course_type: CourseType,
    ) -> Result<Workload, DatabaseError> {
        let faculty_email = require_email("faculty email", faculty_email)?;
        let section = require_name("section", section)?;
        let hours = require_optional_hours("workload hours", hours)?;

        self.db()
            .execute(
                "INSERT INTO workloads (course_id, faculty_email, section, hours, course_type)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                libsql::params![
                    course_id,
                    faculty_email.as_str(),
                    section.as_str(),
                    hours,
                    course_type.as_str()
                ],
            )
            .await?;

        Ok(Workload {
            id: self.db().last_insert_rowid(),
            course_id,
            faculty_email,
            section,
            hours,
            course_type,
        })
    }

    /// List all workloads.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn list_workloads(&self) -> Result<Vec<Workload>, DatabaseError> {
        match structured_list(self.db()).await {
            Ok(workloads) => Ok(workloads),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured workload list drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    WORKLOAD_LIST_TIERS,
                    || (),
                    materialize_workload,
                )
                .await)
            }
            Err(e) => Err(e),
        }
    }

    /// List the workloads assigned to one faculty member (email is
    /// trimmed first).
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn workloads_by_faculty(
        &self,
        faculty_email: &str,
    ) -> Result<Vec<Workload>, DatabaseError> {
        let email = faculty_email.trim().to_string();
        match structured_by_faculty(self.db(), &email).await {
            Ok(workloads) => Ok(workloads),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured faculty-workload list drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    WORKLOAD_BY_FACULTY_TIERS,
                    || [email.as_str()],
                    materialize_workload,
                )
                .await)
            }
            Err(e) => Err(e),
        }
    }

    /// List the workloads assigned against one course.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn workloads_by_course(&self, course_id: i64) -> Result<Vec<Workload>, DatabaseError> {
        match structured_by_course(self.db(), course_id).await {
            Ok(workloads) => Ok(workloads),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured course-workload list drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    WORKLOAD_BY_COURSE_TIERS,
                    || [course_id],
                    materialize_workload,
                )
                .await)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one workload by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_workload(&self, id: i64) -> Result<Option<Workload>, DatabaseError> {
        match structured_get(self.db(), id).await {
            Ok(workload) => Ok(workload),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured workload get drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    WORKLOAD_GET_TIERS,
                    || [id],
                    materialize_workload,
                )
                .await
                .into_iter()
                .next())
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a workload. Returns `false` when no row matched.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than a constraint conflict.
    pub async fn delete_workload(&self, id: i64) -> Result<bool, DatabaseError> {
        match self
            .db()
            .execute("DELETE FROM workloads WHERE id = ?1", [id])
            .await
        {
            Ok(n) => Ok(n > 0),
            Err(DatabaseError::Driver(e)) if is_constraint_violation(&e) => {
                tracing::warn!("workload {id} is still referenced, delete refused: {e}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
