//! Program-of-study repository.
//!
//! The by-name lookup is the workhorse of `roster program show` and
//! returns the program bundled with its courses, so it exercises the
//! course read path (and its drift tolerance) end to end.

use roster_core::entities::ProgramOfStudy;
use roster_core::responses::ProgramWithCourses;
use roster_core::validate::require_name;

use crate::RosterDb;
use crate::drift::classify::is_drift_error;
use crate::drift::row::{integer_by_name, text_by_name};
use crate::drift::tiers::{QueryTier, run_chain};
use crate::error::{DatabaseError, is_constraint_violation};
use crate::helpers::{get_integer, get_text};
use crate::service::RosterService;

const PROGRAM_COLS: &str = "id, name, department_id";

const PROGRAM_LIST_TIERS: &[QueryTier] = &[QueryTier {
    name: "programs",
    sql: "SELECT id, name, department_id FROM programs ORDER BY name",
    advance_on_empty: false,
}];

const PROGRAM_GET_TIERS: &[QueryTier] = &[QueryTier {
    name: "program by id",
    sql: "SELECT id, name, department_id FROM programs WHERE id = ?1",
    advance_on_empty: false,
}];

const PROGRAM_BY_NAME_TIERS: &[QueryTier] = &[QueryTier {
    name: "program by name",
    sql: "SELECT id, name, department_id FROM programs WHERE name = ?1",
    advance_on_empty: false,
}];

fn row_to_program(row: &libsql::Row) -> Result<ProgramOfStudy, DatabaseError> {
    Ok(ProgramOfStudy {
        id: get_integer(row, 0, "id")?,
        name: get_text(row, 1, "name")?,
        department_id: get_integer(row, 2, "department_id")?,
    })
}

fn materialize_program(row: &libsql::Row) -> Option<ProgramOfStudy> {
    Some(ProgramOfStudy {
        id: integer_by_name(row, "id")?,
        name: text_by_name(row, "name")?,
        department_id: integer_by_name(row, "department_id")?,
    })
}

async fn structured_list(db: &RosterDb) -> Result<Vec<ProgramOfStudy>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {PROGRAM_COLS} FROM programs ORDER BY name"),
            (),
        )
        .await?;
    let mut programs = Vec::new();
    while let Some(row) = rows.next().await? {
        programs.push(row_to_program(&row)?);
    }
    Ok(programs)
}

async fn structured_get(db: &RosterDb, id: i64) -> Result<Option<ProgramOfStudy>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {PROGRAM_COLS} FROM programs WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_program(&row)?)),
        None => Ok(None),
    }
}

async fn structured_get_by_name(
    db: &RosterDb,
    name: &str,
) -> Result<Option<ProgramOfStudy>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {PROGRAM_COLS} FROM programs WHERE name = ?1"),
            [name],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_program(&row)?)),
        None => Ok(None),
    }
}

impl RosterService {
    /// Create a program of study under a department. The name is trimmed
    /// before storage.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name, or a driver
    /// error if the insert fails.
    pub async fn add_program(
        &self,
        name: &str,
        department_id: i64,
    ) -> Result<ProgramOfStudy, DatabaseError> {
        let name = require_name("program name", name)?;

        self.db()
            .execute(
                "INSERT INTO programs (name, department_id) VALUES (?1, ?2)",
                libsql::params![name.as_str(), department_id],
            )
            .await?;

        Ok(ProgramOfStudy {
            id: self.db().last_insert_rowid(),
            name,
            department_id,
        })
    }

    /// List all programs, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn list_programs(&self) -> Result<Vec<ProgramOfStudy>, DatabaseError> {
        match structured_list(self.db()).await {
            Ok(programs) => Ok(programs),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured program list drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    PROGRAM_LIST_TIERS,
                    || (),
                    materialize_program,
                )
                .await)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one program by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_program(&self, id: i64) -> Result<Option<ProgramOfStudy>, DatabaseError> {
        match structured_get(self.db(), id).await {
            Ok(program) => Ok(program),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured program get drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    PROGRAM_GET_TIERS,
                    || [id],
                    materialize_program,
                )
                .await
                .into_iter()
                .next())
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch a program by exact name (input is trimmed first), bundled
    /// with its courses. The course list inherits all course-read drift
    /// tolerance, so on a drifted store this still returns the program
    /// with whatever course fields the store can provide.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_program_by_name(
        &self,
        name: &str,
    ) -> Result<Option<ProgramWithCourses>, DatabaseError> {
        let name = name.trim().to_string();
        let program = match structured_get_by_name(self.db(), &name).await {
            Ok(program) => program,
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured program lookup drifted, engaging fallback: {e}");
                run_chain(
                    self.db().conn(),
                    PROGRAM_BY_NAME_TIERS,
                    || [name.as_str()],
                    materialize_program,
                )
                .await
                .into_iter()
                .next()
            }
            Err(e) => return Err(e),
        };

        let Some(program) = program else {
            return Ok(None);
        };

        let courses = self.courses_by_program(program.id).await?;
        Ok(Some(ProgramWithCourses { program, courses }))
    }

    /// Delete a program. Returns `false` when no row matched or when
    /// courses still reference it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than a constraint conflict.
    pub async fn delete_program(&self, id: i64) -> Result<bool, DatabaseError> {
        match self
            .db()
            .execute("DELETE FROM programs WHERE id = ?1", [id])
            .await
        {
            Ok(n) => Ok(n > 0),
            Err(DatabaseError::Driver(e)) if is_constraint_violation(&e) => {
                tracing::warn!("program {id} is still referenced, delete refused: {e}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
