//! Course repository.
//!
//! Courses sit on the store's fault line. Across deployed generations the
//! term link has lived on the course row (`courses.term_id`), moved to the
//! workload rows (`workloads.term_id`), and the hour column has changed
//! representation from TEXT to REAL. Reads here lean hardest on the drift
//! core: a three-tier chain of decreasing specificity, plus term-link
//! resolution for single-course fetches.

use roster_core::entities::Course;
use roster_core::responses::CourseWithWorkloads;
use roster_core::validate::{require_name, require_optional_hours};

use crate::RosterDb;
use crate::drift::bind::bind_row_fields;
use crate::drift::classify::is_drift_error;
use crate::drift::row::{integer_by_name, text_by_name};
use crate::drift::term::{resolve_term_ref, term_name_map};
use crate::drift::tiers::{QueryTier, run_chain};
use crate::error::{DatabaseError, is_constraint_violation};
use crate::helpers::{get_integer, get_optional_integer, get_optional_number, get_text};
use crate::service::RosterService;

const COURSE_COLS: &str = "id, name, hours, program_id, term_id";

// Tier 1 recovers the term link from the workload side (newest stores).
// The join keeps only term-bearing workload rows so the GROUP BY never
// collapses a linked course onto an unlinked row. Tier 2 recovers it from
// the course side. Tier 3 reads the columns every generation has.
const COURSE_LIST_TIERS: &[QueryTier] = &[
    QueryTier {
        name: "courses via workload term",
        sql: "SELECT c.id, c.name, c.hours, c.program_id, w.term_id AS term_id, t.name AS term_name
              FROM courses c
              LEFT OUTER JOIN workloads w ON w.course_id = c.id AND w.term_id IS NOT NULL
              LEFT OUTER JOIN terms t ON t.id = w.term_id
              GROUP BY c.id
              ORDER BY c.name",
        advance_on_empty: false,
    },
    QueryTier {
        name: "courses via course term",
        sql: "SELECT c.id, c.name, c.hours, c.program_id, c.term_id AS term_id, t.name AS term_name
              FROM courses c
              LEFT OUTER JOIN terms t ON t.id = c.term_id
              ORDER BY c.name",
        advance_on_empty: false,
    },
    QueryTier {
        name: "courses core",
        sql: "SELECT id, name, hours, program_id FROM courses ORDER BY name",
        advance_on_empty: false,
    },
];

const COURSE_GET_TIERS: &[QueryTier] = &[
    QueryTier {
        name: "course via workload term",
        sql: "SELECT c.id, c.name, c.hours, c.program_id, w.term_id AS term_id, t.name AS term_name
              FROM courses c
              LEFT OUTER JOIN workloads w ON w.course_id = c.id AND w.term_id IS NOT NULL
              LEFT OUTER JOIN terms t ON t.id = w.term_id
              WHERE c.id = ?1
              GROUP BY c.id",
        advance_on_empty: false,
    },
    QueryTier {
        name: "course via course term",
        sql: "SELECT c.id, c.name, c.hours, c.program_id, c.term_id AS term_id, t.name AS term_name
              FROM courses c
              LEFT OUTER JOIN terms t ON t.id = c.term_id
              WHERE c.id = ?1",
        advance_on_empty: false,
    },
    QueryTier {
        name: "course core",
        sql: "SELECT id, name, hours, program_id FROM courses WHERE id = ?1",
        advance_on_empty: false,
    },
];

const COURSE_BY_PROGRAM_TIERS: &[QueryTier] = &[
    QueryTier {
        name: "program courses via workload term",
        sql: "SELECT c.id, c.name, c.hours, c.program_id, w.term_id AS term_id, t.name AS term_name
              FROM courses c
              LEFT OUTER JOIN workloads w ON w.course_id = c.id AND w.term_id IS NOT NULL
              LEFT OUTER JOIN terms t ON t.id = w.term_id
              WHERE c.program_id = ?1
              GROUP BY c.id
              ORDER BY c.name",
        advance_on_empty: false,
    },
    QueryTier {
        name: "program courses via course term",
        sql: "SELECT c.id, c.name, c.hours, c.program_id, c.term_id AS term_id, t.name AS term_name
              FROM courses c
              LEFT OUTER JOIN terms t ON t.id = c.term_id
              WHERE c.program_id = ?1
              ORDER BY c.name",
        advance_on_empty: false,
    },
    QueryTier {
        name: "program courses core",
        sql: "SELECT id, name, hours, program_id FROM courses WHERE program_id = ?1 ORDER BY name",
        advance_on_empty: false,
    },
];

fn row_to_course(row: &libsql::Row) -> Result<Course, DatabaseError> {
    Ok(Course {
        id: get_integer(row, 0, "id")?,
        name: get_text(row, 1, "name")?,
        hours: get_optional_number(row, 2, "hours")?,
        program_id: get_integer(row, 3, "program_id")?,
        term_id: get_optional_integer(row, 4, "term_id")?,
        term_name: None,
    })
}

fn materialize_course(row: &libsql::Row) -> Option<Course> {
    let mut course = Course {
        id: integer_by_name(row, "id")?,
        name: text_by_name(row, "name")?,
        hours: None,
        program_id: integer_by_name(row, "program_id")?,
        term_id: None,
        term_name: None,
    };
    bind_row_fields(&mut course, row);
    Some(course)
}

async fn collect_courses(rows: &mut libsql::Rows) -> Result<Vec<Course>, DatabaseError> {
    let mut courses = Vec::new();
    while let Some(row) = rows.next().await? {
        courses.push(row_to_course(&row)?);
    }
    Ok(courses)
}

async fn structured_list(db: &RosterDb) -> Result<Vec<Course>, DatabaseError> {
    let mut rows = db
        .query(&format!("SELECT {COURSE_COLS} FROM courses ORDER BY name"), ())
        .await?;
    collect_courses(&mut rows).await
}

async fn structured_by_program(
    db: &RosterDb,
    program_id: i64,
) -> Result<Vec<Course>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {COURSE_COLS} FROM courses WHERE program_id = ?1 ORDER BY name"),
            [program_id],
        )
        .await?;
    collect_courses(&mut rows).await
}

async fn structured_get(db: &RosterDb, id: i64) -> Result<Option<Course>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {COURSE_COLS} FROM courses WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_course(&row)?)),
        None => Ok(None),
    }
}

impl RosterService {
    /// Create a course under a program, optionally linked to a term. The
    /// name is trimmed before storage.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank name or negative
    /// hours, or a driver error if the insert fails.
    pub async fn add_course(
        &self,
        name: &str,
        hours: Option<f64>,
        program_id: i64,
        term_id: Option<i64>,
    ) -> Result<Course, DatabaseError> {
        let name = require_name("course name", name)?;
        let hours = require_optional_hours("course hours", hours)?;

        self.db()
            .execute(
                "INSERT INTO courses (name, hours, program_id, term_id) VALUES (?1, ?2, ?3, ?4)",
                libsql::params![name.as_str(), hours, program_id, term_id],
            )
            .await?;

        Ok(Course {
            id: self.db().last_insert_rowid(),
            name,
            hours,
            program_id,
            term_id,
            term_name: None,
        })
    }

    /// List all courses, ordered by name. Term fields carry whatever the
    /// winning read produced; single-course fetches do the deeper link
    /// resolution.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn list_courses(&self) -> Result<Vec<Course>, DatabaseError> {
        match structured_list(self.db()).await {
            Ok(courses) => Ok(courses),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured course list drifted, engaging fallback: {e}");
                Ok(run_chain(self.db().conn(), COURSE_LIST_TIERS, || (), materialize_course).await)
            }
            Err(e) => Err(e),
        }
    }

    /// List the courses of one program, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn courses_by_program(&self, program_id: i64) -> Result<Vec<Course>, DatabaseError> {
        match structured_by_program(self.db(), program_id).await {
            Ok(courses) => Ok(courses),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured program-course list drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    COURSE_BY_PROGRAM_TIERS,
                    || [program_id],
                    materialize_course,
                )
                .await)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one course by id, with the term link filled in from wherever
    /// this store keeps it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_course(&self, id: i64) -> Result<Option<Course>, DatabaseError> {
        let course = match structured_get(self.db(), id).await {
            Ok(course) => course,
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured course get drifted, engaging fallback: {e}");
                run_chain(self.db().conn(), COURSE_GET_TIERS, || [id], materialize_course)
                    .await
                    .into_iter()
                    .next()
            }
            Err(e) => return Err(e),
        };

        let Some(mut course) = course else {
            return Ok(None);
        };
        self.attach_term(&mut course).await;
        Ok(Some(course))
    }

    /// Fetch one course bundled with its workload assignments. This is
    /// the read behind `roster course show`: the course fetch resolves
    /// the term link and the workload list inherits all workload-read
    /// drift tolerance.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_course_with_workloads(
        &self,
        id: i64,
    ) -> Result<Option<CourseWithWorkloads>, DatabaseError> {
        let Some(course) = self.get_course(id).await? else {
            return Ok(None);
        };

        let workloads = self.workloads_by_course(course.id).await?;
        Ok(Some(CourseWithWorkloads { course, workloads }))
    }

    /// Delete a course. Returns `false` when no row matched or when
    /// workloads still reference it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than a constraint conflict.
    pub async fn delete_course(&self, id: i64) -> Result<bool, DatabaseError> {
        match self
            .db()
            .execute("DELETE FROM courses WHERE id = ?1", [id])
            .await
        {
            Ok(n) => Ok(n > 0),
            Err(DatabaseError::Driver(e)) if is_constraint_violation(&e) => {
                tracing::warn!("course {id} is still referenced, delete refused: {e}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Fill in whatever part of the term link this store can provide.
    /// Never fails: an unresolvable link leaves the fields unset.
    async fn attach_term(&self, course: &mut Course) {
        match course.term_id {
            Some(term_id) if course.term_name.is_none() => {
                course.term_name = term_name_map(self.db().conn()).await.remove(&term_id);
            }
            None => {
                if let Some(term) = resolve_term_ref(self.db().conn(), course.id).await {
                    course.term_id = Some(term.term_id);
                    course.term_name = term.name;
                }
            }
            Some(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixtures::{
        GENERATION_A_DDL, GENERATION_C_DDL, MID_MIGRATION_DDL, drifted_service, test_service,
    };
    use pretty_assertions::assert_eq;

    async fn seeded() -> (RosterService, i64) {
        let svc = test_service().await;
        let school = svc.add_school("Science").await.unwrap();
        let dept = svc.add_department("Computing", school.id).await.unwrap();
        let program = svc.add_program("Computer Science", dept.id).await.unwrap();
        (svc, program.id)
    }

    #[tokio::test]
    async fn add_and_get_course_with_term() {
        let (svc, program_id) = seeded().await;
        let term = svc
            .add_term(
                "Fall 2025",
                chrono::NaiveDate::from_ymd_opt(2025, 8, 25).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2025, 12, 12).unwrap(),
            )
            .await
            .unwrap();

        let course = svc
            .add_course("Databases", Some(3.0), program_id, Some(term.id))
            .await
            .unwrap();
        assert_eq!(course.term_name, None, "write path does not resolve names");

        let fetched = svc.get_course(course.id).await.unwrap().unwrap();
        assert_eq!(fetched.hours, Some(3.0));
        assert_eq!(fetched.term_id, Some(term.id));
        assert_eq!(fetched.term_name.as_deref(), Some("Fall 2025"));
    }

    #[tokio::test]
    async fn add_course_rejects_negative_hours() {
        let (svc, program_id) = seeded().await;

        let err = svc
            .add_course("Databases", Some(-1.0), program_id, None)
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(_)));
        assert!(svc.list_courses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn courses_by_program_filters() {
        let (svc, program_id) = seeded().await;
        let dept_id = svc.list_departments().await.unwrap()[0].id;
        let other = svc.add_program("Data Science", dept_id).await.unwrap();

        svc.add_course("Databases", None, program_id, None).await.unwrap();
        svc.add_course("Statistics", None, other.id, None).await.unwrap();

        let names: Vec<String> = svc
            .courses_by_program(program_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Databases".to_string()]);
    }

    #[tokio::test]
    async fn get_course_with_workloads_bundles_assignments() {
        let (svc, program_id) = seeded().await;
        let course = svc
            .add_course("Databases", Some(3.0), program_id, None)
            .await
            .unwrap();
        let other = svc
            .add_course("Networks", None, program_id, None)
            .await
            .unwrap();
        svc.add_faculty("jdoe@example.edu", "Jo", "Doe", "555-0101", None)
            .await
            .unwrap();
        svc.add_workload(
            course.id,
            "jdoe@example.edu",
            "001",
            Some(3.0),
            roster_core::enums::CourseType::Lecture,
        )
        .await
        .unwrap();
        svc.add_workload(
            course.id,
            "jdoe@example.edu",
            "002",
            None,
            roster_core::enums::CourseType::Lab,
        )
        .await
        .unwrap();
        svc.add_workload(
            other.id,
            "jdoe@example.edu",
            "003",
            None,
            roster_core::enums::CourseType::Lab,
        )
        .await
        .unwrap();

        let bundle = svc
            .get_course_with_workloads(course.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(bundle.course.name, "Databases");

        let sections: Vec<String> = bundle.workloads.into_iter().map(|w| w.section).collect();
        assert_eq!(sections, vec!["001".to_string(), "002".to_string()]);

        assert_eq!(svc.get_course_with_workloads(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn legacy_store_hours_are_coerced_and_corrupt_rows_skipped() {
        let svc = drifted_service(GENERATION_A_DDL).await;
        svc.db()
            .conn()
            .execute_batch(
                "INSERT INTO term VALUES (4, 'Fall 2019');
                 INSERT INTO courses VALUES (1, 'Databases', '3', 1, 4);
                 INSERT INTO courses VALUES (2, 'Networks', 'N/A', 1, NULL);
                 INSERT INTO courses VALUES ('broken', 'Ghost', '3', 1, NULL);",
            )
            .await
            .unwrap();

        let courses = svc.list_courses().await.unwrap();
        assert_eq!(courses.len(), 2, "the corrupt-id row is dropped");
        assert_eq!(courses[0].name, "Databases");
        assert_eq!(courses[0].hours, Some(3.0));
        assert_eq!(courses[1].name, "Networks");
        assert_eq!(courses[1].hours, None);
    }

    #[tokio::test]
    async fn legacy_store_get_course_resolves_term_from_course_side() {
        let svc = drifted_service(GENERATION_A_DDL).await;
        svc.db()
            .conn()
            .execute_batch(
                "INSERT INTO term VALUES (4, 'Fall 2019');
                 INSERT INTO courses VALUES (1, 'Databases', '3', 1, 4);",
            )
            .await
            .unwrap();

        let course = svc.get_course(1).await.unwrap().unwrap();
        assert_eq!(course.term_id, Some(4));
        assert_eq!(course.term_name.as_deref(), Some("Fall 2019"));
    }

    #[tokio::test]
    async fn workload_term_store_recovers_link_via_join() {
        let svc = drifted_service(GENERATION_C_DDL).await;
        svc.db()
            .conn()
            .execute_batch(
                "INSERT INTO schools VALUES (1, 'Science');
                 INSERT INTO departments VALUES (1, 'Computing', 1);
                 INSERT INTO programs VALUES (1, 'Computer Science', 1);
                 INSERT INTO terms VALUES (7, 'Spring 2026', '2026-01-12', '2026-05-08');
                 INSERT INTO courses VALUES (10, 'Databases', 3.0, 1);
                 INSERT INTO faculty VALUES ('jdoe@example.edu', 'Jo', 'Doe', '555-0101', NULL);
                 INSERT INTO workloads VALUES (1, 10, 'jdoe@example.edu', '001', 3.0, 'lecture', 7);",
            )
            .await
            .unwrap();

        let courses = svc.list_courses().await.unwrap();
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].term_id, Some(7));
        assert_eq!(courses[0].term_name.as_deref(), Some("Spring 2026"));
    }

    #[tokio::test]
    async fn mid_migration_store_still_returns_core_fields() {
        let svc = drifted_service(MID_MIGRATION_DDL).await;
        svc.db()
            .conn()
            .execute_batch(
                "INSERT INTO programs VALUES (1, 'Computer Science', 1);
                 INSERT INTO courses VALUES (10, 'Databases', 3.0, 1);",
            )
            .await
            .unwrap();

        let course = svc.get_course(10).await.unwrap().unwrap();
        assert_eq!(course.name, "Databases");
        assert_eq!(course.hours, Some(3.0));
        assert_eq!(course.term_id, None);
        assert_eq!(course.term_name, None);
    }
}
