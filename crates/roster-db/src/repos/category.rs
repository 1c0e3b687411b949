//! Workload-category repository. A category is an hour banding over a
//! date range; faculty members reference one.

use chrono::NaiveDate;
use roster_core::entities::WorkloadCategory;
use roster_core::errors::ValidationError;
use roster_core::validate::{require_date_order, require_non_negative};

use crate::RosterDb;
use crate::drift::classify::is_drift_error;
use crate::drift::row::{integer_by_name, number_by_name, text_by_name};
use crate::drift::tiers::{QueryTier, run_chain};
use crate::error::{DatabaseError, is_constraint_violation};
use crate::helpers::{get_integer, get_number, get_text, parse_date};
use crate::service::RosterService;

const CATEGORY_COLS: &str = "id, minimum_hours, maximum_hours, start_date, end_date";

const CATEGORY_LIST_TIERS: &[QueryTier] = &[QueryTier {
    name: "workload categories",
    sql: "SELECT id, minimum_hours, maximum_hours, start_date, end_date
          FROM workload_categories ORDER BY start_date, minimum_hours",
    advance_on_empty: false,
}];

const CATEGORY_GET_TIERS: &[QueryTier] = &[QueryTier {
    name: "workload category by id",
    sql: "SELECT id, minimum_hours, maximum_hours, start_date, end_date
          FROM workload_categories WHERE id = ?1",
    advance_on_empty: false,
}];

fn row_to_category(row: &libsql::Row) -> Result<WorkloadCategory, DatabaseError> {
    Ok(WorkloadCategory {
        id: get_integer(row, 0, "id")?,
        minimum_hours: get_number(row, 1, "minimum_hours")?,
        maximum_hours: get_number(row, 2, "maximum_hours")?,
        start_date: parse_date(&get_text(row, 3, "start_date")?)?,
        end_date: parse_date(&get_text(row, 4, "end_date")?)?,
    })
}

fn materialize_category(row: &libsql::Row) -> Option<WorkloadCategory> {
    Some(WorkloadCategory {
        id: integer_by_name(row, "id")?,
        minimum_hours: number_by_name(row, "minimum_hours")?,
        maximum_hours: number_by_name(row, "maximum_hours")?,
        start_date: parse_date(&text_by_name(row, "start_date")?).ok()?,
        end_date: parse_date(&text_by_name(row, "end_date")?).ok()?,
    })
}

async fn structured_list(db: &RosterDb) -> Result<Vec<WorkloadCategory>, DatabaseError> {
    let mut rows = db
        .query(
            &format!(
                "SELECT {CATEGORY_COLS} FROM workload_categories ORDER BY start_date, minimum_hours"
            ),
            (),
        )
        .await?;
    let mut categories = Vec::new();
    while let Some(row) = rows.next().await? {
        categories.push(row_to_category(&row)?);
    }
    Ok(categories)
}

async fn structured_get(db: &RosterDb, id: i64) -> Result<Option<WorkloadCategory>, DatabaseError> {
    let mut rows = db
        .query(
            &format!("SELECT {CATEGORY_COLS} FROM workload_categories WHERE id = ?1"),
            [id],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_category(&row)?)),
        None => Ok(None),
    }
}

impl RosterService {
    /// Create a workload category. Bounds must be non-negative with
    /// `maximum >= minimum`; the end date must fall strictly after the
    /// start date.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` when a bound or the date range
    /// is rejected, or a driver error if the insert fails.
    pub async fn add_category(
        &self,
        minimum_hours: f64,
        maximum_hours: f64,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<WorkloadCategory, DatabaseError> {
        let minimum_hours = require_non_negative("minimum hours", minimum_hours)?;
        let maximum_hours = require_non_negative("maximum hours", maximum_hours)?;
        if maximum_hours < minimum_hours {
            return Err(ValidationError::Invalid {
                field: "maximum hours",
                reason: format!("must be at least the minimum ({minimum_hours})"),
            }
            .into());
        }
        require_date_order("category dates", start_date, end_date)?;

        self.db()
            .execute(
                "INSERT INTO workload_categories (minimum_hours, maximum_hours, start_date, end_date)
                 VALUES (?1, ?2, ?3, ?4)",
                libsql::params![
                    minimum_hours,
                    maximum_hours,
                    start_date.to_string(),
                    end_date.to_string()
                ],
            )
            .await?;

        Ok(WorkloadCategory {
            id: self.db().last_insert_rowid(),
            minimum_hours,
            maximum_hours,
            start_date,
            end_date,
        })
    }

    /// List all workload categories, ordered by start date then lower
    /// bound.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn list_categories(&self) -> Result<Vec<WorkloadCategory>, DatabaseError> {
        match structured_list(self.db()).await {
            Ok(categories) => Ok(categories),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured category list drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    CATEGORY_LIST_TIERS,
                    || (),
                    materialize_category,
                )
                .await)
            }
            Err(e) => Err(e),
        }
    }

    /// Fetch one workload category by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than schema drift.
    pub async fn get_category(&self, id: i64) -> Result<Option<WorkloadCategory>, DatabaseError> {
        match structured_get(self.db(), id).await {
            Ok(category) => Ok(category),
            Err(e) if is_drift_error(&e) => {
                tracing::warn!("structured category get drifted, engaging fallback: {e}");
                Ok(run_chain(
                    self.db().conn(),
                    CATEGORY_GET_TIERS,
                    || [id],
                    materialize_category,
                )
                .await
                .into_iter()
                .next())
            }
            Err(e) => Err(e),
        }
    }

    /// Delete a workload category. Returns `false` when no row matched
    /// or when faculty still reference it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` for faults other than a constraint conflict.
    pub async fn delete_category(&self, id: i64) -> Result<bool, DatabaseError> {
        match self
            .db()
            .execute("DELETE FROM workload_categories WHERE id = ?1", [id])
            .await
        {
            Ok(n) => Ok(n > 0),
            Err(DatabaseError::Driver(e)) if is_constraint_violation(&e) => {
                tracing::warn!("workload category {id} is still referenced, delete refused: {e}");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }
}
