use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An hour banding used to classify faculty load over a date range.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkloadCategory {
    pub id: i64,
    pub minimum_hours: f64,
    pub maximum_hours: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
