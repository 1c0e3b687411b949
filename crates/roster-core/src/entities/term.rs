use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An academic term (semester).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Term {
    pub id: i64,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
