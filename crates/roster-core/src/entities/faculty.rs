use serde::{Deserialize, Serialize};

/// A faculty member, identified by email rather than a surrogate id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Faculty {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone_number: String,
    pub workload_category_id: Option<i64>,
}
