use serde::{Deserialize, Serialize};

/// A program of study within one department. Owns courses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProgramOfStudy {
    pub id: i64,
    pub name: String,
    pub department_id: i64,
}
