use serde::{Deserialize, Serialize};

use crate::enums::CourseType;

/// An assignment of a faculty member to one section of a course.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Workload {
    pub id: i64,
    pub course_id: i64,
    pub faculty_email: String,
    pub section: String,
    pub hours: Option<f64>,
    pub course_type: CourseType,
}
