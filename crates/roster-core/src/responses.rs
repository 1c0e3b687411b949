//! Composite response types returned as JSON by `roster` commands.
//!
//! These structs define the shape of JSON output for commands that bundle
//! more than one entity, like `roster program show`.

use serde::{Deserialize, Serialize};

use crate::entities::{Course, ProgramOfStudy, Workload};

/// Response from `roster program show`: the program plus its courses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProgramWithCourses {
    pub program: ProgramOfStudy,
    pub courses: Vec<Course>,
}

/// Response from `roster course show`: the course plus its workloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CourseWithWorkloads {
    pub course: Course,
    pub workloads: Vec<Workload>,
}
