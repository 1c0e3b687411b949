//! Enums shared across Roster crates.
//!
//! Storage strings are snake_case via `#[serde(rename_all = "snake_case")]`
//! and mirrored by `as_str`/`parse` so the database layer never goes through
//! serde for a plain column value.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Delivery format of a course section, carried on each workload row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CourseType {
    Lecture,
    Lab,
    Seminar,
    Online,
}

impl CourseType {
    /// The string stored in the `course_type` column.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Lecture => "lecture",
            Self::Lab => "lab",
            Self::Seminar => "seminar",
            Self::Online => "online",
        }
    }

    /// Parse a stored string back into the enum. Unknown strings yield `None`
    /// rather than an error so callers can decide whether that is a fault.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lecture" => Some(Self::Lecture),
            "lab" => Some(Self::Lab),
            "seminar" => Some(Self::Seminar),
            "online" => Some(Self::Online),
            _ => None,
        }
    }
}

impl fmt::Display for CourseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn course_type_roundtrips_through_storage_string() {
        for ct in [
            CourseType::Lecture,
            CourseType::Lab,
            CourseType::Seminar,
            CourseType::Online,
        ] {
            assert_eq!(CourseType::parse(ct.as_str()), Some(ct));
        }
    }

    #[test]
    fn course_type_parse_tolerates_case_and_whitespace() {
        assert_eq!(CourseType::parse(" Lecture "), Some(CourseType::Lecture));
        assert_eq!(CourseType::parse("LAB"), Some(CourseType::Lab));
    }

    #[test]
    fn course_type_parse_rejects_unknown() {
        assert_eq!(CourseType::parse("studio"), None);
        assert_eq!(CourseType::parse(""), None);
    }
}
