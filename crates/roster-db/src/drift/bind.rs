//! Declared-field binding for transitional columns.
//!
//! Some columns exist only in certain schema generations (a course's
//! `term_id`, a term name recovered via join). Rather than reflecting over
//! record shapes at run time, each record type declares which fields may be
//! bound dynamically and how. Binding a name the record doesn't declare, or
//! a value of the wrong class, is a silent no-op — that is the
//! forward/backward compatibility contract. Binding never errors.

use roster_core::entities::{Course, Workload};

use crate::drift::coerce::{BoundValue, coerce_value};
use crate::drift::row::value_by_name;

/// One dynamically-bindable field of a record: its column name and an
/// assignment that accepts only compatible value classes.
pub struct OptionalField<R> {
    pub name: &'static str,
    pub assign: fn(&mut R, BoundValue) -> bool,
}

/// Record types that declare their dynamically-bindable fields.
///
/// The `'static` bound is required for the field table itself: a
/// `&'static [OptionalField<Self>]` is only well-formed when `Self`
/// outlives it.
pub trait OptionalFields: Sized + 'static {
    const FIELDS: &'static [OptionalField<Self>];
}

/// Assign `value` to the record's declared field named `name`
/// (case-insensitive). Returns whether an assignment happened; unknown
/// names and incompatible value classes return `false`.
pub fn bind_optional<R: OptionalFields>(record: &mut R, name: &str, value: BoundValue) -> bool {
    R::FIELDS
        .iter()
        .find(|field| field.name.eq_ignore_ascii_case(name))
        .is_some_and(|field| (field.assign)(record, value))
}

/// Sweep a raw row over every field the record declares: each declared
/// column that is present and coercible gets bound, the rest stay unset.
pub fn bind_row_fields<R: OptionalFields>(record: &mut R, row: &libsql::Row) {
    for field in R::FIELDS {
        if let Some(value) = value_by_name(row, field.name).and_then(|v| coerce_value(&v)) {
            (field.assign)(record, value);
        }
    }
}

fn assign_course_term_id(course: &mut Course, value: BoundValue) -> bool {
    match value {
        BoundValue::Integer(id) => {
            course.term_id = Some(id);
            true
        }
        BoundValue::Real(_) | BoundValue::Text(_) => false,
    }
}

fn assign_course_term_name(course: &mut Course, value: BoundValue) -> bool {
    match value {
        BoundValue::Text(name) => {
            course.term_name = Some(name);
            true
        }
        BoundValue::Integer(_) | BoundValue::Real(_) => false,
    }
}

fn assign_course_hours(course: &mut Course, value: BoundValue) -> bool {
    match number_of(value) {
        Some(hours) => {
            course.hours = Some(hours);
            true
        }
        None => false,
    }
}

fn assign_workload_hours(workload: &mut Workload, value: BoundValue) -> bool {
    match number_of(value) {
        Some(hours) => {
            workload.hours = Some(hours);
            true
        }
        None => false,
    }
}

#[allow(clippy::cast_precision_loss)]
fn number_of(value: BoundValue) -> Option<f64> {
    match value {
        BoundValue::Integer(i) => Some(i as f64),
        BoundValue::Real(r) => Some(r),
        BoundValue::Text(_) => None,
    }
}

impl OptionalFields for Course {
    const FIELDS: &'static [OptionalField<Self>] = &[
        OptionalField {
            name: "term_id",
            assign: assign_course_term_id,
        },
        OptionalField {
            name: "term_name",
            assign: assign_course_term_name,
        },
        OptionalField {
            name: "hours",
            assign: assign_course_hours,
        },
    ];
}

impl OptionalFields for Workload {
    const FIELDS: &'static [OptionalField<Self>] = &[OptionalField {
        name: "hours",
        assign: assign_workload_hours,
    }];
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blank_course() -> Course {
        Course {
            id: 1,
            name: "Databases".into(),
            hours: None,
            program_id: 1,
            term_id: None,
            term_name: None,
        }
    }

    #[test]
    fn binds_declared_fields() {
        let mut course = blank_course();

        assert!(bind_optional(&mut course, "term_id", BoundValue::Integer(4)));
        assert!(bind_optional(&mut course, "term_name", BoundValue::Text("Fall".into())));
        assert!(bind_optional(&mut course, "hours", BoundValue::Integer(3)));

        assert_eq!(course.term_id, Some(4));
        assert_eq!(course.term_name.as_deref(), Some("Fall"));
        assert_eq!(course.hours, Some(3.0));
    }

    #[test]
    fn binding_is_case_insensitive() {
        let mut course = blank_course();
        assert!(bind_optional(&mut course, "TERM_ID", BoundValue::Integer(2)));
        assert_eq!(course.term_id, Some(2));
    }

    #[test]
    fn unknown_name_is_a_silent_noop() {
        let mut course = blank_course();
        assert!(!bind_optional(&mut course, "credits", BoundValue::Integer(3)));
        assert_eq!(course, blank_course());
    }

    #[test]
    fn incompatible_class_is_a_silent_noop() {
        let mut course = blank_course();
        assert!(!bind_optional(&mut course, "term_id", BoundValue::Text("four".into())));
        assert!(!bind_optional(&mut course, "hours", BoundValue::Text("N/A".into())));
        assert_eq!(course, blank_course());
    }

    #[test]
    fn workload_declares_only_hours() {
        let mut workload = Workload {
            id: 1,
            course_id: 1,
            faculty_email: "jdoe@example.edu".into(),
            section: "001".into(),
            hours: None,
            course_type: roster_core::enums::CourseType::Lecture,
        };

        assert!(bind_optional(&mut workload, "hours", BoundValue::Real(4.5)));
        assert!(!bind_optional(&mut workload, "term_id", BoundValue::Integer(1)));
        assert_eq!(workload.hours, Some(4.5));
    }
}
