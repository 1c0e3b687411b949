use serde::{Deserialize, Serialize};

/// A course offered by a program of study.
///
/// `term_id` is schema-transitional: older stores keep the term link on the
/// course row, newer ones move it to the workload row. `term_name` is never a
/// stored column on every schema generation — the read layer attaches it
/// opportunistically (join recovery or term-name map) and `None` means
/// "unknown", not "no term".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Course {
    pub id: i64,
    pub name: String,
    pub hours: Option<f64>,
    pub program_id: i64,
    pub term_id: Option<i64>,
    pub term_name: Option<String>,
}
