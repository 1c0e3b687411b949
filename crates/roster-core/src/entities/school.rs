use serde::{Deserialize, Serialize};

/// A school — the root of the academic hierarchy. Owns departments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct School {
    pub id: i64,
    pub name: String,
}
