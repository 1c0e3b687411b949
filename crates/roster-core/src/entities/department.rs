use serde::{Deserialize, Serialize};

/// A department within one school. Owns programs of study.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Department {
    pub id: i64,
    pub name: String,
    pub school_id: i64,
}
