//! Term link resolution across schema generations.
//!
//! The course-to-term link is mid-migration: older stores keep `term_id`
//! on the course row, newer ones move it to the workload rows. Resolution
//! probes the known link locations in order and takes the first hit; a
//! location whose column doesn't exist in this store simply falls through.
//! Term names come from a multi-source map that tolerates the table's old
//! singular spelling.

use std::collections::HashMap;

use crate::drift::coerce::coerce_integer;
use crate::drift::row::{integer_by_name, text_by_name, value_by_name};
use crate::drift::tiers::{QueryTier, run_chain};

/// A resolved course-to-term link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRef {
    pub term_id: i64,
    pub name: Option<String>,
}

/// Known locations of the term link, probed in order.
struct TermLinkLocation {
    name: &'static str,
    sql: &'static str,
}

const TERM_LINK_LOCATIONS: &[TermLinkLocation] = &[
    TermLinkLocation {
        name: "course",
        sql: "SELECT term_id FROM courses WHERE id = ?1",
    },
    TermLinkLocation {
        name: "workload",
        sql: "SELECT term_id FROM workloads WHERE course_id = ?1 AND term_id IS NOT NULL LIMIT 1",
    },
];

/// Table-spelling variants for the term-name lookup. Both are
/// try-next-variant tiers: the first one returning a non-empty set wins,
/// and a store with neither spelling yields an empty map.
const TERM_NAME_TIERS: &[QueryTier] = &[
    QueryTier {
        name: "terms",
        sql: "SELECT id, name FROM terms",
        advance_on_empty: true,
    },
    QueryTier {
        name: "term",
        sql: "SELECT id, name FROM term",
        advance_on_empty: true,
    },
];

/// Map of term id to display name, from whichever spelling of the term
/// table this store has. Names come back trimmed; on duplicate ids the
/// first occurrence wins. Never errors — an unreadable store is an empty
/// map.
pub async fn term_name_map(conn: &libsql::Connection) -> HashMap<i64, String> {
    let pairs = run_chain(conn, TERM_NAME_TIERS, || (), |row| {
        let id = integer_by_name(row, "id")?;
        let name = text_by_name(row, "name")?;
        Some((id, name))
    })
    .await;

    let mut map = HashMap::with_capacity(pairs.len());
    for (id, name) in pairs {
        map.entry(id).or_insert(name);
    }
    map
}

/// Resolve the term link for one course, wherever this store keeps it.
/// `None` when no location holds a value (including a store where neither
/// location's column exists).
pub async fn resolve_term_ref(conn: &libsql::Connection, course_id: i64) -> Option<TermRef> {
    let term_id = probe_term_link(conn, course_id).await?;
    let name = term_name_map(conn).await.remove(&term_id);
    Some(TermRef { term_id, name })
}

async fn probe_term_link(conn: &libsql::Connection, course_id: i64) -> Option<i64> {
    for location in TERM_LINK_LOCATIONS {
        let mut rows = match conn.query(location.sql, [course_id]).await {
            Ok(rows) => rows,
            Err(e) => {
                tracing::debug!("term link location '{}' unavailable: {e}", location.name);
                continue;
            }
        };
        let Ok(Some(row)) = rows.next().await else {
            continue;
        };
        if let Some(term_id) = value_by_name(&row, "term_id").and_then(|v| coerce_integer(&v)) {
            return Some(term_id);
        }
    }
    None
}
