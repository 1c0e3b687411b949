//! Service layer hosting all repository operations.
//!
//! `RosterService` wraps `RosterDb`; repo methods are implemented as
//! `impl RosterService` blocks, one module per entity under
//! [`crate::repos`]. Writes validate synchronously and run as single
//! atomic statements; reads go through the drift-tolerant core.

use crate::RosterDb;
use crate::error::DatabaseError;

/// Orchestrates validated writes and drift-tolerant reads.
pub struct RosterService {
    db: RosterDb,
}

impl RosterService {
    /// Create a service owning the schema at `db_path` (migrates on open).
    ///
    /// # Arguments
    ///
    /// * `db_path` — Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = RosterDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create a service over a store whose schema is owned by another
    /// deployment. No migrations run; reads tolerate whatever generation
    /// the store is at.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn attach_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = RosterDb::attach_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `RosterDb` (for testing).
    #[must_use]
    pub const fn from_db(db: RosterDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &RosterDb {
        &self.db
    }
}
