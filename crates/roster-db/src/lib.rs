//! # roster-db
//!
//! libSQL database operations for Roster record management.
//!
//! Handles all relational state: schools, departments, programs, courses,
//! terms, workload categories, faculty, and workloads. Read operations go
//! through the drift-tolerant core in [`drift`], which keeps them working
//! when the backing store's schema diverges from the mapped one mid-migration.
//!
//! Uses the `libsql` crate (C `SQLite` fork, v0.9.29) — embedded local
//! databases with a stable async API.

pub mod drift;
pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;

pub mod test_support;

use error::DatabaseError;
use libsql::Builder;

/// Central database handle for all Roster state operations.
///
/// Wraps a libSQL database and connection. Opened in one of two modes:
/// [`RosterDb::open_local`] owns the schema and migrates it;
/// [`RosterDb::attach_local`] joins a store whose schema is managed by
/// another deployment and must be read as-is.
pub struct RosterDb {
    #[allow(dead_code)]
    db: libsql::Database,
    conn: libsql::Connection,
}

impl RosterDb {
    /// Open a local database at the given path, migrating it to the current
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let roster_db = Self::connect_local(path).await?;
        roster_db.run_migrations().await?;
        Ok(roster_db)
    }

    /// Open a local database at the given path without running migrations.
    ///
    /// Used when the schema is owned by another deployment: the store may be
    /// a generation older or newer than the one this build maps, and reads
    /// must tolerate the difference rather than "fix" it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn attach_local(path: &str) -> Result<Self, DatabaseError> {
        Self::connect_local(path).await
    }

    async fn connect_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;

        // Enable foreign keys (must be per-connection in SQLite)
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;

        Ok(Self { db, conn })
    }

    /// Access the underlying libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Run a SELECT and return the row cursor.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Driver` if preparation or execution fails.
    pub async fn query(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<libsql::Rows, DatabaseError> {
        Ok(self.conn.query(sql, params).await?)
    }

    /// Run a statement and return the number of affected rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Driver` if preparation or execution fails.
    pub async fn execute(
        &self,
        sql: &str,
        params: impl libsql::params::IntoParams,
    ) -> Result<u64, DatabaseError> {
        Ok(self.conn.execute(sql, params).await?)
    }

    /// Rowid assigned by the most recent successful INSERT on this connection.
    #[must_use]
    pub fn last_insert_rowid(&self) -> i64 {
        self.conn.last_insert_rowid()
    }
}
