//! Repository modules implementing the operations for all Roster entities.
//!
//! Each module adds methods to `RosterService` via `impl RosterService`
//! blocks. Writes validate first and run as single statements against the
//! mapped schema; reads attempt the mapped schema and fall back to the
//! module's tier chain when the store has drifted.

pub mod category;
pub mod course;
pub mod department;
pub mod faculty;
pub mod program;
pub mod school;
pub mod term;
pub mod workload;
