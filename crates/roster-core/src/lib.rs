//! # roster-core
//!
//! Core types for the Roster record-management system.
//!
//! This crate provides the foundational pieces shared across all Roster crates:
//! - Entity structs for the academic hierarchy (schools, departments, programs,
//!   courses) and the staffing side (faculty, workloads, terms, categories)
//! - The `CourseType` enum with its storage string mapping
//! - Synchronous validation that runs before any persistence attempt
//! - Cross-cutting error types
//! - Composite response shapes returned by the CLI

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
pub mod validate;
