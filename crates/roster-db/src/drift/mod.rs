//! Drift-tolerant read machinery.
//!
//! Read operations map one schema generation (the one shipped in
//! `migrations/`) but must keep working against stores that are a
//! generation older or newer, as happens while another deployment rolls a
//! migration out. Every read follows the same shape:
//!
//! 1. Run the mapped query with its fixed column list ([`crate::repos`]).
//! 2. On failure, [`classify`] decides whether the error is schema drift.
//!    Anything unclassified propagates unchanged.
//! 3. Classified drift hands the logical request to its fallback chain
//!    ([`tiers`]): ordered raw query variants of decreasing specificity,
//!    materialized defensively by name ([`row`]) with loose-type coercion
//!    ([`coerce`]) and declared-field binding ([`bind`]).
//!
//! The chain absorbs drift; it never invents errors. An exhausted chain is
//! an empty result.

pub mod bind;
pub mod classify;
pub mod coerce;
pub mod row;
pub mod term;
pub mod tiers;
