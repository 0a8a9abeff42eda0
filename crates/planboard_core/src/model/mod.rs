//! Planner domain model.
//!
//! # Responsibility
//! - Define the record shapes stored in each collection.
//! - Name the persisted collections and bind each to its record type.
//!
//! # Invariants
//! - Every stored record is wrapped in an `Entry` carrying a stable id.
//! - Collection key strings are the persisted storage keys and never change.

pub mod collection;
pub mod record;
