//! Persistence layer for planner collections.
//!
//! # Responsibility
//! - Define the key-value backend contract and its SQLite implementation.
//! - Provide typed, ordered collections on top of that backend.
//!
//! # Invariants
//! - Backend transport failures surface as `RepoError`.
//! - Unreadable stored values never surface as errors; they read as empty.

pub mod collection_repo;
pub mod kv_repo;
