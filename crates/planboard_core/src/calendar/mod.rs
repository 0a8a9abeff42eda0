//! Month calendar generation.
//!
//! # Responsibility
//! - Track the displayed month as an explicit caller-owned cursor.
//! - Build week-row grids and flag days that carry scheduled tasks.
//!
//! # Invariants
//! - Weeks start on Sunday and always hold exactly 7 cells.
//! - Highlighting compares `YYYY-MM-DD` strings; no timezone conversion.

pub mod cursor;
pub mod grid;
