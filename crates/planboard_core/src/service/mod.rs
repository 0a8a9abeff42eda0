//! Planner use-case services.
//!
//! # Responsibility
//! - Turn raw user input into validated records before storage.
//! - Keep presentation layers decoupled from collection storage details.

pub mod calendar_service;
pub mod planner_service;
