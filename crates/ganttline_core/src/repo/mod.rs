//! Activity store abstractions.
//!
//! # Responsibility
//! - Define the ordered-sequence contract the plan service mutates.
//! - Provide the ephemeral in-memory implementation.
//!
//! # Invariants
//! - Store writes must enforce `Activity::validate()` before mutation.
//! - Store APIs return semantic errors (`NotFound`, `DuplicateId`).
//! - Nothing outlives the process; there is no persisted state.

pub mod activity_repo;
