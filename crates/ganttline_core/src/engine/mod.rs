//! Timeline scheduling and layout engine.
//!
//! # Responsibility
//! - Resolve start offsets from the positional dependency chain.
//! - Generate axis units for the selected time scale.
//! - Map activity spans onto pixel geometry.
//!
//! # Invariants
//! - Every function here is pure and total over its input domain.
//! - Callers recompute everything on each change; nothing is cached.

pub mod axis;
pub mod calendar;
pub mod geometry;
pub mod labels;
pub mod scheduler;

/// Length of one week unit in days.
pub const DAYS_PER_WEEK: u32 = 7;
