//! Domain model for plan sequences and timeline layout values.
//!
//! # Responsibility
//! - Define the activity record owned by the caller's ordered sequence.
//! - Define the immutable values produced by the layout engine.
//!
//! # Invariants
//! - Sequence order is load-bearing: it alone defines dependency chaining.
//! - Timeline units and bar geometry are derived values, never stored.

pub mod activity;
pub mod timeline;
