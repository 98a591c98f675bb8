//! Flutter-facing bindings over `ganttline_core`.
//!
//! Functions in [`api`] are the only surface exposed to Dart.

pub mod api;
