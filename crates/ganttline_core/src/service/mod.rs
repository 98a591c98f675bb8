//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate store mutations and layout computation into editor APIs.
//! - Keep UI/FFI layers decoupled from engine and store details.

pub mod plan_service;
