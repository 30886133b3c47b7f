//! Torsearch Core: shared error types.
//!
//! This crate provides the foundational types used across all torsearch
//! crates. It has no internal torsearch dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias

pub mod error;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
