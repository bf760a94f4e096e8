//! Unified error types for Quince.
//!
//! This module provides the single error type returned by every fallible
//! builder operation, along with its `Result` alias.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
