//! Common types and utilities shared across modules.
//!
//! This module provides the unified error type and the low-level text and
//! number helpers the table renderer is built on.

// Submodule declarations
pub mod error;
pub mod number;
pub mod text;

// Re-exports for convenience
pub use error::{Error, Result};
