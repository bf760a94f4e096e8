//! Unified error types for Quince.
//!
//! Every fallible builder operation fails immediately with one of these
//! variants; no partial output is produced.
use thiserror::Error;

/// Main error type for Quince operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A column's length disagrees with the builder's established row count
    #[error("Invalid column length for '{column}': expected {expected} values, got {actual}")]
    LengthMismatch {
        column: String,
        expected: usize,
        actual: usize,
    },

    /// A derivation referenced a column that was never written
    #[error("Column '{0}' has not been populated")]
    ColumnNotPopulated(String),

    /// `merge` was called without any builders
    #[error("At least one builder is required to merge")]
    EmptyMergeSet,

    /// Options could not be loaded from or written to YAML
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for Quince operations.
pub type Result<T> = std::result::Result<T, Error>;
