//! Quince - A Rust library for building delimited text from columnar data
//!
//! This library assembles named columns of scalar values into CSV-style text.
//! Columns can be derived from other columns or from whole rows, annotated
//! with formatting options, concatenated or merged across builders, and
//! sorted before rendering.
//!
//! # Features
//!
//! - **Column-major store**: Insertion-ordered columns sharing one row count
//! - **Derived columns**: Per-value and per-row transforms
//! - **Formatting options**: Priority ordering, empty-value substitution,
//!   conditional column removal and per-column value transforms
//! - **Correct escaping**: Configurable separator, record terminator and
//!   field wrapper
//! - **Multi-level headers**: Column names split into stacked header rows
//! - **YAML configuration**: Builder and column options load from YAML
//!
//! # Example - Building a CSV
//!
//! ```rust
//! use quince::{CellValue, ColumnOptions, TableBuilder};
//!
//! # fn main() -> Result<(), quince::Error> {
//! let builder = TableBuilder::new()
//!     .create_column("Country", ["Hungary", "Spain"])?
//!     .create_column("Population", [9643000, 47780000])?
//!     .set_column_options("Country", ColumnOptions::new().with_priority(1))
//!     .set_column_options("Population", ColumnOptions::new().with_priority(2))
//!     .sort_columns()
//!     .sort_rows(|a, b| {
//!         let pa = a["Population"].as_f64().unwrap_or(0.0);
//!         let pb = b["Population"].as_f64().unwrap_or(0.0);
//!         pb.total_cmp(&pa)
//!     });
//!
//! assert_eq!(
//!     builder.to_csv_string(),
//!     "Country,Population\nSpain,47780000\nHungary,9643000"
//! );
//! assert_eq!(builder.column("Country").map(|c| c.len()), Some(2));
//! assert_eq!(builder.column("Population").unwrap()[0], CellValue::Int(47780000));
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Merging builders
//!
//! ```rust
//! use quince::TableBuilder;
//!
//! # fn main() -> Result<(), quince::Error> {
//! let first = TableBuilder::new().create_column("id", [1, 2])?;
//! let second = TableBuilder::new().create_column("id", [3])?;
//!
//! let merged = TableBuilder::merge([first, second])?;
//! assert_eq!(merged.to_csv_string(), "id\n1\n2\n3");
//! # Ok(())
//! # }
//! ```

/// Shared error type and text/number helpers
pub mod common;

/// Column-oriented table builder and renderer
///
/// This module provides [`TableBuilder`] along with its option types and
/// the escaping rules used to render delimited text.
pub mod table;

// Re-export commonly used types for convenience
pub use common::{Error, Result};
pub use table::{
    BuilderOptions, BuilderOptionsUpdate, CellValue, ColumnOptions, Dimensions, Row, TableBuilder,
    Transform, escape_field,
};
