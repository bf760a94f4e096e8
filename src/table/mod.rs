//! Column-oriented builder for delimited text output.
//!
//! A [`TableBuilder`] collects named columns, derives new ones from existing
//! values or whole rows, carries per-column and builder-wide formatting
//! options, and finally renders everything as one CSV-style string.
//!
//! # Example
//!
//! ```rust
//! use quince::{BuilderOptionsUpdate, ColumnOptions, TableBuilder};
//!
//! let builder = TableBuilder::new()
//!     .create_column("city.name", ["Budapest", "Warsaw"])?
//!     .create_column("city.river", [Some("Danube"), None])?
//!     .set_column_options("city.river", ColumnOptions::new().with_empty_value(Some("N/A")))
//!     .set_builder_options(BuilderOptionsUpdate::new().with_header_separator(Some(".")));
//!
//! let (csv, dims) = builder.string_and_dimensions();
//! assert_eq!(csv, "city,city\nname,river\nBudapest,Danube\nWarsaw,N/A");
//! assert_eq!((dims.n_rows, dims.n_cols), (4, 2));
//! # Ok::<(), quince::Error>(())
//! ```
//!
//! # Output format
//!
//! - **Separator / record terminator**: configurable strings (`,` and `\n`)
//! - **Quoting**: the field wrapper (`"`) is doubled inside a field, and a
//!   field is wrapped whenever it contains the wrapper, the terminator or
//!   the separator
//! - **Multi-level headers**: column names are split on the header
//!   separator into stacked, column-aligned header rows
//! - **Missing values**: `Null`/`Absent` cells render as the column's empty
//!   value, falling back to the builder's

// Submodule declarations
pub mod builder;
pub mod options;
pub mod render;
pub mod row;
pub mod types;

// Re-exports
pub use builder::{ColumnData, ColumnOptionsMap, TableBuilder};
pub use options::{
    BuilderOptions, BuilderOptionsUpdate, ColumnOptions, DEFAULT_EMPTY_VALUE, DEFAULT_EOL,
    DEFAULT_FIELD_WRAPPER, DEFAULT_SEPARATOR, Transform,
};
pub use render::escape_field;
pub use row::Row;
pub use types::{CellValue, Dimensions};
