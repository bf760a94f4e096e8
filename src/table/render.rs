//! Rendering of a column store into delimited text.
//!
//! Rendering is a pure function of the column store, the per-column options
//! and the builder options:
//!
//! 1. Columns flagged for removal (builder-wide or per column) are dropped
//!    when every value is missing.
//! 2. Column names are split on the header separator into stacked header
//!    lines, padded with empty cells where a name has fewer parts.
//! 3. Every header and data cell is escaped: field wrappers are doubled, and
//!    the cell is wrapped when it contains the wrapper, the record terminator
//!    or the separator.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::borrow::Cow;
use tracing::{debug, trace};

use super::options::{BuilderOptions, ColumnOptions};
use super::types::{CellValue, Dimensions};
use crate::common::text::{contains, double_occurrences};

/// A column that survived empty-column filtering.
#[derive(Debug)]
struct VisibleColumn<'a> {
    values: &'a [CellValue],
    options: Option<&'a ColumnOptions>,
    header: SmallVec<[&'a str; 4]>,
}

/// Visible columns and the number of header lines they produce.
#[derive(Debug)]
struct Layout<'a> {
    columns: Vec<VisibleColumn<'a>>,
    header_lines: usize,
}

/// Borrowed snapshot of a builder, ready to render.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Renderer<'a> {
    data: &'a IndexMap<String, Vec<CellValue>>,
    column_options: &'a IndexMap<String, ColumnOptions>,
    options: &'a BuilderOptions,
    row_count: usize,
}

impl<'a> Renderer<'a> {
    pub(crate) fn new(
        data: &'a IndexMap<String, Vec<CellValue>>,
        column_options: &'a IndexMap<String, ColumnOptions>,
        options: &'a BuilderOptions,
        row_count: usize,
    ) -> Self {
        Self {
            data,
            column_options,
            options,
            row_count,
        }
    }

    /// Render the header block followed by the data rows.
    pub(crate) fn render(&self) -> String {
        self.render_layout(&self.layout())
    }

    pub(crate) fn dimensions(&self) -> Dimensions {
        Self::dimensions_of(&self.layout(), self.row_count)
    }

    /// Render and measure from the same layout.
    pub(crate) fn render_with_dimensions(&self) -> (String, Dimensions) {
        let layout = self.layout();
        (self.render_layout(&layout), Self::dimensions_of(&layout, self.row_count))
    }

    fn dimensions_of(layout: &Layout<'_>, row_count: usize) -> Dimensions {
        if layout.columns.is_empty() {
            return Dimensions::default();
        }
        Dimensions::new(row_count + layout.header_lines, layout.columns.len())
    }

    fn layout(&self) -> Layout<'a> {
        let header_separator = self
            .options
            .header_separator
            .as_deref()
            .filter(|sep| !sep.is_empty());

        let mut dropped = 0usize;
        let columns: Vec<VisibleColumn<'a>> = self
            .data
            .iter()
            .filter_map(|(name, values)| {
                let options = self.column_options.get(name);
                let removable = self.options.remove_empty_columns
                    || options.and_then(|o| o.remove_if_empty).unwrap_or(false);
                if removable && values.iter().all(CellValue::is_missing) {
                    dropped += 1;
                    return None;
                }

                let header = match header_separator {
                    Some(sep) => name.split(sep).collect(),
                    None => SmallVec::from_elem(name.as_str(), 1),
                };
                Some(VisibleColumn {
                    values,
                    options,
                    header,
                })
            })
            .collect();

        if dropped > 0 {
            debug!(dropped, kept = columns.len(), "Dropped empty columns");
        }

        let header_lines = columns.iter().map(|c| c.header.len()).max().unwrap_or(0);
        Layout {
            columns,
            header_lines,
        }
    }

    fn render_layout(&self, layout: &Layout<'a>) -> String {
        if layout.columns.is_empty() {
            return String::new();
        }

        let separator = self.options.separator.as_str();
        let eol = self.options.eol.as_str();
        let mut out = String::new();

        for line in 0..layout.header_lines {
            for (col_idx, column) in layout.columns.iter().enumerate() {
                if col_idx > 0 {
                    out.push_str(separator);
                }
                self.write_cell(&mut out, column.header.get(line).copied().unwrap_or(""));
            }
            out.push_str(eol);
        }

        for row_idx in 0..self.row_count {
            if row_idx > 0 {
                out.push_str(eol);
            }
            for (col_idx, column) in layout.columns.iter().enumerate() {
                if col_idx > 0 {
                    out.push_str(separator);
                }
                let text = self.cell_text(column, row_idx);
                self.write_cell(&mut out, &text);
            }
        }

        trace!(
            columns = layout.columns.len(),
            rows = self.row_count,
            header_lines = layout.header_lines,
            bytes = out.len(),
            "Rendered table"
        );
        out
    }

    /// Text of one data cell before escaping.
    fn cell_text(&self, column: &VisibleColumn<'a>, index: usize) -> Cow<'a, str> {
        let value = column.values.get(index).unwrap_or(&CellValue::Absent);

        // Transforms see every raw value, missing ones included
        if let Some(transform) = column.options.and_then(|o| o.transform.as_ref()) {
            return match transform.apply(value, index, column.values) {
                Some(text) => Cow::Owned(text),
                None => Cow::Borrowed(self.options.empty_text(column.options)),
            };
        }

        match value {
            CellValue::Absent | CellValue::Null => {
                Cow::Borrowed(self.options.empty_text(column.options))
            },
            CellValue::String(s) => Cow::Borrowed(s.as_str()),
            other => {
                let mut buf = String::new();
                other.write_text(&mut buf);
                Cow::Owned(buf)
            },
        }
    }

    fn write_cell(&self, out: &mut String, text: &str) {
        write_escaped(out, text, self.options);
    }
}

/// Append `text` to `out` as one escaped field.
pub(crate) fn write_escaped(out: &mut String, text: &str, options: &BuilderOptions) {
    let wrapper = options.field_wrapper.as_str();
    let escaped = match double_occurrences(text, wrapper) {
        Some(doubled) => Cow::Owned(doubled),
        None => Cow::Borrowed(text),
    };

    let needs_wrap = contains(&escaped, wrapper)
        || contains(&escaped, &options.eol)
        || contains(&escaped, &options.separator);

    if needs_wrap {
        out.reserve(escaped.len() + wrapper.len() * 2);
        out.push_str(wrapper);
        out.push_str(&escaped);
        out.push_str(wrapper);
    } else {
        out.push_str(&escaped);
    }
}

/// Escape a single field with the given options.
pub fn escape_field(text: &str, options: &BuilderOptions) -> String {
    let mut out = String::with_capacity(text.len());
    write_escaped(&mut out, text, options);
    out
}
