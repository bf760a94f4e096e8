//! Column-oriented table builder.

use indexmap::IndexMap;
use std::cmp::Ordering;
use std::fmt;
use tracing::debug;

use super::options::{BuilderOptions, BuilderOptionsUpdate, ColumnOptions};
use super::render::Renderer;
use super::row::{Row, synthesize_rows};
use super::types::{CellValue, Dimensions};
use crate::common::{Error, Result};

/// Raw column store keyed by column name, in column order.
pub type ColumnData = IndexMap<String, Vec<CellValue>>;

/// Per-column options keyed by column name.
pub type ColumnOptionsMap = IndexMap<String, ColumnOptions>;

/// Builds delimited text from named columns.
///
/// Every column holds the same number of values; the first column written to
/// an empty builder fixes that row count. Methods consume and return the
/// builder so calls chain, with `?` after the fallible ones:
///
/// ```rust
/// use quince::{TableBuilder, ColumnOptions, BuilderOptionsUpdate};
///
/// let csv = TableBuilder::new()
///     .create_column("name", ["Ada", "Linus"])?
///     .map_column("name", "initial", |v, _, _| v.as_str().map(|s| s[..1].to_string()))?
///     .set_column_options("initial", ColumnOptions::new().with_priority(1))
///     .set_builder_options(BuilderOptionsUpdate::new().with_separator(";"))
///     .to_csv_string();
///
/// assert_eq!(csv, "name;initial\nAda;A\nLinus;L");
/// # Ok::<(), quince::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableBuilder {
    data: ColumnData,
    row_count: usize,
    options: BuilderOptions,
    column_options: ColumnOptionsMap,
}

impl TableBuilder {
    /// Create an empty builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty builder with the given options
    pub fn with_options(options: BuilderOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    fn check_length(&mut self, column: &str, len: usize) -> Result<()> {
        if self.data.is_empty() {
            self.row_count = len;
            return Ok(());
        }

        if len != self.row_count {
            return Err(Error::LengthMismatch {
                column: column.to_string(),
                expected: self.row_count,
                actual: len,
            });
        }
        Ok(())
    }

    /// Register or overwrite a column.
    ///
    /// Overwriting keeps the column's position.
    pub fn create_column<N, I, V>(mut self, name: N, values: I) -> Result<Self>
    where
        N: Into<String>,
        I: IntoIterator<Item = V>,
        V: Into<CellValue>,
    {
        let name = name.into();
        let values: Vec<CellValue> = values.into_iter().map(Into::into).collect();
        self.check_length(&name, values.len())?;

        debug!(column = %name, rows = values.len(), "Created column");
        self.data.insert(name, values);
        Ok(self)
    }

    /// Derive `to` from `from` value by value.
    ///
    /// The callback receives the value, its index and the whole source column.
    pub fn map_column<N, F, V>(mut self, from: &str, to: N, mut f: F) -> Result<Self>
    where
        N: Into<String>,
        F: FnMut(&CellValue, usize, &[CellValue]) -> V,
        V: Into<CellValue>,
    {
        let source = self
            .data
            .get(from)
            .ok_or_else(|| Error::ColumnNotPopulated(from.to_string()))?;
        let mapped: Vec<CellValue> = source
            .iter()
            .enumerate()
            .map(|(index, value)| f(value, index, source).into())
            .collect();

        let to = to.into();
        debug!(from, to = %to, "Mapped column");
        self.data.insert(to, mapped);
        Ok(self)
    }

    /// Derive `to` from whole rows.
    ///
    /// The callback receives a row holding every existing column, its index
    /// and all rows.
    pub fn map_columns<N, F, V>(mut self, to: N, mut f: F) -> Self
    where
        N: Into<String>,
        F: FnMut(&Row<'_>, usize, &[Row<'_>]) -> V,
        V: Into<CellValue>,
    {
        let values: Vec<CellValue> = {
            let rows = synthesize_rows(&self.data, self.row_count);
            rows.iter()
                .enumerate()
                .map(|(index, row)| f(row, index, &rows).into())
                .collect()
        };

        let to = to.into();
        debug!(to = %to, rows = values.len(), "Mapped rows into column");
        self.data.insert(to, values);
        self
    }

    /// Shallow-merge `options` into the column's existing options.
    pub fn set_column_options<N: Into<String>>(mut self, name: N, options: ColumnOptions) -> Self {
        self.column_options
            .entry(name.into())
            .or_default()
            .merge_from(options);
        self
    }

    /// Apply every key present in `update` to the builder options.
    pub fn set_builder_options(mut self, update: BuilderOptionsUpdate) -> Self {
        self.options.apply(update);
        self
    }

    /// Order columns by ascending priority.
    ///
    /// Columns without a priority sort before all prioritized ones; ties keep
    /// their current order.
    pub fn sort_columns(mut self) -> Self {
        let column_options = &self.column_options;
        let priority = |name: &str| {
            column_options
                .get(name)
                .and_then(|opts| opts.priority)
                .unwrap_or(i64::MIN)
        };
        self.data.sort_by(|a, _, b, _| priority(a.as_str()).cmp(&priority(b.as_str())));
        self
    }

    /// Reorder rows with a comparator over whole rows (stable).
    pub fn sort_rows<F>(mut self, mut compare: F) -> Self
    where
        F: FnMut(&Row<'_>, &Row<'_>) -> Ordering,
    {
        let order: Vec<usize> = {
            let rows = synthesize_rows(&self.data, self.row_count);
            let mut order: Vec<usize> = (0..rows.len()).collect();
            order.sort_by(|&a, &b| compare(&rows[a], &rows[b]));
            order
        };

        for values in self.data.values_mut() {
            let mut old = std::mem::take(values);
            *values = order
                .iter()
                .map(|&index| old.get_mut(index).map(std::mem::take).unwrap_or_default())
                .collect();
        }
        self
    }

    /// Append `other`'s rows below this builder's rows.
    ///
    /// Shared columns are joined; a column missing on one side is padded with
    /// absent values so every column keeps the combined row count. This
    /// builder's column options and truthy builder options win over
    /// `other`'s.
    pub fn concat(mut self, other: TableBuilder) -> Self {
        let TableBuilder {
            data,
            row_count,
            options,
            column_options,
        } = other;

        debug!(
            rows = self.row_count,
            other_rows = row_count,
            other_columns = data.len(),
            "Concatenating builders"
        );

        self.append_columns(data, row_count);
        self.fill_missing_column_options(column_options);
        self.options.fill_falsy_from(&options);
        self.row_count += row_count;
        self
    }

    fn append_columns(&mut self, data: ColumnData, other_rows: usize) {
        let own_rows = self.row_count;
        for (name, mut values) in data {
            match self.data.get_mut(&name) {
                Some(existing) => existing.append(&mut values),
                None => {
                    let mut padded = vec![CellValue::Absent; own_rows];
                    padded.append(&mut values);
                    self.data.insert(name, padded);
                },
            }
        }

        let total = own_rows + other_rows;
        for values in self.data.values_mut() {
            values.resize(total, CellValue::Absent);
        }
    }

    /// Adopt `other`'s options only for columns that have none here.
    fn fill_missing_column_options(&mut self, other: ColumnOptionsMap) {
        for (name, options) in other {
            self.column_options.entry(name).or_insert(options);
        }
    }

    /// Fold `concat` over `builders`, left to right.
    ///
    /// A single builder is returned unchanged.
    pub fn merge<I>(builders: I) -> Result<TableBuilder>
    where
        I: IntoIterator<Item = TableBuilder>,
    {
        let mut builders = builders.into_iter();
        let first = builders.next().ok_or(Error::EmptyMergeSet)?;
        let mut count = 1usize;
        let merged = builders.fold(first, |acc, next| {
            count += 1;
            acc.concat(next)
        });
        debug!(builders = count, rows = merged.row_count, "Merged builders");
        Ok(merged)
    }

    fn renderer(&self) -> Renderer<'_> {
        Renderer::new(&self.data, &self.column_options, &self.options, self.row_count)
    }

    /// Render the table to delimited text.
    pub fn to_csv_string(&self) -> String {
        self.renderer().render()
    }

    /// Rows (header lines included) and columns of the rendered output.
    pub fn dimensions(&self) -> Dimensions {
        self.renderer().dimensions()
    }

    /// Render and measure in one pass.
    pub fn string_and_dimensions(&self) -> (String, Dimensions) {
        self.renderer().render_with_dimensions()
    }

    /// Raw column store, column options and builder options.
    pub fn data_and_options(&self) -> (&ColumnData, &ColumnOptionsMap, &BuilderOptions) {
        (&self.data, &self.column_options, &self.options)
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.data.get(name).map(Vec::as_slice)
    }

    pub fn column_options(&self, name: &str) -> Option<&ColumnOptions> {
        self.column_options.get(name)
    }

    pub fn builder_options(&self) -> &BuilderOptions {
        &self.options
    }
}

impl fmt::Display for TableBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_csv_string())
    }
}
