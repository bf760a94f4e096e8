//! Row views synthesized from column-major storage.

use indexmap::IndexMap;
use smallvec::SmallVec;
use std::ops::Index;

use super::types::CellValue;

static ABSENT: CellValue = CellValue::Absent;

/// One row of a table: the value at a fixed index for every column.
///
/// Rows borrow from the builder's columns and are rebuilt on demand, so
/// they always reflect the current column set.
#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    fields: SmallVec<[(&'a str, &'a CellValue); 8]>,
}

impl<'a> Row<'a> {
    /// Get the value of `column`, if the column exists.
    pub fn get(&self, column: &str) -> Option<&'a CellValue> {
        self.fields
            .iter()
            .find(|(name, _)| *name == column)
            .map(|(_, value)| *value)
    }

    /// Column names in store order.
    pub fn columns(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// `(name, value)` pairs in store order.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a CellValue)> + '_ {
        self.fields.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Index<&str> for Row<'_> {
    type Output = CellValue;

    /// Missing columns read as [`CellValue::Absent`].
    fn index(&self, column: &str) -> &CellValue {
        self.get(column).unwrap_or(&ABSENT)
    }
}

/// Build every row of `columns`, `row_count` rows long.
pub(crate) fn synthesize_rows(columns: &IndexMap<String, Vec<CellValue>>, row_count: usize) -> Vec<Row<'_>> {
    (0..row_count)
        .map(|index| Row {
            fields: columns
                .iter()
                .map(|(name, values)| (name.as_str(), values.get(index).unwrap_or(&ABSENT)))
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> IndexMap<String, Vec<CellValue>> {
        let mut columns = IndexMap::new();
        columns.insert("a".to_string(), vec![CellValue::from("x"), CellValue::from("y")]);
        columns.insert("b".to_string(), vec![CellValue::from(1), CellValue::Null]);
        columns
    }

    #[test]
    fn test_rows_follow_store_order() {
        let columns = sample();
        let rows = synthesize_rows(&columns, 2);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].columns().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(rows[1]["a"], CellValue::from("y"));
        assert_eq!(rows[1]["b"], CellValue::Null);
    }

    #[test]
    fn test_missing_column_reads_absent() {
        let columns = sample();
        let rows = synthesize_rows(&columns, 2);
        assert_eq!(rows[0].get("zzz"), None);
        assert_eq!(rows[0]["zzz"], CellValue::Absent);
    }
}
