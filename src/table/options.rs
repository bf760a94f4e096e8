//! Builder-wide and per-column formatting options.
//!
//! [`BuilderOptions`] is always fully populated; [`BuilderOptionsUpdate`] and
//! [`ColumnOptions`] are partial and only carry the keys a caller set.
//! All three can be loaded from YAML so formatting can live in configuration.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::sync::Arc;

use super::types::CellValue;
use crate::common::{Error, Result};

/// Default field separator
pub const DEFAULT_SEPARATOR: &str = ",";
/// Default record terminator
pub const DEFAULT_EOL: &str = "\n";
/// Default field wrapper (quote)
pub const DEFAULT_FIELD_WRAPPER: &str = "\"";
/// Default text for missing values
pub const DEFAULT_EMPTY_VALUE: &str = "";

/// Text a missing cell renders as when both levels hold an explicit null.
pub(crate) const NULL_TEXT: &str = "null";

type TransformFn = dyn Fn(&CellValue, usize, &[CellValue]) -> Option<String> + Send + Sync;

/// Per-column value formatter.
///
/// Receives the raw value, its row index and the whole column. Returning
/// `None` makes the cell fall back to the configured empty value.
#[derive(Clone)]
pub struct Transform(Arc<TransformFn>);

impl Transform {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&CellValue, usize, &[CellValue]) -> Option<String> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    pub fn apply(&self, value: &CellValue, index: usize, column: &[CellValue]) -> Option<String> {
        (self.0)(value, index, column)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(..)")
    }
}

impl PartialEq for Transform {
    /// Two transforms are equal when they share the same function.
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Deserialize a present key as `Some`, so `key: null` becomes `Some(None)`.
fn present<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Options for a single column.
///
/// Every field is optional; an unset field means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnOptions {
    /// Sort key for `sort_columns` (ascending; unset sorts first)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<i64>,
    /// Empty-value override; `Some(None)` is an explicit null that defers to the builder
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub empty_value: Option<Option<String>>,
    /// Drop the column from output when every value is missing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_if_empty: Option<bool>,
    /// Formatter used instead of the default stringification
    #[serde(skip)]
    pub transform: Option<Transform>,
}

impl ColumnOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the priority used by `sort_columns`
    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the empty value (None for an explicit null)
    pub fn with_empty_value<S: Into<String>>(mut self, empty_value: Option<S>) -> Self {
        self.empty_value = Some(empty_value.map(Into::into));
        self
    }

    /// Enable/disable dropping the column when it holds only missing values
    pub fn with_remove_if_empty(mut self, remove: bool) -> Self {
        self.remove_if_empty = Some(remove);
        self
    }

    /// Set the value formatter
    pub fn with_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&CellValue, usize, &[CellValue]) -> Option<String> + Send + Sync + 'static,
    {
        self.transform = Some(Transform::new(f));
        self
    }

    /// Shallow merge: every field set in `other` overwrites the one in `self`.
    pub fn merge_from(&mut self, other: ColumnOptions) {
        if other.priority.is_some() {
            self.priority = other.priority;
        }
        if other.empty_value.is_some() {
            self.empty_value = other.empty_value;
        }
        if other.remove_if_empty.is_some() {
            self.remove_if_empty = other.remove_if_empty;
        }
        if other.transform.is_some() {
            self.transform = other.transform;
        }
    }

    /// Load column options from a YAML document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse column options: {}", e)))
    }
}

/// Builder-wide rendering options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuilderOptions {
    /// Field separator
    pub separator: String,
    /// Record terminator
    pub eol: String,
    /// Quote placed around fields that need escaping
    pub field_wrapper: String,
    /// Splits column names into stacked header rows
    pub header_separator: Option<String>,
    /// Text for missing values (None for an explicit null)
    pub empty_value: Option<String>,
    /// Drop every column whose values are all missing
    pub remove_empty_columns: bool,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            eol: DEFAULT_EOL.to_string(),
            field_wrapper: DEFAULT_FIELD_WRAPPER.to_string(),
            header_separator: None,
            empty_value: Some(DEFAULT_EMPTY_VALUE.to_string()),
            remove_empty_columns: false,
        }
    }
}

impl BuilderOptions {
    /// Create TSV (tab-separated) options
    pub fn tsv() -> Self {
        Self {
            separator: "\t".to_string(),
            ..Self::default()
        }
    }

    /// Overwrite every key present in `update`, whatever its value.
    pub fn apply(&mut self, update: BuilderOptionsUpdate) {
        if let Some(separator) = update.separator {
            self.separator = separator;
        }
        if let Some(eol) = update.eol {
            self.eol = eol;
        }
        if let Some(field_wrapper) = update.field_wrapper {
            self.field_wrapper = field_wrapper;
        }
        if let Some(header_separator) = update.header_separator {
            self.header_separator = header_separator;
        }
        if let Some(empty_value) = update.empty_value {
            self.empty_value = empty_value;
        }
        if let Some(remove) = update.remove_empty_columns {
            self.remove_empty_columns = remove;
        }
    }

    /// Take `other`'s value for every key that is falsy here.
    ///
    /// Falsy means an empty string, a null or `false`; this is the
    /// precedence used when concatenating builders.
    pub fn fill_falsy_from(&mut self, other: &BuilderOptions) {
        fn is_falsy(value: &Option<String>) -> bool {
            value.as_deref().is_none_or(str::is_empty)
        }

        if self.separator.is_empty() {
            self.separator.clone_from(&other.separator);
        }
        if self.eol.is_empty() {
            self.eol.clone_from(&other.eol);
        }
        if self.field_wrapper.is_empty() {
            self.field_wrapper.clone_from(&other.field_wrapper);
        }
        if is_falsy(&self.header_separator) {
            self.header_separator.clone_from(&other.header_separator);
        }
        if is_falsy(&self.empty_value) {
            self.empty_value.clone_from(&other.empty_value);
        }
        if !self.remove_empty_columns {
            self.remove_empty_columns = other.remove_empty_columns;
        }
    }

    /// Resolve the text a missing cell renders as.
    ///
    /// A column override wins unless it is absent or an explicit null; then
    /// the builder value applies, and a builder null renders as `null`.
    pub fn empty_text<'a>(&'a self, column: Option<&'a ColumnOptions>) -> &'a str {
        column
            .and_then(|opts| opts.empty_value.as_ref())
            .and_then(Option::as_deref)
            .or(self.empty_value.as_deref())
            .unwrap_or(NULL_TEXT)
    }

    /// Load builder options from a YAML document; missing keys keep defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse builder options: {}", e)))
    }

    /// Serialize the options to YAML.
    pub fn to_yaml(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize builder options: {}", e)))
    }
}

/// Partial builder options passed to `set_builder_options`.
///
/// A field that is `Some` always overwrites, even with an empty string,
/// `false` or an explicit null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BuilderOptionsUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_wrapper: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub header_separator: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none", deserialize_with = "present")]
    pub empty_value: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_empty_columns: Option<bool>,
}

impl BuilderOptionsUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the field separator
    pub fn with_separator<S: Into<String>>(mut self, separator: S) -> Self {
        self.separator = Some(separator.into());
        self
    }

    /// Set the record terminator
    pub fn with_eol<S: Into<String>>(mut self, eol: S) -> Self {
        self.eol = Some(eol.into());
        self
    }

    /// Set the field wrapper
    pub fn with_field_wrapper<S: Into<String>>(mut self, field_wrapper: S) -> Self {
        self.field_wrapper = Some(field_wrapper.into());
        self
    }

    /// Set the header separator (None to disable header splitting)
    pub fn with_header_separator<S: Into<String>>(mut self, header_separator: Option<S>) -> Self {
        self.header_separator = Some(header_separator.map(Into::into));
        self
    }

    /// Set the empty value (None for an explicit null)
    pub fn with_empty_value<S: Into<String>>(mut self, empty_value: Option<S>) -> Self {
        self.empty_value = Some(empty_value.map(Into::into));
        self
    }

    /// Enable/disable dropping all-missing columns
    pub fn with_remove_empty_columns(mut self, remove: bool) -> Self {
        self.remove_empty_columns = Some(remove);
        self
    }

    /// Load an update from a YAML document; only keys present are applied.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse builder options: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let opts = BuilderOptions::default();
        assert_eq!(opts.separator, ",");
        assert_eq!(opts.eol, "\n");
        assert_eq!(opts.field_wrapper, "\"");
        assert_eq!(opts.header_separator, None);
        assert_eq!(opts.empty_value.as_deref(), Some(""));
        assert!(!opts.remove_empty_columns);
    }

    #[test]
    fn test_apply_overwrites_present_keys_only() {
        let mut opts = BuilderOptions::default();
        opts.apply(BuilderOptionsUpdate::new().with_empty_value(Some("")));
        opts.apply(BuilderOptionsUpdate::new().with_remove_empty_columns(true));
        assert_eq!(opts.empty_value.as_deref(), Some(""));
        assert!(opts.remove_empty_columns);

        opts.apply(BuilderOptionsUpdate::new().with_empty_value(None::<String>));
        assert_eq!(opts.empty_value, None);
        assert!(opts.remove_empty_columns);
        assert_eq!(opts.separator, ",");

        opts.apply(BuilderOptionsUpdate::new().with_remove_empty_columns(false));
        assert!(!opts.remove_empty_columns);
    }

    #[test]
    fn test_fill_falsy_keeps_truthy_values() {
        let mut mine = BuilderOptions {
            separator: ";".to_string(),
            empty_value: Some(String::new()),
            ..BuilderOptions::default()
        };
        let theirs = BuilderOptions {
            separator: "\t".to_string(),
            header_separator: Some(".".to_string()),
            empty_value: Some("N/A".to_string()),
            remove_empty_columns: true,
            ..BuilderOptions::default()
        };

        mine.fill_falsy_from(&theirs);
        assert_eq!(mine.separator, ";");
        assert_eq!(mine.header_separator.as_deref(), Some("."));
        assert_eq!(mine.empty_value.as_deref(), Some("N/A"));
        assert!(mine.remove_empty_columns);
    }

    #[test]
    fn test_column_merge_is_shallow() {
        let mut opts = ColumnOptions::new().with_remove_if_empty(true);
        opts.merge_from(ColumnOptions::new().with_priority(1));
        assert_eq!(opts.remove_if_empty, Some(true));
        assert_eq!(opts.priority, Some(1));

        opts.merge_from(ColumnOptions::new().with_remove_if_empty(false));
        assert_eq!(opts.remove_if_empty, Some(false));
        assert_eq!(opts.priority, Some(1));
    }

    #[test]
    fn test_empty_text_precedence() {
        let mut builder = BuilderOptions::default();
        let column = ColumnOptions::new().with_empty_value(Some("N/A"));
        let null_column = ColumnOptions::new().with_empty_value(None::<String>);

        assert_eq!(builder.empty_text(None), "");
        assert_eq!(builder.empty_text(Some(&column)), "N/A");
        assert_eq!(builder.empty_text(Some(&null_column)), "");

        builder.empty_value = Some("EMPTY".to_string());
        assert_eq!(builder.empty_text(Some(&null_column)), "EMPTY");
        assert_eq!(builder.empty_text(Some(&column)), "N/A");

        builder.empty_value = None;
        assert_eq!(builder.empty_text(None), "null");
    }

    #[test]
    fn test_transform_equality_is_identity() {
        let t = Transform::new(|v, _, _| Some(v.to_string()));
        let same = t.clone();
        let other = Transform::new(|v, _, _| Some(v.to_string()));
        assert_eq!(t, same);
        assert_ne!(t, other);
        assert_eq!(t.apply(&CellValue::from(4), 0, &[]).as_deref(), Some("4"));
    }

    #[test]
    fn test_builder_options_from_yaml() {
        let opts = BuilderOptions::from_yaml("separator: \";\"\nremoveEmptyColumns: true\n").unwrap();
        assert_eq!(opts.separator, ";");
        assert!(opts.remove_empty_columns);
        assert_eq!(opts.eol, "\n");
        assert_eq!(opts.empty_value.as_deref(), Some(""));
    }

    #[test]
    fn test_update_from_yaml_distinguishes_null() {
        let update = BuilderOptionsUpdate::from_yaml("emptyValue: null\n").unwrap();
        assert_eq!(update.empty_value, Some(None));
        assert_eq!(update.separator, None);

        let update = BuilderOptionsUpdate::from_yaml("headerSeparator: \".\"\n").unwrap();
        assert_eq!(update.header_separator, Some(Some(".".to_string())));
        assert_eq!(update.empty_value, None);
    }

    #[test]
    fn test_column_options_from_yaml() {
        let opts = ColumnOptions::from_yaml("priority: 4\nemptyValue: N/A\n").unwrap();
        assert_eq!(opts.priority, Some(4));
        assert_eq!(opts.empty_value, Some(Some("N/A".to_string())));
        assert_eq!(opts.remove_if_empty, None);
    }

    #[test]
    fn test_invalid_yaml_is_config_error() {
        let err = BuilderOptions::from_yaml("separator: [1, 2").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_yaml_round_trip() {
        let opts = BuilderOptions {
            header_separator: Some(".".to_string()),
            ..BuilderOptions::tsv()
        };
        let yaml = opts.to_yaml().unwrap();
        assert_eq!(BuilderOptions::from_yaml(&yaml).unwrap(), opts);
    }
}
