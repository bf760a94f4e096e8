//! Common types for table building.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::common::number::{write_float, write_int};

/// A single scalar stored in a column.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CellValue {
    /// Value was never set for this row
    #[default]
    Absent,
    /// Explicit null
    Null,
    /// Boolean value
    Bool(bool),
    /// 64-bit signed integer
    Int(i64),
    /// 64-bit floating point number
    Float(f64),
    /// String value
    String(String),
}

impl CellValue {
    /// Check if the value is missing (`Absent` or `Null`).
    ///
    /// Falsy but defined values such as `""`, `0` or `false` are not missing.
    #[inline]
    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Absent | CellValue::Null)
    }

    /// Borrow the string payload, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            CellValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Numeric view of the value; integers widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Int(i) => Some(*i as f64),
            CellValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Append the default text form of a present value to `buf`.
    ///
    /// Returns `false` without writing anything for missing values.
    pub fn write_text(&self, buf: &mut String) -> bool {
        match self {
            CellValue::Absent | CellValue::Null => return false,
            CellValue::Bool(b) => buf.push_str(if *b { "true" } else { "false" }),
            CellValue::Int(i) => write_int(buf, *i),
            CellValue::Float(f) => write_float(buf, *f),
            CellValue::String(s) => buf.push_str(s),
        }
        true
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Absent => f.write_str("undefined"),
            CellValue::Null => f.write_str("null"),
            CellValue::String(s) => f.write_str(s),
            other => {
                let mut buf = String::new();
                other.write_text(&mut buf);
                f.write_str(&buf)
            },
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::String(value.to_string())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::String(value)
    }
}

impl From<&String> for CellValue {
    fn from(value: &String) -> Self {
        CellValue::String(value.clone())
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Float(value)
    }
}

impl From<f32> for CellValue {
    fn from(value: f32) -> Self {
        CellValue::Float(value as f64)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                fn from(value: $t) -> Self {
                    CellValue::Int(value as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, isize);

macro_rules! impl_from_wide_uint {
    ($($t:ty),*) => {
        $(
            impl From<$t> for CellValue {
                /// Values beyond `i64::MAX` fall back to a float.
                fn from(value: $t) -> Self {
                    i64::try_from(value).map_or(CellValue::Float(value as f64), CellValue::Int)
                }
            }
        )*
    };
}

impl_from_wide_uint!(u64, usize);

impl<T: Into<CellValue>> From<Option<T>> for CellValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(CellValue::Null, Into::into)
    }
}

impl From<&CellValue> for CellValue {
    fn from(value: &CellValue) -> Self {
        value.clone()
    }
}

/// Physical size of the rendered output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimensions {
    /// Header lines plus data rows; 0 when no column is visible
    pub n_rows: usize,
    /// Number of visible columns
    pub n_cols: usize,
}

impl Dimensions {
    pub const fn new(n_rows: usize, n_cols: usize) -> Self {
        Self { n_rows, n_cols }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_values() {
        assert!(CellValue::Absent.is_missing());
        assert!(CellValue::Null.is_missing());
        assert!(!CellValue::from("").is_missing());
        assert!(!CellValue::from(0).is_missing());
        assert!(!CellValue::from(false).is_missing());
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(CellValue::from(None::<&str>), CellValue::Null);
        assert_eq!(CellValue::from(Some("x")), CellValue::String("x".to_string()));
        assert_eq!(CellValue::from(Some(3u8)), CellValue::Int(3));
    }

    #[test]
    fn test_wide_unsigned_conversion() {
        assert_eq!(CellValue::from(7usize), CellValue::Int(7));
        assert_eq!(CellValue::from(i64::MAX as u64), CellValue::Int(i64::MAX));
        assert_eq!(CellValue::from(u64::MAX), CellValue::Float(u64::MAX as f64));
        assert_eq!(CellValue::from(u64::MAX).to_string(), "18446744073709552000");
    }

    #[test]
    fn test_display() {
        assert_eq!(CellValue::from(true).to_string(), "true");
        assert_eq!(CellValue::from(2.0).to_string(), "2");
        assert_eq!(CellValue::from(-7).to_string(), "-7");
        assert_eq!(CellValue::Null.to_string(), "null");
    }

    #[test]
    fn test_write_text_skips_missing() {
        let mut buf = String::new();
        assert!(!CellValue::Absent.write_text(&mut buf));
        assert!(buf.is_empty());
        assert!(CellValue::from(1.5).write_text(&mut buf));
        assert_eq!(buf, "1.5");
    }
}
