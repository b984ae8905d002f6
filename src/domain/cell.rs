//! Untyped spreadsheet cell values
//!
//! A [`Cell`] is what the decoder hands us before any cleaning happens. The
//! same type is used for externally supplied dictionaries, so JSON `null`,
//! strings, numbers and booleans all land here.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal text pandas-style exports use for a missing value
pub const NAN_LITERAL: &str = "nan";

/// A single untyped cell
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// No value at all
    #[default]
    Empty,
    /// Text exactly as stored
    Text(String),
    /// Any numeric value (integers included)
    Number(f64),
    /// Native boolean
    Bool(bool),
}

impl Cell {
    /// Creates a text cell
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// True for `Empty` and for NaN numbers
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Number(n) => n.is_nan(),
            _ => false,
        }
    }

    /// True when the cell is missing or holds only whitespace
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Text(s) => s.trim().is_empty(),
            other => other.is_missing(),
        }
    }

    /// True when the cell is blank, or its trimmed text is the literal `nan`
    pub fn is_placeholder(&self) -> bool {
        match self {
            Cell::Text(s) => {
                let trimmed = s.trim();
                trimmed.is_empty() || trimmed == NAN_LITERAL
            }
            other => other.is_missing(),
        }
    }

    /// Stringifies the cell as-is; `None` when missing
    ///
    /// Integral numbers drop the fractional part so a quantity of `6` does not
    /// come back as `6.0`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) if n.is_nan() => None,
            Cell::Number(n) => Some(format_number(*n)),
            Cell::Bool(b) => Some(b.to_string()),
        }
    }

    /// Stringified and trimmed; `None` when the result is empty
    pub fn trimmed_text(&self) -> Option<String> {
        self.to_text()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_text() {
            Some(s) => write!(f, "{s}"),
            None => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Cell::Empty => serializer.serialize_none(),
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Number(n) if n.is_nan() => serializer.serialize_none(),
            Cell::Number(n) => serializer.serialize_f64(*n),
            Cell::Bool(b) => serializer.serialize_bool(*b),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CellRepr {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl<'de> Deserialize<'de> for Cell {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = Option::<CellRepr>::deserialize(deserializer)?;
        Ok(match repr {
            None => Cell::Empty,
            Some(CellRepr::Bool(b)) => Cell::Bool(b),
            Some(CellRepr::Number(n)) => Cell::Number(n),
            Some(CellRepr::Text(s)) => Cell::Text(s),
        })
    }
}
