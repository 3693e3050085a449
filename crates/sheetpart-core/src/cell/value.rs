//! Cell value types

use std::fmt;

/// Represents the value stored in a cell.
///
/// Exactly one interpretation of the payload is meaningful per variant:
/// shared-string cells carry only a table index, never the literal text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    /// Numeric value (all numbers stored as f64)
    Number(f64),

    /// Index into the workbook shared-string table
    SharedString(u32),

    /// String stored literally in the cell, bypassing the shared table
    InlineString(String),

    /// Boolean value
    Bool(bool),

    /// Formula with its last-known cached result
    Formula {
        /// Formula text without the leading '='
        text: String,
        /// Cached result; 0 if never computed
        cached: f64,
    },
}

impl CellValue {
    /// Create a new formula value with no computed result yet
    pub fn formula<S: Into<String>>(text: S) -> Self {
        CellValue::Formula {
            text: text.into(),
            cached: 0.0,
        }
    }

    /// Check if the cell contains a formula
    pub fn is_formula(&self) -> bool {
        matches!(self, CellValue::Formula { .. })
    }

    /// Try to get the value as a number (booleans coerce to 0/1,
    /// formulas yield their cached result)
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Bool(true) => Some(1.0),
            CellValue::Bool(false) => Some(0.0),
            CellValue::Formula { cached, .. } => Some(*cached),
            _ => None,
        }
    }

    /// Try to get the value as a boolean
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            CellValue::Bool(b) => Some(*b),
            CellValue::Number(n) => Some(*n != 0.0),
            _ => None,
        }
    }

    /// Get the formula text if this is a formula cell
    pub fn formula_text(&self) -> Option<&str> {
        match self {
            CellValue::Formula { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Get the shared-string table index if this is a shared-string cell
    pub fn shared_string_index(&self) -> Option<u32> {
        match self {
            CellValue::SharedString(idx) => Some(*idx),
            _ => None,
        }
    }

    /// Get the kind name for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            CellValue::Number(_) => "number",
            CellValue::SharedString(_) => "shared string",
            CellValue::InlineString(_) => "inline string",
            CellValue::Bool(_) => "boolean",
            CellValue::Formula { .. } => "formula",
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Number(n) => write!(f, "{n}"),
            CellValue::SharedString(idx) => write!(f, "[shared:{idx}]"),
            CellValue::InlineString(s) => write!(f, "{s}"),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
            CellValue::Formula { cached, .. } => write!(f, "{cached}"),
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i32> for CellValue {
    fn from(n: i32) -> Self {
        CellValue::Number(n as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Bool(b)
    }
}

/// Complete data for a single cell
#[derive(Debug, Clone, PartialEq)]
pub struct CellData {
    /// The cell's value
    pub value: CellValue,
    /// Index into the external style table (None = default style)
    pub style_index: Option<u32>,
}

impl CellData {
    /// Create a new cell with a value and default style
    pub fn new(value: CellValue) -> Self {
        Self {
            value,
            style_index: None,
        }
    }

    /// Create a new cell with a value and style
    pub fn with_style(value: CellValue, style_index: u32) -> Self {
        Self {
            value,
            style_index: Some(style_index),
        }
    }
}
