//! Column metadata

/// Column-span override record.
///
/// The worksheet format represents column settings as runs, not individual
/// columns: every column in `min..=max` (0-based, inclusive) shares one
/// width/style/visibility override. Spans are kept in insertion order and
/// are not merged or split against each other; the first span covering a
/// column wins at lookup time.
#[derive(Debug, Clone, PartialEq)]
pub struct ColInfo {
    /// First column of the span (0-based)
    pub min: u16,
    /// Last column of the span (0-based, inclusive)
    pub max: u16,
    /// Explicit width in characters (None = sheet default)
    pub width: Option<f64>,
    /// Column-level style index (None = default style)
    pub style_index: Option<u32>,
    /// The width was set explicitly (`customWidth` attribute)
    pub custom_width: bool,
    /// Columns are hidden
    pub hidden: bool,
}

impl ColInfo {
    /// Create a span with no overrides
    pub fn span(min: u16, max: u16) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
            width: None,
            style_index: None,
            custom_width: false,
            hidden: false,
        }
    }

    /// Set width, marking it custom
    pub fn with_width(mut self, width: f64) -> Self {
        self.width = Some(width);
        self.custom_width = true;
        self
    }

    /// Check if a column falls inside this span
    pub fn covers(&self, col: u16) -> bool {
        col >= self.min && col <= self.max
    }
}
