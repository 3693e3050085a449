//! Row metadata

/// Per-row override record.
///
/// A row only gets a record when at least one attribute deviates from the
/// sheet default; the custom flags are carried verbatim so a row parsed
/// with `customHeight="1"` re-serializes with the flag even when the
/// height equals the default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowInfo {
    /// Explicit height in points (None = sheet default)
    pub height: Option<f64>,
    /// Row-level style index (None = default style)
    pub style_index: Option<u32>,
    /// The height was set explicitly (`customHeight` attribute)
    pub custom_height: bool,
    /// The row-level format was set explicitly (`customFormat` attribute)
    pub custom_format: bool,
    /// Row is hidden
    pub hidden: bool,
}

impl RowInfo {
    /// Check if this record carries any non-default attribute
    pub fn has_custom_settings(&self) -> bool {
        self.height.is_some()
            || self.style_index.is_some()
            || self.custom_height
            || self.custom_format
            || self.hidden
    }
}
