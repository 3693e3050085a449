//! Codec error types

use thiserror::Error;

/// Result type for worksheet-part codec operations
pub type XmlResult<T> = std::result::Result<T, XmlError>;

/// Errors that can occur while reading or writing the worksheet part
#[derive(Debug, Error)]
pub enum XmlError {
    /// XML error from the underlying event reader
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Numeric attribute or value text that does not parse
    #[error("Malformed attribute {name}: {value:?}")]
    MalformedAttribute {
        /// Attribute or element name as it appears on the wire
        name: &'static str,
        /// The offending raw text
        value: String,
    },

    /// Model error (malformed address, merge overlap, ...)
    #[error("Model error: {0}")]
    Core(#[from] sheetpart_core::Error),
}
