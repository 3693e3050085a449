//! Error types for sheetpart-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sheetpart-core
#[derive(Debug, Error)]
pub enum Error {
    /// Cell address string does not parse (A1 notation)
    #[error("Malformed cell address: {0}")]
    MalformedAddress(String),

    /// Row index out of bounds
    #[error("Row index {0} out of bounds (max: {1})")]
    RowOutOfBounds(u32, u32),

    /// Column index out of bounds
    #[error("Column index {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u32, u16),

    /// Merge range intersects an existing merged range
    #[error("Merge range {new} overlaps existing range {existing}")]
    MergeOverlap {
        /// Range the caller tried to insert
        new: String,
        /// First stored range it intersects
        existing: String,
    },

    /// Shared-string lookup past the end of the table
    #[error("Shared string index {0} out of range (table has {1} entries)")]
    StringIndexOutOfRange(u32, usize),
}
