//! Shared-string table
//!
//! Many cells in a workbook repeat the same text values. The shared-string
//! table stores each distinct string once and hands out a stable integer
//! index; shared-string cells carry only that index. Indices are the wire
//! format of the `t="s"` cell type, so they are assigned in first-seen
//! order and never change once assigned.

use ahash::AHashMap;

use crate::error::{Error, Result};

/// Deduplicating, insertion-ordered string table.
///
/// Shared across all sheets of one workbook by the embedding layer; the
/// table itself is a plain single-writer value with no internal locking.
#[derive(Debug, Default)]
pub struct SharedStringTable {
    strings: Vec<String>,
    index: AHashMap<String, u32>,
}

impl SharedStringTable {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or assign the index for a string.
    ///
    /// Returns the existing index if `text` was seen before, else appends
    /// and returns the new index. O(1) amortized.
    pub fn intern(&mut self, text: &str) -> u32 {
        if let Some(&idx) = self.index.get(text) {
            return idx;
        }
        let idx = self.strings.len() as u32;
        self.strings.push(text.to_string());
        self.index.insert(text.to_string(), idx);
        idx
    }

    /// Look up a string by its index
    pub fn get(&self, idx: u32) -> Result<&str> {
        self.strings
            .get(idx as usize)
            .map(String::as_str)
            .ok_or(Error::StringIndexOutOfRange(idx, self.strings.len()))
    }

    /// Get the number of distinct strings in the table
    pub fn len(&self) -> usize {
        self.strings.len()
    }

    /// Check if the table is empty
    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Iterate over the strings in index order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }
}
