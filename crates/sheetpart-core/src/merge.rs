//! Merged cell regions

use crate::cell::CellRange;
use crate::error::{Error, Result};

/// Collection of non-overlapping rectangular merge ranges.
///
/// Overlap is validated on insertion only; writes to cells inside a merged
/// region are not policed here.
#[derive(Debug, Default)]
pub struct MergeSet {
    ranges: Vec<CellRange>,
}

impl MergeSet {
    /// Create a new empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a merge range.
    ///
    /// Fails with [`Error::MergeOverlap`] if the range intersects any
    /// existing entry. The range is stored as normalized by
    /// [`CellRange::new`], otherwise verbatim.
    pub fn merge(&mut self, range: CellRange) -> Result<()> {
        if let Some(existing) = self.ranges.iter().find(|r| r.overlaps(&range)) {
            return Err(Error::MergeOverlap {
                new: range.to_a1_string(),
                existing: existing.to_a1_string(),
            });
        }
        self.ranges.push(range);
        Ok(())
    }

    /// Remove a range that exactly matches an existing entry.
    ///
    /// Returns `true` if a match was removed; a request with no exact match
    /// is a no-op returning `false`, never an error. Corner order does not
    /// matter since ranges are normalized.
    pub fn unmerge(&mut self, range: &CellRange) -> bool {
        match self.ranges.iter().position(|r| r == range) {
            Some(pos) => {
                self.ranges.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Check whether an exactly matching range is present
    pub fn contains(&self, range: &CellRange) -> bool {
        self.ranges.contains(range)
    }

    /// Get the stored ranges in insertion order
    pub fn ranges(&self) -> &[CellRange] {
        &self.ranges
    }

    /// Get the number of merge ranges
    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    /// Check if the set is empty
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Remove all ranges
    pub fn clear(&mut self) {
        self.ranges.clear();
    }
}
