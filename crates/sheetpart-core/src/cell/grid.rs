//! Sparse cell storage
//!
//! Only written cells are stored, using a row-based BTreeMap structure so
//! iteration is always ascending row-then-column (required for streaming
//! writes).

use std::collections::BTreeMap;

use super::CellData;

/// Sparse row-major storage for worksheet cells.
///
/// Structure: `BTreeMap<row_index, BTreeMap<col_index, CellData>>`.
/// A cell is created on first write to an address and overwritten in place
/// on subsequent writes; cells are never removed individually (clearing the
/// sheet clears the whole grid).
#[derive(Debug, Default)]
pub struct CellGrid {
    rows: BTreeMap<u32, BTreeMap<u16, CellData>>,
}

impl CellGrid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a cell
    pub fn get(&self, row: u32, col: u16) -> Option<&CellData> {
        self.rows.get(&row).and_then(|r| r.get(&col))
    }

    /// Get a mutable cell
    pub fn get_mut(&mut self, row: u32, col: u16) -> Option<&mut CellData> {
        self.rows.get_mut(&row).and_then(|r| r.get_mut(&col))
    }

    /// Insert or replace the cell at the address
    pub fn set(&mut self, row: u32, col: u16, data: CellData) {
        self.rows.entry(row).or_default().insert(col, data);
    }

    /// Remove all cells
    pub fn clear(&mut self) {
        self.rows.clear();
    }

    /// Get the number of stored cells
    pub fn cell_count(&self) -> usize {
        self.rows.values().map(|r| r.len()).sum()
    }

    /// Get the number of rows with at least one cell
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Check if the grid is empty
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Iterate over all cells in ascending row-then-column order
    pub fn iter(&self) -> impl Iterator<Item = (u32, u16, &CellData)> {
        self.rows
            .iter()
            .flat_map(|(&row, cols)| cols.iter().map(move |(&col, data)| (row, col, data)))
    }

    /// Iterate over populated rows, each with its ordered column map
    pub fn iter_rows(&self) -> impl Iterator<Item = (u32, &BTreeMap<u16, CellData>)> {
        self.rows.iter().map(|(&row, cols)| (row, cols))
    }

    /// Iterate over cells in a specific row
    pub fn iter_row(&self, row: u32) -> impl Iterator<Item = (u16, &CellData)> {
        self.rows
            .get(&row)
            .into_iter()
            .flat_map(|cols| cols.iter().map(|(&col, data)| (col, data)))
    }

    /// Get the bounds of used cells.
    ///
    /// Returns (min_row, min_col, max_row, max_col) or None if empty.
    pub fn used_bounds(&self) -> Option<(u32, u16, u32, u16)> {
        let min_row = *self.rows.keys().next()?;
        let max_row = *self.rows.keys().next_back()?;

        let mut min_col = u16::MAX;
        let mut max_col = 0u16;

        for row_data in self.rows.values() {
            if let Some(&col) = row_data.keys().next() {
                min_col = min_col.min(col);
            }
            if let Some(&col) = row_data.keys().next_back() {
                max_col = max_col.max(col);
            }
        }

        Some((min_row, min_col, max_row, max_col))
    }
}
