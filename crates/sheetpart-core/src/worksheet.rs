//! Worksheet type

use std::collections::BTreeMap;

use crate::cell::{CellAddress, CellData, CellGrid, CellRange, CellValue};
use crate::column::ColInfo;
use crate::error::{Error, Result};
use crate::hyperlink::{Hyperlink, HyperlinkSet};
use crate::merge::MergeSet;
use crate::row::RowInfo;
use crate::strings::SharedStringTable;
use crate::{MAX_COLS, MAX_ROWS};

/// A single sheet: sparse cell grid plus row/column metadata, merged
/// regions, and hyperlinks.
///
/// The worksheet owns a [`SharedStringTable`]; embedders that keep several
/// sheets in one workbook are expected to hold the table at the workbook
/// level and populate sheets through it (see `strings_mut`). All structures
/// are single-writer with no internal locking.
#[derive(Debug, Default)]
pub struct Worksheet {
    /// Cell storage
    cells: CellGrid,
    /// Shared-string table consulted by shared-string writes
    strings: SharedStringTable,
    /// Per-row overrides, keyed by 0-based row index
    rows: BTreeMap<u32, RowInfo>,
    /// Column-span overrides in insertion order
    cols: Vec<ColInfo>,
    /// Merged regions
    merges: MergeSet,
    /// Hyperlinks keyed by cell
    hyperlinks: HyperlinkSet,
}

impl Worksheet {
    /// Create a new empty worksheet
    pub fn new() -> Self {
        Self::default()
    }

    fn check_dimensions(row: u32, col: u16) -> Result<()> {
        if row >= MAX_ROWS {
            return Err(Error::RowOutOfBounds(row, MAX_ROWS - 1));
        }
        if col >= MAX_COLS {
            return Err(Error::ColumnOutOfBounds(col as u32, MAX_COLS - 1));
        }
        Ok(())
    }

    // === Cell access ===

    /// Get a cell by row/column indices
    pub fn cell_at(&self, row: u32, col: u16) -> Option<&CellData> {
        self.cells.get(row, col)
    }

    /// Get a cell by address string (e.g., "A1")
    pub fn cell(&self, address: &str) -> Result<Option<&CellData>> {
        let addr = CellAddress::parse(address)?;
        Ok(self.cells.get(addr.row, addr.col))
    }

    /// Insert or replace a cell.
    ///
    /// For shared-string cells the caller must already hold a valid table
    /// index (intern first, then write); this is a caller contract, not
    /// something the grid validates.
    pub fn set_cell(&mut self, row: u32, col: u16, data: CellData) -> Result<()> {
        Self::check_dimensions(row, col)?;
        self.cells.set(row, col, data);
        Ok(())
    }

    /// Write a numeric cell
    pub fn write_number(&mut self, row: u32, col: u16, value: f64) -> Result<()> {
        self.set_cell(row, col, CellData::new(CellValue::Number(value)))
    }

    /// Write a string cell through the shared-string table.
    ///
    /// Interns `text` and stores the resulting index; returns the index.
    pub fn write_string(&mut self, row: u32, col: u16, text: &str) -> Result<u32> {
        Self::check_dimensions(row, col)?;
        let idx = self.strings.intern(text);
        self.cells.set(row, col, CellData::new(CellValue::SharedString(idx)));
        Ok(idx)
    }

    /// Write a string literally into the cell, bypassing the shared table.
    ///
    /// Used for single-use text the caller does not want deduplicated.
    pub fn write_inline_string(&mut self, row: u32, col: u16, text: &str) -> Result<()> {
        self.set_cell(
            row,
            col,
            CellData::new(CellValue::InlineString(text.to_string())),
        )
    }

    /// Write a boolean cell
    pub fn write_bool(&mut self, row: u32, col: u16, value: bool) -> Result<()> {
        self.set_cell(row, col, CellData::new(CellValue::Bool(value)))
    }

    /// Write a formula cell with a cached result.
    ///
    /// `formula` is stored without a leading '='; the formula is never
    /// evaluated, `cached` is replayed as the last-known result (0 if the
    /// caller has none).
    pub fn write_formula(&mut self, row: u32, col: u16, formula: &str, cached: f64) -> Result<()> {
        let text = formula.strip_prefix('=').unwrap_or(formula);
        self.set_cell(
            row,
            col,
            CellData::new(CellValue::Formula {
                text: text.to_string(),
                cached,
            }),
        )
    }

    /// Set the style index on an existing cell.
    ///
    /// Returns `false` if no cell exists at the address. Style indices are
    /// opaque references into the external style table.
    pub fn set_cell_style(&mut self, row: u32, col: u16, style_index: u32) -> bool {
        match self.cells.get_mut(row, col) {
            Some(cell) => {
                cell.style_index = Some(style_index);
                true
            }
            None => false,
        }
    }

    /// Resolve the text of a string-bearing cell.
    ///
    /// Shared-string cells resolve through this sheet's table; inline
    /// strings return their literal text. Other kinds return None.
    pub fn cell_text(&self, row: u32, col: u16) -> Option<&str> {
        match &self.cells.get(row, col)?.value {
            CellValue::SharedString(idx) => self.strings.get(*idx).ok(),
            CellValue::InlineString(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get the cell grid
    pub fn cells(&self) -> &CellGrid {
        &self.cells
    }

    /// Get the shared-string table
    pub fn strings(&self) -> &SharedStringTable {
        &self.strings
    }

    /// Get the shared-string table mutably
    pub fn strings_mut(&mut self) -> &mut SharedStringTable {
        &mut self.strings
    }

    // === Row metadata ===

    /// Set an explicit row height, marking it custom
    pub fn set_row_height(&mut self, row: u32, height: f64) {
        let info = self.rows.entry(row).or_default();
        info.height = Some(height);
        info.custom_height = true;
    }

    /// Set row hidden state
    pub fn set_row_hidden(&mut self, row: u32, hidden: bool) {
        self.rows.entry(row).or_default().hidden = hidden;
    }

    /// Insert a complete row override record (used by the codec)
    pub fn insert_row_info(&mut self, row: u32, info: RowInfo) {
        self.rows.insert(row, info);
    }

    /// Get the override record for a row, if any
    pub fn row_info(&self, row: u32) -> Option<&RowInfo> {
        self.rows.get(&row)
    }

    /// Get all row override records, keyed by row index
    pub fn rows_info(&self) -> &BTreeMap<u32, RowInfo> {
        &self.rows
    }

    // === Column metadata ===

    /// Set an explicit width for the columns `min_col..=max_col` (0-based).
    ///
    /// Spans are appended, never merged or split against existing spans;
    /// the first span covering a column wins at lookup time.
    pub fn set_column_width(&mut self, min_col: u16, max_col: u16, width: f64) {
        self.cols.push(ColInfo::span(min_col, max_col).with_width(width));
    }

    /// Hide the columns `min_col..=max_col`
    pub fn set_column_hidden(&mut self, min_col: u16, max_col: u16) {
        let mut info = ColInfo::span(min_col, max_col);
        info.hidden = true;
        self.cols.push(info);
    }

    /// Append a complete column-span record (used by the codec)
    pub fn push_col_info(&mut self, info: ColInfo) {
        self.cols.push(info);
    }

    /// Get the first span covering a column, if any
    pub fn col_info_for(&self, col: u16) -> Option<&ColInfo> {
        self.cols.iter().find(|c| c.covers(col))
    }

    /// Get the explicit width for a column, if any span sets one
    pub fn column_width(&self, col: u16) -> Option<f64> {
        self.col_info_for(col).and_then(|c| c.width)
    }

    /// Get all column-span records in insertion order
    pub fn cols_info(&self) -> &[ColInfo] {
        &self.cols
    }

    // === Merged regions ===

    /// Merge a rectangular range; fails if it overlaps an existing merge
    pub fn merge_cells(&mut self, range: CellRange) -> Result<()> {
        self.merges.merge(range)
    }

    /// Merge a range given as an "A1:B2" string
    pub fn merge_cells_ref(&mut self, range: &str) -> Result<()> {
        self.merges.merge(CellRange::parse(range)?)
    }

    /// Unmerge an exactly matching range; `false` if there was no match
    pub fn unmerge_cells(&mut self, range: &CellRange) -> bool {
        self.merges.unmerge(range)
    }

    /// Unmerge a range given as an "A1:B2" string
    pub fn unmerge_cells_ref(&mut self, range: &str) -> Result<bool> {
        Ok(self.merges.unmerge(&CellRange::parse(range)?))
    }

    /// Get the merge set
    pub fn merges(&self) -> &MergeSet {
        &self.merges
    }

    // === Hyperlinks ===

    /// Attach a hyperlink to a cell.
    ///
    /// `rel_id` is the relationship id the packaging layer allocated for
    /// the target (see [`crate::hyperlink::RelationshipAllocator`]);
    /// `location` is the optional in-document fragment.
    pub fn add_hyperlink(
        &mut self,
        row: u32,
        col: u16,
        rel_id: &str,
        location: Option<String>,
    ) -> Result<()> {
        Self::check_dimensions(row, col)?;
        self.hyperlinks
            .insert(CellAddress::new(row, col), Hyperlink::new(rel_id, location));
        Ok(())
    }

    /// Get the hyperlink set
    pub fn hyperlinks(&self) -> &HyperlinkSet {
        &self.hyperlinks
    }

    // === Lifecycle ===

    /// Clear all cells, metadata, merges, and hyperlinks.
    ///
    /// The shared-string table is left untouched: indices already handed
    /// out stay valid for the lifetime of the workbook.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.rows.clear();
        self.cols.clear();
        self.merges.clear();
        self.hyperlinks = HyperlinkSet::new();
    }
}
