//! # sheetpart-core
//!
//! In-memory model of a single OOXML worksheet part: sparse cell storage,
//! A1 addressing, a deduplicating shared-string table, row/column
//! metadata, merged regions, and hyperlinks. The XML codec lives in the
//! companion `sheetpart-xml` crate.
//!
//! ## Example
//!
//! ```rust
//! use sheetpart_core::Worksheet;
//!
//! let mut sheet = Worksheet::new();
//! sheet.write_number(0, 1, 123.0).unwrap();      // B1
//! sheet.write_string(1, 1, "Hello").unwrap();    // B2, interned
//! sheet.merge_cells_ref("B1:B2").unwrap();
//! ```

pub mod cell;
pub mod column;
pub mod error;
pub mod hyperlink;
pub mod merge;
pub mod row;
pub mod strings;
pub mod worksheet;

// Re-exports for convenience
pub use cell::{CellAddress, CellData, CellGrid, CellRange, CellValue};
pub use column::ColInfo;
pub use error::{Error, Result};
pub use hyperlink::{Hyperlink, HyperlinkSet, RelationshipAllocator, SequentialRelIds};
pub use merge::MergeSet;
pub use row::RowInfo;
pub use strings::SharedStringTable;
pub use worksheet::Worksheet;

/// Maximum number of rows in a worksheet (format limit)
pub const MAX_ROWS: u32 = 1_048_576;

/// Maximum number of columns in a worksheet (format limit)
pub const MAX_COLS: u16 = 16_384;
