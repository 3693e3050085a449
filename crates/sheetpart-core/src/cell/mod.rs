//! Cell types: addresses, values, and sparse storage

mod address;
mod grid;
mod value;

pub use address::{CellAddress, CellRange};
pub use grid::CellGrid;
pub use value::{CellData, CellValue};
