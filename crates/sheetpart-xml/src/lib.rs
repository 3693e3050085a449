//! Streaming XML codec for worksheet parts.
//!
//! Pairs with [`sheetpart_core`]: [`WorksheetWriter`] serializes a
//! [`sheetpart_core::Worksheet`] to the worksheet-part vocabulary, and
//! [`WorksheetReader`] parses documents or individual blocks back into
//! the model. Both sides are forward-only streams; neither builds a DOM.
//!
//! ```
//! use sheetpart_core::Worksheet;
//! use sheetpart_xml::{WorksheetReader, WorksheetWriter};
//!
//! let mut sheet = Worksheet::new();
//! sheet.write_number(0, 0, 123.0).unwrap();
//!
//! let xml = WorksheetWriter::write(&sheet);
//! let parsed = WorksheetReader::parse(&xml).unwrap();
//! assert_eq!(parsed.cell_at(0, 0), sheet.cell_at(0, 0));
//! ```

mod error;
mod reader;
mod writer;

pub use error::{XmlError, XmlResult};
pub use reader::WorksheetReader;
pub use writer::WorksheetWriter;
