//! Worksheet-part serializer
//!
//! Emits the worksheet XML in a single deterministic pass: dimension,
//! column-info block, sheet data (rows then cells in ascending order),
//! merged cells, hyperlinks. Blocks with no content are omitted entirely.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use sheetpart_core::{CellAddress, CellRange, CellValue, ColInfo, RowInfo, Worksheet};

const MAIN_NS: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// Worksheet-part writer
pub struct WorksheetWriter;

impl WorksheetWriter {
    /// Serialize a worksheet to its XML part as a string.
    ///
    /// Building the document is infallible: the model is validated on
    /// mutation, so nothing here can be half-written.
    pub fn write(sheet: &Worksheet) -> String {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        let _ = write!(
            xml,
            r#"<worksheet xmlns="{MAIN_NS}" xmlns:r="{REL_NS}">"#
        );

        Self::write_dimension(&mut xml, sheet);
        Self::write_cols(&mut xml, sheet);
        Self::write_sheet_data(&mut xml, sheet);
        Self::write_merge_cells(&mut xml, sheet);
        Self::write_hyperlinks(&mut xml, sheet);

        xml.push_str("</worksheet>");
        xml
    }

    /// Serialize a worksheet to UTF-8 bytes
    pub fn write_bytes(sheet: &Worksheet) -> Vec<u8> {
        Self::write(sheet).into_bytes()
    }

    fn write_dimension(xml: &mut String, sheet: &Worksheet) {
        let dim = match sheet.cells().used_bounds() {
            Some((min_row, min_col, max_row, max_col)) => {
                CellRange::from_indices(min_row, min_col, max_row, max_col).to_a1_string()
            }
            None => "A1".to_string(),
        };
        let _ = write!(xml, r#"<dimension ref="{dim}"/>"#);
    }

    fn write_cols(xml: &mut String, sheet: &Worksheet) {
        let cols = sheet.cols_info();
        if cols.is_empty() {
            return;
        }

        xml.push_str("<cols>");
        for info in cols {
            Self::write_col(xml, info);
        }
        xml.push_str("</cols>");
    }

    fn write_col(xml: &mut String, info: &ColInfo) {
        // min/max are 1-based on the wire
        let _ = write!(
            xml,
            r#"<col min="{}" max="{}""#,
            info.min as u32 + 1,
            info.max as u32 + 1
        );
        if let Some(width) = info.width {
            let _ = write!(xml, r#" width="{width}""#);
        }
        if let Some(style) = info.style_index {
            let _ = write!(xml, r#" style="{style}""#);
        }
        if info.custom_width {
            xml.push_str(r#" customWidth="1""#);
        }
        if info.hidden {
            xml.push_str(r#" hidden="1""#);
        }
        xml.push_str("/>");
    }

    fn write_sheet_data(xml: &mut String, sheet: &Worksheet) {
        // Rows with metadata but no cells still get a (self-closing) element
        let mut row_indices: BTreeSet<u32> =
            sheet.cells().iter_rows().map(|(row, _)| row).collect();
        row_indices.extend(sheet.rows_info().keys().copied());

        if row_indices.is_empty() {
            xml.push_str("<sheetData/>");
            return;
        }
        xml.push_str("<sheetData>");

        for row in row_indices {
            let mut span: Option<(u16, u16)> = None;
            for (col, _) in sheet.cells().iter_row(row) {
                span = Some(match span {
                    None => (col, col),
                    Some((first, _)) => (first, col),
                });
            }

            let _ = write!(xml, r#"<row r="{}""#, row + 1);
            if let Some((first, last)) = span {
                // 1-based on the wire
                let _ = write!(
                    xml,
                    r#" spans="{}:{}""#,
                    first as u32 + 1,
                    last as u32 + 1
                );
            }
            if let Some(info) = sheet.row_info(row) {
                Self::write_row_attrs(xml, info);
            }
            if span.is_none() {
                xml.push_str("/>");
                continue;
            }
            xml.push('>');

            for (col, cell) in sheet.cells().iter_row(row) {
                Self::write_cell(xml, row, col, &cell.value, cell.style_index);
            }
            xml.push_str("</row>");
        }

        xml.push_str("</sheetData>");
    }

    fn write_row_attrs(xml: &mut String, info: &RowInfo) {
        if let Some(style) = info.style_index {
            let _ = write!(xml, r#" s="{style}""#);
        }
        if info.custom_format {
            xml.push_str(r#" customFormat="1""#);
        }
        if let Some(height) = info.height {
            let _ = write!(xml, r#" ht="{height}""#);
        }
        if info.custom_height {
            xml.push_str(r#" customHeight="1""#);
        }
        if info.hidden {
            xml.push_str(r#" hidden="1""#);
        }
    }

    fn write_cell(xml: &mut String, row: u32, col: u16, value: &CellValue, style: Option<u32>) {
        let cell_ref = CellAddress::new(row, col).to_a1_string();

        let _ = write!(xml, r#"<c r="{cell_ref}""#);
        if let Some(style) = style {
            let _ = write!(xml, r#" s="{style}""#);
        }

        match value {
            CellValue::Number(n) => {
                let _ = write!(xml, "><v>{n}</v></c>");
            }
            CellValue::SharedString(idx) => {
                let _ = write!(xml, r#" t="s"><v>{idx}</v></c>"#);
            }
            CellValue::InlineString(s) => {
                let _ = write!(
                    xml,
                    r#" t="inlineStr"><is><t>{}</t></is></c>"#,
                    escape_xml(s)
                );
            }
            CellValue::Bool(b) => {
                let _ = write!(xml, r#" t="b"><v>{}</v></c>"#, u8::from(*b));
            }
            CellValue::Formula { text, cached } => {
                let _ = write!(
                    xml,
                    r#" t="str"><f>{}</f><v>{cached}</v></c>"#,
                    escape_xml(text)
                );
            }
        }
    }

    fn write_merge_cells(xml: &mut String, sheet: &Worksheet) {
        let merges = sheet.merges();
        if merges.is_empty() {
            return;
        }

        let _ = write!(xml, r#"<mergeCells count="{}">"#, merges.len());
        for range in merges.ranges() {
            let _ = write!(xml, r#"<mergeCell ref="{}"/>"#, range.to_a1_string());
        }
        xml.push_str("</mergeCells>");
    }

    fn write_hyperlinks(xml: &mut String, sheet: &Worksheet) {
        let links = sheet.hyperlinks();
        if links.is_empty() {
            return;
        }

        xml.push_str("<hyperlinks>");
        for (addr, link) in links.iter() {
            let _ = write!(
                xml,
                r#"<hyperlink ref="{}" r:id="{}""#,
                addr.to_a1_string(),
                escape_xml(&link.rel_id)
            );
            if let Some(location) = &link.location {
                let _ = write!(xml, r#" location="{}""#, escape_xml(location));
            }
            xml.push_str("/>");
        }
        xml.push_str("</hyperlinks>");
    }
}

/// Escape text for use in XML content and attribute values
pub(crate) fn escape_xml(s: &str) -> String {
    if !s.contains(['&', '<', '>', '"', '\'']) {
        return s.to_string();
    }
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
