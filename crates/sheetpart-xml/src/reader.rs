//! Worksheet-part streaming reader
//!
//! Forward-only, element-driven parsing over a `quick_xml` event reader.
//! Each top-level block has its own entry point (`read_sheet_data`,
//! `read_cols`, `read_merge_cells`, `read_hyperlinks`); the caller is
//! responsible for positioning the reader just past the block's opening
//! element, which keeps every block independently parseable from a bare
//! fragment. `read_worksheet` drives a whole document by dispatching the
//! blocks it recognizes.
//!
//! Unknown elements and attributes are skipped (logged at debug level),
//! never fatal; malformed numeric text is a typed failure.

use std::io::BufRead;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use sheetpart_core::{
    CellAddress, CellData, CellRange, CellValue, ColInfo, RowInfo, Worksheet,
};

use crate::error::{XmlError, XmlResult};

/// Worksheet-part reader
pub struct WorksheetReader;

/// Accumulated state for the `<c>` element currently being read
#[derive(Default)]
struct PendingCell {
    cell_ref: Option<String>,
    cell_type: Option<String>,
    style: Option<u32>,
    value: Option<String>,
    formula: Option<String>,
    inline: Option<String>,
}

impl WorksheetReader {
    /// Parse a complete worksheet document into a fresh model
    pub fn parse(xml: &str) -> XmlResult<Worksheet> {
        let mut reader = Reader::from_reader(xml.as_bytes());
        reader.trim_text(true);

        let mut sheet = Worksheet::new();
        Self::read_worksheet(&mut reader, &mut sheet)?;
        Ok(sheet)
    }

    /// Consume a worksheet document, dispatching each known block.
    ///
    /// Stops at `</worksheet>` or end of input.
    pub fn read_worksheet<B: BufRead>(
        reader: &mut Reader<B>,
        sheet: &mut Worksheet,
    ) -> XmlResult<()> {
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"worksheet" => {}
                    b"cols" => Self::read_cols(reader, sheet)?,
                    b"sheetData" => Self::read_sheet_data(reader, sheet)?,
                    b"mergeCells" => Self::read_merge_cells(reader, sheet)?,
                    b"hyperlinks" => Self::read_hyperlinks(reader, sheet)?,
                    other => {
                        log::debug!(
                            "skipping unknown worksheet element <{}>",
                            String::from_utf8_lossy(other)
                        );
                        reader.read_to_end_into(e.to_end().name(), &mut Vec::new())?;
                    }
                },
                Ok(Event::End(e)) if e.name().as_ref() == b"worksheet" => break,
                Ok(Event::Eof) => break,
                Err(e) => return Err(XmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Read the `<sheetData>` block: rows, their metadata, and cells.
    ///
    /// The reader must be positioned just past the `<sheetData>` start
    /// element. Row metadata is only recorded when the row carries at
    /// least one non-default attribute.
    pub fn read_sheet_data<B: BufRead>(
        reader: &mut Reader<B>,
        sheet: &mut Worksheet,
    ) -> XmlResult<()> {
        let mut buf = Vec::new();

        let mut pending = PendingCell::default();
        let mut in_cell = false;
        let mut in_value = false;
        let mut in_formula = false;
        let mut in_inline_str = false;
        let mut in_inline_text = false;

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) => match e.name().as_ref() {
                    b"row" => Self::read_row_attrs(&e, sheet)?,
                    b"c" => {
                        in_cell = true;
                        pending = Self::read_cell_attrs(&e)?;
                    }
                    b"v" if in_cell => in_value = true,
                    b"f" if in_cell => in_formula = true,
                    b"is" if in_cell => in_inline_str = true,
                    b"t" if in_inline_str => in_inline_text = true,
                    other => {
                        log::debug!(
                            "skipping unknown sheetData element <{}>",
                            String::from_utf8_lossy(other)
                        );
                        reader.read_to_end_into(e.to_end().name(), &mut Vec::new())?;
                    }
                },
                Ok(Event::Empty(e)) => match e.name().as_ref() {
                    b"row" => Self::read_row_attrs(&e, sheet)?,
                    b"c" => {
                        let pending = Self::read_cell_attrs(&e)?;
                        Self::finish_cell(sheet, pending)?;
                    }
                    _ => {}
                },
                Ok(Event::Text(e)) => {
                    if in_value {
                        pending.value = Some(e.unescape()?.into_owned());
                    } else if in_formula {
                        pending.formula = Some(e.unescape()?.into_owned());
                    } else if in_inline_text {
                        pending.inline = Some(e.unescape()?.into_owned());
                    }
                }
                Ok(Event::End(e)) => match e.name().as_ref() {
                    b"c" => {
                        Self::finish_cell(sheet, std::mem::take(&mut pending))?;
                        in_cell = false;
                    }
                    b"v" => in_value = false,
                    b"f" => in_formula = false,
                    b"is" => in_inline_str = false,
                    b"t" if in_inline_str => in_inline_text = false,
                    b"sheetData" => break,
                    _ => {}
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(XmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Read the `<cols>` block into column-span records.
    ///
    /// The reader must be positioned just past the `<cols>` start element.
    pub fn read_cols<B: BufRead>(reader: &mut Reader<B>, sheet: &mut Worksheet) -> XmlResult<()> {
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"col" => {
                    if let Some(info) = Self::read_col_attrs(&e)? {
                        sheet.push_col_info(info);
                    }
                }
                Ok(Event::End(e)) if e.name().as_ref() == b"cols" => break,
                Ok(Event::Start(e)) => {
                    log::debug!(
                        "skipping unknown cols element <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    );
                    reader.read_to_end_into(e.to_end().name(), &mut Vec::new())?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Read the `<mergeCells>` block into the merge set.
    ///
    /// The reader must be positioned just past the `<mergeCells>` start
    /// element. Overlap validation applies: a document whose merge ranges
    /// intersect is rejected.
    pub fn read_merge_cells<B: BufRead>(
        reader: &mut Reader<B>,
        sheet: &mut Worksheet,
    ) -> XmlResult<()> {
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"mergeCell" => {
                    for attr in e.attributes().flatten() {
                        if attr.key.as_ref() == b"ref" {
                            let raw = attr.unescape_value()?;
                            let range = CellRange::parse(&raw)?;
                            sheet.merge_cells(range)?;
                        }
                    }
                }
                Ok(Event::End(e)) if e.name().as_ref() == b"mergeCells" => break,
                Ok(Event::Start(e)) => {
                    log::debug!(
                        "skipping unknown mergeCells element <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    );
                    reader.read_to_end_into(e.to_end().name(), &mut Vec::new())?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Read the `<hyperlinks>` block.
    ///
    /// The reader must be positioned just past the `<hyperlinks>` start
    /// element. Relationship ids are stored verbatim; resolving them to
    /// targets is the packaging layer's job.
    pub fn read_hyperlinks<B: BufRead>(
        reader: &mut Reader<B>,
        sheet: &mut Worksheet,
    ) -> XmlResult<()> {
        let mut buf = Vec::new();

        loop {
            match reader.read_event_into(&mut buf) {
                Ok(Event::Start(e)) | Ok(Event::Empty(e)) if e.name().as_ref() == b"hyperlink" => {
                    let mut cell_ref: Option<String> = None;
                    let mut rel_id: Option<String> = None;
                    let mut location: Option<String> = None;

                    for attr in e.attributes().flatten() {
                        match attr.key.as_ref() {
                            b"ref" => cell_ref = Some(attr.unescape_value()?.into_owned()),
                            b"r:id" => rel_id = Some(attr.unescape_value()?.into_owned()),
                            b"location" => location = Some(attr.unescape_value()?.into_owned()),
                            _ => {}
                        }
                    }

                    if let (Some(cell_ref), Some(rel_id)) = (cell_ref, rel_id) {
                        let addr = CellAddress::parse(&cell_ref)?;
                        sheet.add_hyperlink(addr.row, addr.col, &rel_id, location)?;
                    }
                }
                Ok(Event::End(e)) if e.name().as_ref() == b"hyperlinks" => break,
                Ok(Event::Start(e)) => {
                    log::debug!(
                        "skipping unknown hyperlinks element <{}>",
                        String::from_utf8_lossy(e.name().as_ref())
                    );
                    reader.read_to_end_into(e.to_end().name(), &mut Vec::new())?;
                }
                Ok(Event::Eof) => break,
                Err(e) => return Err(XmlError::Xml(e)),
                _ => {}
            }
            buf.clear();
        }

        Ok(())
    }

    /// Parse `<row>` attributes, recording a [`RowInfo`] only when at
    /// least one non-default attribute is present
    fn read_row_attrs(e: &BytesStart<'_>, sheet: &mut Worksheet) -> XmlResult<()> {
        let mut row_num: Option<u32> = None;
        let mut info = RowInfo::default();

        for attr in e.attributes().flatten() {
            let raw = attr.unescape_value()?;
            match attr.key.as_ref() {
                b"r" => row_num = Some(parse_row_index("r", &raw)?),
                b"ht" => info.height = Some(parse_f64("ht", &raw)?),
                b"customHeight" => info.custom_height = is_true(&raw),
                b"s" => info.style_index = Some(parse_u32("s", &raw)?),
                b"customFormat" => info.custom_format = is_true(&raw),
                b"hidden" => info.hidden = is_true(&raw),
                b"spans" => {} // redundant with the cell refs
                other => {
                    log::debug!(
                        "skipping unknown row attribute {}",
                        String::from_utf8_lossy(other)
                    );
                }
            }
        }

        match row_num {
            Some(r) if info.has_custom_settings() => {
                sheet.insert_row_info(r, info);
            }
            Some(_) => {}
            None => log::debug!("skipping row element without r attribute"),
        }

        Ok(())
    }

    /// Parse `<c>` attributes into the pending-cell state
    fn read_cell_attrs(e: &BytesStart<'_>) -> XmlResult<PendingCell> {
        let mut pending = PendingCell::default();

        for attr in e.attributes().flatten() {
            let raw = attr.unescape_value()?;
            match attr.key.as_ref() {
                b"r" => pending.cell_ref = Some(raw.into_owned()),
                b"t" => pending.cell_type = Some(raw.into_owned()),
                b"s" => pending.style = Some(parse_u32("s", &raw)?),
                _ => {}
            }
        }

        Ok(pending)
    }

    /// Turn a completed `<c>` element into a model cell.
    ///
    /// An `<f>` child forces the Formula kind regardless of the type tag;
    /// with no type tag and no formula the cell is numeric. Elements that
    /// carry neither value, formula, nor inline text create no cell.
    fn finish_cell(sheet: &mut Worksheet, pending: PendingCell) -> XmlResult<()> {
        let Some(cell_ref) = pending.cell_ref else {
            log::debug!("skipping cell element without r attribute");
            return Ok(());
        };
        let addr = CellAddress::parse(&cell_ref)?;

        let value = if let Some(formula) = pending.formula {
            let cached = match pending.value.as_deref() {
                Some(v) => parse_f64("v", v)?,
                None => 0.0,
            };
            CellValue::Formula {
                text: formula,
                cached,
            }
        } else {
            match (pending.cell_type.as_deref(), pending.value) {
                (Some("s"), Some(v)) => CellValue::SharedString(parse_u32("v", &v)?),
                (Some("b"), Some(v)) => CellValue::Bool(is_true(&v)),
                (Some("inlineStr"), _) => {
                    CellValue::InlineString(pending.inline.unwrap_or_default())
                }
                (Some("str"), Some(v)) => CellValue::InlineString(v),
                (None, Some(v)) | (Some("n"), Some(v)) => CellValue::Number(parse_f64("v", &v)?),
                (t, None) => {
                    // Style-only placeholder or a value-less typed cell
                    log::debug!(
                        "skipping cell {cell_ref} with type {t:?} and no value"
                    );
                    return Ok(());
                }
                (Some(other), Some(v)) => {
                    log::debug!("treating unknown cell type {other:?} at {cell_ref} as inline text");
                    CellValue::InlineString(v)
                }
            }
        };

        sheet.set_cell(
            addr.row,
            addr.col,
            CellData {
                value,
                style_index: pending.style,
            },
        )?;
        Ok(())
    }

    /// Parse `<col>` attributes into a span record; `min`/`max` are
    /// required, anything else defaults
    fn read_col_attrs(e: &BytesStart<'_>) -> XmlResult<Option<ColInfo>> {
        let mut min: Option<u16> = None;
        let mut max: Option<u16> = None;
        let mut width: Option<f64> = None;
        let mut style_index: Option<u32> = None;
        let mut custom_width = false;
        let mut hidden = false;

        for attr in e.attributes().flatten() {
            let raw = attr.unescape_value()?;
            match attr.key.as_ref() {
                b"min" => min = Some(parse_col_index("min", &raw)?),
                b"max" => max = Some(parse_col_index("max", &raw)?),
                b"width" => width = Some(parse_f64("width", &raw)?),
                b"style" => style_index = Some(parse_u32("style", &raw)?),
                b"customWidth" => custom_width = is_true(&raw),
                b"hidden" => hidden = is_true(&raw),
                other => {
                    log::debug!(
                        "skipping unknown col attribute {}",
                        String::from_utf8_lossy(other)
                    );
                }
            }
        }

        let (Some(min), Some(max)) = (min, max) else {
            log::debug!("skipping col element without min/max");
            return Ok(None);
        };

        let mut info = ColInfo::span(min, max);
        info.width = width;
        info.style_index = style_index;
        info.custom_width = custom_width;
        info.hidden = hidden;
        Ok(Some(info))
    }
}

fn is_true(raw: &str) -> bool {
    raw == "1" || raw == "true"
}

// Row numbers and column span bounds are 1-based on the wire; 0 is
// out of grammar, not an alias for the first index.
fn parse_row_index(name: &'static str, raw: &str) -> XmlResult<u32> {
    match raw.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(XmlError::MalformedAttribute {
            name,
            value: raw.to_string(),
        }),
    }
}

fn parse_col_index(name: &'static str, raw: &str) -> XmlResult<u16> {
    match raw.parse::<u16>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(XmlError::MalformedAttribute {
            name,
            value: raw.to_string(),
        }),
    }
}

fn parse_u32(name: &'static str, raw: &str) -> XmlResult<u32> {
    raw.parse()
        .map_err(|_| XmlError::MalformedAttribute {
            name,
            value: raw.to_string(),
        })
}

fn parse_f64(name: &'static str, raw: &str) -> XmlResult<f64> {
    raw.parse()
        .map_err(|_| XmlError::MalformedAttribute {
            name,
            value: raw.to_string(),
        })
}
