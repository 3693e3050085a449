//! End-to-end tests for the worksheet codec.
//!
//! Each test builds a model in memory, serializes it with
//! `WorksheetWriter`, and asserts on the exact markup or reads fixture
//! documents back with `WorksheetReader` and asserts on the model.

use pretty_assertions::assert_eq;

use sheetpart_core::{
    CellAddress, CellRange, CellValue, RelationshipAllocator, SequentialRelIds, Worksheet,
};
use sheetpart_xml::{WorksheetReader, WorksheetWriter};

#[test]
fn test_write_empty_worksheet() {
    let sheet = Worksheet::new();
    let xml = WorksheetWriter::write(&sheet);

    assert!(xml.starts_with("<?xml"));
    assert!(xml.contains(r#"<dimension ref="A1"/>"#));
    assert!(xml.contains("<sheetData/>"));
    assert!(!xml.contains("<mergeCell"));
    assert!(!xml.contains("<hyperlink"));
    assert!(!xml.contains("<cols"));
}

#[test]
fn test_write_cells() {
    let mut sheet = Worksheet::new();
    sheet.write_number(0, 0, 123.0).unwrap();
    let idx = sheet.write_string(1, 0, "Hello").unwrap();
    assert_eq!(idx, 0);
    sheet.write_inline_string(2, 0, "Hello inline").unwrap();
    sheet.write_bool(3, 0, true).unwrap();
    sheet.write_formula(4, 0, "=44+33", 0.0).unwrap();
    sheet.write_formula(4, 1, "=44+33", 77.0).unwrap();

    let xml = WorksheetWriter::write(&sheet);

    assert!(xml.contains(r#"<c r="A1"><v>123</v></c>"#));
    assert!(xml.contains(r#"<c r="A2" t="s"><v>0</v></c>"#));
    assert!(xml.contains(r#"<c r="A3" t="inlineStr"><is><t>Hello inline</t></is></c>"#));
    assert!(xml.contains(r#"<c r="A4" t="b"><v>1</v></c>"#));
    assert!(xml.contains(r#"<c r="A5" t="str"><f>44+33</f><v>0</v></c>"#));
    assert!(xml.contains(r#"<c r="B5" t="str"><f>44+33</f><v>77</v></c>"#));
}

#[test]
fn test_string_table_deduplicates() {
    let mut sheet = Worksheet::new();
    let a = sheet.write_string(0, 0, "Hello").unwrap();
    let b = sheet.write_string(1, 0, "World").unwrap();
    let c = sheet.write_string(2, 0, "Hello").unwrap();

    assert_eq!(a, 0);
    assert_eq!(b, 1);
    assert_eq!(c, 0);
    assert_eq!(sheet.strings().len(), 2);

    let xml = WorksheetWriter::write(&sheet);
    assert!(xml.contains(r#"<c r="A1" t="s"><v>0</v></c>"#));
    assert!(xml.contains(r#"<c r="A2" t="s"><v>1</v></c>"#));
    assert!(xml.contains(r#"<c r="A3" t="s"><v>0</v></c>"#));
}

#[test]
fn test_write_hyperlinks() {
    let mut alloc = SequentialRelIds::new();
    let mut sheet = Worksheet::new();

    let id = alloc.allocate("http://example.org/");
    sheet.write_string(0, 0, "Haha").unwrap();
    sheet.add_hyperlink(0, 0, &id, None).unwrap();

    let id = alloc.allocate("mailto:hello@example.org");
    sheet.write_string(1, 0, "Mail").unwrap();
    sheet.add_hyperlink(1, 0, &id, None).unwrap();

    // Same target as A1 reuses the relationship
    let id = alloc.allocate("http://example.org/");
    sheet.write_string(2, 0, "Again").unwrap();
    sheet.add_hyperlink(2, 0, &id, None).unwrap();

    let id = alloc.allocate("http://example.org/page");
    sheet.write_string(3, 0, "Page").unwrap();
    sheet
        .add_hyperlink(3, 0, &id, Some("test".to_string()))
        .unwrap();

    let xml = WorksheetWriter::write(&sheet);

    assert!(xml.contains(r#"<hyperlink ref="A1" r:id="rId1"/>"#));
    assert!(xml.contains(r#"<hyperlink ref="A2" r:id="rId2"/>"#));
    assert!(xml.contains(r#"<hyperlink ref="A3" r:id="rId1"/>"#));
    assert!(xml.contains(r#"<hyperlink ref="A4" r:id="rId3" location="test"/>"#));
}

#[test]
fn test_merge_and_serialize() {
    let mut sheet = Worksheet::new();
    sheet.write_string(0, 1, "Merged").unwrap();
    sheet.merge_cells_ref("B1:B5").unwrap();

    let xml = WorksheetWriter::write(&sheet);
    assert!(xml.contains(r#"<mergeCells count="1"><mergeCell ref="B1:B5"/></mergeCells>"#));
}

#[test]
fn test_unmerge_removes_block() {
    let mut sheet = Worksheet::new();
    sheet.merge_cells_ref("B1:B5").unwrap();

    assert!(sheet.unmerge_cells_ref("B1:B5").unwrap());
    assert!(sheet.merges().is_empty());

    let xml = WorksheetWriter::write(&sheet);
    assert!(!xml.contains("<mergeCell"));
}

#[test]
fn test_unmerge_requires_exact_range() {
    let mut sheet = Worksheet::new();
    sheet.merge_cells_ref("B1:B5").unwrap();

    // A sub-range of a merged region does not match
    assert!(!sheet.unmerge_cells_ref("B2:B3").unwrap());
    assert_eq!(sheet.merges().len(), 1);

    // Reversed corners normalize to the same rectangle
    let reversed = CellRange::new(CellAddress::new(4, 1), CellAddress::new(0, 1));
    assert!(sheet.unmerge_cells(&reversed));
    assert!(sheet.merges().is_empty());
}

#[test]
fn test_overlapping_merge_rejected() {
    let mut sheet = Worksheet::new();
    sheet.merge_cells_ref("B1:B5").unwrap();

    let err = sheet.merge_cells_ref("A3:C3").unwrap_err();
    assert!(matches!(err, sheetpart_core::Error::MergeOverlap { .. }));
    assert_eq!(sheet.merges().len(), 1);
}

#[test]
fn test_read_sheet_data() {
    let xml = concat!(
        r#"<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">"#,
        r#"<sheetData>"#,
        r#"<row r="1" spans="1:2">"#,
        r#"<c r="A1"><v>123</v></c>"#,
        r#"<c r="B1" t="s"><v>0</v></c>"#,
        r#"</row>"#,
        r#"<row r="2" spans="1:2">"#,
        r#"<c r="A2" t="str"><f>44+33</f><v>77</v></c>"#,
        r#"<c r="B2"><f>44+33</f><v>77</v></c>"#,
        r#"</row>"#,
        r#"</sheetData>"#,
        r#"</worksheet>"#,
    );

    // The workbook-level table already holds the referenced string
    let mut sheet = Worksheet::new();
    sheet.strings_mut().intern("Hello");

    let mut reader = quick_xml::reader::Reader::from_reader(xml.as_bytes());
    reader.trim_text(true);
    WorksheetReader::read_worksheet(&mut reader, &mut sheet).unwrap();

    match sheet.cell_at(0, 0).expect("A1 should exist").value {
        CellValue::Number(n) => assert_eq!(n, 123.0),
        ref other => panic!("Expected Number, got {other:?}"),
    }

    match sheet.cell_at(0, 1).expect("B1 should exist").value {
        CellValue::SharedString(idx) => assert_eq!(idx, 0),
        ref other => panic!("Expected SharedString, got {other:?}"),
    }
    assert_eq!(sheet.cell_text(0, 1), Some("Hello"));

    // Formula kind comes from the <f> child, with or without a type tag
    for col in [0u16, 1] {
        match &sheet.cell_at(1, col).expect("row 2 cell should exist").value {
            CellValue::Formula { text, cached } => {
                assert_eq!(text, "44+33");
                assert_eq!(*cached, 77.0);
            }
            other => panic!("Expected Formula, got {other:?}"),
        }
    }
}

#[test]
fn test_read_inline_string() {
    let xml = concat!(
        r#"<worksheet><sheetData><row r="1">"#,
        r#"<c r="A1" t="inlineStr"><is><t>Hello inline</t></is></c>"#,
        r#"</row></sheetData></worksheet>"#,
    );

    let sheet = WorksheetReader::parse(xml).unwrap();
    assert_eq!(sheet.cell_text(0, 0), Some("Hello inline"));
}

#[test]
fn test_read_bool_cell() {
    let xml = concat!(
        r#"<worksheet><sheetData><row r="1">"#,
        r#"<c r="A1" t="b"><v>1</v></c>"#,
        r#"<c r="B1" t="b"><v>0</v></c>"#,
        r#"</row></sheetData></worksheet>"#,
    );

    let sheet = WorksheetReader::parse(xml).unwrap();
    assert_eq!(sheet.cell_at(0, 0).unwrap().value, CellValue::Bool(true));
    assert_eq!(sheet.cell_at(0, 1).unwrap().value, CellValue::Bool(false));
}

#[test]
fn test_read_cols_info() {
    let xml = concat!(
        r#"<worksheet>"#,
        r#"<cols><col min="9" max="15" width="5" style="4" customWidth="1"/></cols>"#,
        r#"<sheetData/>"#,
        r#"</worksheet>"#,
    );

    let sheet = WorksheetReader::parse(xml).unwrap();
    assert_eq!(sheet.cols_info().len(), 1);

    let info = &sheet.cols_info()[0];
    assert_eq!(info.min, 8);
    assert_eq!(info.max, 14);
    assert_eq!(info.width, Some(5.0));
    assert_eq!(info.style_index, Some(4));
    assert!(info.custom_width);

    // Every column inside the span reports the width, neighbors do not
    for col in 8u16..=14 {
        assert_eq!(sheet.column_width(col), Some(5.0));
    }
    assert_eq!(sheet.column_width(7), None);
    assert_eq!(sheet.column_width(15), None);
}

#[test]
fn test_read_rows_info() {
    let xml = concat!(
        r#"<worksheet><sheetData>"#,
        r#"<row r="1" spans="1:1"><c r="A1"><v>1</v></c></row>"#,
        r#"<row r="2" spans="1:1" s="3" customFormat="1" ht="40" customHeight="1">"#,
        r#"<c r="A2"><v>2</v></c></row>"#,
        r#"</sheetData></worksheet>"#,
    );

    let sheet = WorksheetReader::parse(xml).unwrap();

    // Only the overriding row gets a record
    assert!(sheet.row_info(0).is_none());

    let info = sheet.row_info(1).expect("row 2 should have overrides");
    assert_eq!(info.height, Some(40.0));
    assert!(info.custom_height);
    assert_eq!(info.style_index, Some(3));
    assert!(info.custom_format);
    assert!(!info.hidden);
}

#[test]
fn test_read_merge_cells() {
    let xml = concat!(
        r#"<worksheet><sheetData/>"#,
        r#"<mergeCells count="2">"#,
        r#"<mergeCell ref="B1:B5"/>"#,
        r#"<mergeCell ref="E2:G4"/>"#,
        r#"</mergeCells></worksheet>"#,
    );

    let sheet = WorksheetReader::parse(xml).unwrap();
    let ranges = sheet.merges().ranges();
    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[0].to_a1_string(), "B1:B5");
    assert_eq!(ranges[1].to_a1_string(), "E2:G4");
}

#[test]
fn test_read_hyperlinks() {
    let xml = concat!(
        r#"<worksheet xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">"#,
        r#"<sheetData/>"#,
        r#"<hyperlinks>"#,
        r#"<hyperlink ref="A1" r:id="rId1"/>"#,
        r#"<hyperlink ref="A2" r:id="rId2" location="test"/>"#,
        r#"</hyperlinks></worksheet>"#,
    );

    let sheet = WorksheetReader::parse(xml).unwrap();
    assert_eq!(sheet.hyperlinks().len(), 2);

    let (addr, link) = sheet.hyperlinks().iter().next().unwrap();
    assert_eq!(addr.to_a1_string(), "A1");
    assert_eq!(link.rel_id, "rId1");
    assert_eq!(link.location, None);

    let (addr, link) = sheet.hyperlinks().iter().nth(1).unwrap();
    assert_eq!(addr.to_a1_string(), "A2");
    assert_eq!(link.location.as_deref(), Some("test"));
}

#[test]
fn test_hidden_flags_round_trip() {
    let mut sheet = Worksheet::new();
    sheet.write_number(2, 0, 5.0).unwrap();
    sheet.set_row_hidden(2, true);
    sheet.set_column_hidden(1, 3);

    let xml = WorksheetWriter::write(&sheet);
    assert!(xml.contains(r#"<row r="3" spans="1:1" hidden="1">"#));
    assert!(xml.contains(r#"<col min="2" max="4" hidden="1"/>"#));

    let parsed = WorksheetReader::parse(&xml).unwrap();

    let info = parsed.row_info(2).expect("hidden row should round-trip");
    assert!(info.hidden);
    assert_eq!(info.height, None);

    let col = parsed.col_info_for(2).expect("hidden span should round-trip");
    assert!(col.hidden);
    assert_eq!(col.min, 1);
    assert_eq!(col.max, 3);
    assert_eq!(col.width, None);
    assert!(!col.custom_width);
}

#[test]
fn test_round_trip() {
    let mut sheet = Worksheet::new();
    sheet.write_number(0, 0, 123.5).unwrap();
    sheet.write_string(1, 0, "Hello & <World>").unwrap();
    sheet.write_inline_string(2, 0, "inline \"text\"").unwrap();
    sheet.write_bool(3, 0, false).unwrap();
    sheet.write_formula(4, 0, "SUM(A1:A4)", 124.5).unwrap();
    sheet.set_row_height(4, 30.0);
    sheet.set_column_width(2, 4, 9.5);
    sheet.merge_cells_ref("E2:G4").unwrap();
    sheet.add_hyperlink(0, 3, "rId1", Some("top".to_string())).unwrap();

    let xml = WorksheetWriter::write(&sheet);
    let parsed = WorksheetReader::parse(&xml).unwrap();

    assert_eq!(parsed.cells().cell_count(), sheet.cells().cell_count());
    for (row, col, cell) in sheet.cells().iter() {
        assert_eq!(parsed.cell_at(row, col), Some(cell));
    }
    assert_eq!(parsed.row_info(4), sheet.row_info(4));
    assert_eq!(parsed.cols_info(), sheet.cols_info());
    assert_eq!(
        parsed.merges().ranges()[0].to_a1_string(),
        "E2:G4"
    );
    assert_eq!(
        parsed.hyperlinks().get(&"D1".parse().unwrap()).unwrap().location.as_deref(),
        Some("top")
    );
}

#[test]
fn test_dimension_tracks_used_bounds() {
    let mut sheet = Worksheet::new();
    sheet.write_number(1, 1, 1.0).unwrap();
    sheet.write_number(4, 6, 2.0).unwrap();

    let xml = WorksheetWriter::write(&sheet);
    assert!(xml.contains(r#"<dimension ref="B2:G5"/>"#));
}
