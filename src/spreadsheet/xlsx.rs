use crate::error::OcrSheetError;
use crate::error::ResultMessage;
use crate::helpers::xml::escape_ooxml_string;
use crate::helpers::xml::needs_space_preserve;
use crate::helpers::xml::XmlWriter;
use crate::helpers::zip::ZipHelper;
use crate::spreadsheet::reference::index_to_reference;
use crate::spreadsheet::shared_strings::SharedStrings;
use crate::spreadsheet::Sheet;
use crate::spreadsheet::Workbook;
use std::io::Cursor;
use std::io::Write;
use tracing::debug;
use zip::ZipWriter;

// XML namespaces of the SpreadsheetML package
const NS_MAIN: &str = "http://schemas.openxmlformats.org/spreadsheetml/2006/main";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const NS_PACKAGE_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";

// Relationship types
const REL_OFFICE_DOCUMENT: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_WORKSHEET: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet";
const REL_STYLES: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";
const REL_SHARED_STRINGS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/sharedStrings";

// Content types
const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_XML: &str = "application/xml";
const CT_WORKBOOK: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml";
const CT_WORKSHEET: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml";
const CT_SHARED_STRINGS: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sharedStrings+xml";

// Cell style indexes into `cellXfs`
const STYLE_HEADER: &str = "1";

/// Shared string indexes of one row, flagged when the row is a header
type IndexedRow = (bool, Vec<usize>);

/// Serializes a workbook into an in-memory `.xlsx` package.
///
/// Parts are written in a fixed order with fixed timestamps, so the same
/// workbook always yields the same bytes.
pub(super) fn write_workbook(workbook: &Workbook) -> Result<Vec<u8>, OcrSheetError> {
    let mut shared_strings = SharedStrings::default();
    let indexed_sheets = workbook
        .sheets()
        .iter()
        .map(|sheet| index_sheet(sheet, &mut shared_strings))
        .collect::<Vec<_>>();

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let sheet_count = workbook.sheets().len();
    zip.write_xml_part("[Content_Types].xml", |writer| write_content_types(writer, sheet_count))?;
    zip.write_xml_part("_rels/.rels", |writer| write_package_relationships(writer))?;
    zip.write_xml_part("xl/workbook.xml", |writer| write_workbook_part(writer, workbook.sheets()))?;
    zip.write_xml_part("xl/_rels/workbook.xml.rels", |writer| write_workbook_relationships(writer, sheet_count))?;
    zip.write_xml_part("xl/styles.xml", |writer| write_styles(writer))?;
    zip.write_xml_part("xl/sharedStrings.xml", |writer| write_shared_strings(writer, &shared_strings))?;
    for (index, (sheet, rows)) in workbook.sheets().iter().zip(&indexed_sheets).enumerate() {
        debug!("Writing sheet '{}' with {} rows", sheet.name(), rows.len());
        let path = format!("xl/worksheets/sheet{}.xml", index + 1);
        zip.write_xml_part(&path, |writer| write_worksheet(writer, sheet, rows))?;
    }

    let bytes = zip.finish().map_err(OcrSheetError::from).with_prefix("xlsx")?.into_inner();
    debug!(
        "Wrote xlsx with {} sheets, {} unique strings, {} bytes",
        sheet_count,
        shared_strings.unique_count(),
        bytes.len()
    );
    Ok(bytes)
}

/// Replaces the text of every cell of a sheet with shared string indexes
fn index_sheet(sheet: &Sheet, shared_strings: &mut SharedStrings) -> Vec<IndexedRow> {
    sheet
        .written_rows()
        .map(|(is_header, cells)| (is_header, cells.iter().map(|value| shared_strings.intern(value)).collect()))
        .collect()
}

fn write_content_types<W: Write>(writer: &mut XmlWriter<W>, sheet_count: usize) -> Result<(), OcrSheetError> {
    writer.element("Types", &[("xmlns", NS_CONTENT_TYPES)], |writer| {
        writer.empty("Default", &[("Extension", "rels"), ("ContentType", CT_RELATIONSHIPS)])?;
        writer.empty("Default", &[("Extension", "xml"), ("ContentType", CT_XML)])?;
        writer.empty("Override", &[("PartName", "/xl/workbook.xml"), ("ContentType", CT_WORKBOOK)])?;
        for index in 1..=sheet_count {
            let part_name = format!("/xl/worksheets/sheet{}.xml", index);
            writer.empty("Override", &[("PartName", part_name.as_str()), ("ContentType", CT_WORKSHEET)])?;
        }
        writer.empty("Override", &[("PartName", "/xl/styles.xml"), ("ContentType", CT_STYLES)])?;
        writer.empty("Override", &[("PartName", "/xl/sharedStrings.xml"), ("ContentType", CT_SHARED_STRINGS)])
    })
}

fn write_package_relationships<W: Write>(writer: &mut XmlWriter<W>) -> Result<(), OcrSheetError> {
    writer.element("Relationships", &[("xmlns", NS_PACKAGE_RELATIONSHIPS)], |writer| {
        writer.empty("Relationship", &[("Id", "rId1"), ("Type", REL_OFFICE_DOCUMENT), ("Target", "xl/workbook.xml")])
    })
}

fn write_workbook_part<W: Write>(writer: &mut XmlWriter<W>, sheets: &[Sheet]) -> Result<(), OcrSheetError> {
    writer.element("workbook", &[("xmlns", NS_MAIN), ("xmlns:r", NS_RELATIONSHIPS)], |writer| {
        writer.element("sheets", &[], |writer| {
            for (index, sheet) in sheets.iter().enumerate() {
                let sheet_id = (index + 1).to_string();
                let relationship_id = format!("rId{}", index + 1);
                writer.empty("sheet", &[("name", sheet.name()), ("sheetId", sheet_id.as_str()), ("r:id", relationship_id.as_str())])?;
            }
            Ok(())
        })
    })
}

/// Worksheets take `rId1..rIdN`; styles and shared strings follow them
fn write_workbook_relationships<W: Write>(writer: &mut XmlWriter<W>, sheet_count: usize) -> Result<(), OcrSheetError> {
    writer.element("Relationships", &[("xmlns", NS_PACKAGE_RELATIONSHIPS)], |writer| {
        for index in 1..=sheet_count {
            let id = format!("rId{}", index);
            let target = format!("worksheets/sheet{}.xml", index);
            writer.empty("Relationship", &[("Id", id.as_str()), ("Type", REL_WORKSHEET), ("Target", target.as_str())])?;
        }
        let styles_id = format!("rId{}", sheet_count + 1);
        writer.empty("Relationship", &[("Id", styles_id.as_str()), ("Type", REL_STYLES), ("Target", "styles.xml")])?;
        let shared_strings_id = format!("rId{}", sheet_count + 2);
        writer.empty("Relationship", &[("Id", shared_strings_id.as_str()), ("Type", REL_SHARED_STRINGS), ("Target", "sharedStrings.xml")])
    })
}

/// Minimal stylesheet: a regular font for data and a bold one for header cells
fn write_styles<W: Write>(writer: &mut XmlWriter<W>) -> Result<(), OcrSheetError> {
    fn font<W: Write>(writer: &mut XmlWriter<W>, bold: bool) -> Result<(), OcrSheetError> {
        writer.element("font", &[], |writer| {
            if bold {
                writer.empty("b", &[])?;
            }
            writer.empty("sz", &[("val", "11")])?;
            writer.empty("name", &[("val", "Calibri")])?;
            writer.empty("family", &[("val", "2")])
        })
    }

    writer.element("styleSheet", &[("xmlns", NS_MAIN)], |writer| {
        writer.element("fonts", &[("count", "2")], |writer| {
            font(writer, false)?;
            font(writer, true)
        })?;
        writer.element("fills", &[("count", "2")], |writer| {
            writer.element("fill", &[], |writer| writer.empty("patternFill", &[("patternType", "none")]))?;
            writer.element("fill", &[], |writer| writer.empty("patternFill", &[("patternType", "gray125")]))
        })?;
        writer.element("borders", &[("count", "1")], |writer| {
            writer.element("border", &[], |writer| {
                for side in ["left", "right", "top", "bottom", "diagonal"] {
                    writer.empty(side, &[])?;
                }
                Ok(())
            })
        })?;
        writer.element("cellStyleXfs", &[("count", "1")], |writer| {
            writer.empty("xf", &[("numFmtId", "0"), ("fontId", "0"), ("fillId", "0"), ("borderId", "0")])
        })?;
        writer.element("cellXfs", &[("count", "2")], |writer| {
            writer.empty("xf", &[("numFmtId", "0"), ("fontId", "0"), ("fillId", "0"), ("borderId", "0"), ("xfId", "0")])?;
            writer.empty("xf", &[("numFmtId", "0"), ("fontId", "1"), ("fillId", "0"), ("borderId", "0"), ("xfId", "0"), ("applyFont", "1")])
        })?;
        writer.element("cellStyles", &[("count", "1")], |writer| {
            writer.empty("cellStyle", &[("name", "Normal"), ("xfId", "0"), ("builtinId", "0")])
        })
    })
}

fn write_shared_strings<W: Write>(writer: &mut XmlWriter<W>, shared_strings: &SharedStrings) -> Result<(), OcrSheetError> {
    let count = shared_strings.count().to_string();
    let unique_count = shared_strings.unique_count().to_string();
    writer.element("sst", &[("xmlns", NS_MAIN), ("count", count.as_str()), ("uniqueCount", unique_count.as_str())], |writer| {
        for value in shared_strings.iter() {
            writer.element("si", &[], |writer| {
                let attributes: &[(&str, &str)] = if needs_space_preserve(value) {
                    &[("xml:space", "preserve")]
                } else {
                    &[]
                };
                writer.text_element("t", attributes, &escape_ooxml_string(value))
            })?;
        }
        Ok(())
    })
}

fn write_worksheet<W: Write>(writer: &mut XmlWriter<W>, sheet: &Sheet, rows: &[IndexedRow]) -> Result<(), OcrSheetError> {
    writer.element("worksheet", &[("xmlns", NS_MAIN), ("xmlns:r", NS_RELATIONSHIPS)], |writer| {
        writer.empty("dimension", &[("ref", sheet.dimension().as_str())])?;
        writer.element("sheetData", &[], |writer| {
            for (row, (is_header, indexes)) in rows.iter().enumerate() {
                let row_number = (row + 1).to_string();
                writer.element("row", &[("r", row_number.as_str())], |writer| {
                    for (col, index) in indexes.iter().enumerate() {
                        let reference = index_to_reference(row, col);
                        let mut attributes = vec![("r", reference.as_str()), ("t", "s")];
                        if *is_header {
                            attributes.push(("s", STYLE_HEADER));
                        }
                        writer.element("c", &attributes, |writer| writer.text_element("v", &[], &index.to_string()))?;
                    }
                    Ok(())
                })?;
            }
            Ok(())
        })
    })
}
