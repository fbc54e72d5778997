use calamine::{open_workbook_from_rs, Reader, Xlsx};
use ocr_sheet::extraction::document::{DetectedTable, Entity, Page};
use ocr_sheet::{
    normalize, DocumentProcessor, ExportFormat, ExtractionResult, Extractor, FormFields, ProcessedDocument,
    ProcessorConfig, RawDocument, Table, UNKNOWN_PLACEHOLDER,
};
use pretty_assertions::assert_eq;
use std::io::Cursor;
use std::io::Read;

/// Reads every sheet of an `.xlsx` buffer as `(name, rows)`, cells rendered as text.
fn read_sheets(bytes: &[u8]) -> Vec<(String, Vec<Vec<String>>)> {
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes.to_vec())).expect("valid xlsx");
    workbook
        .sheet_names()
        .into_iter()
        .map(|name| {
            let range = workbook.worksheet_range(&name).expect("readable sheet");
            let rows = range
                .rows()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect();
            (name, rows)
        })
        .collect()
}

fn strings(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn table(rows: &[&[&str]]) -> Table {
    Table::new(strings(rows))
}

#[test]
fn scenario_form_fields_only() {
    let fields: FormFields = [("Name", "Alice"), ("Age", "30")].into_iter().collect();
    let export = normalize(&ExtractionResult::form(fields, Vec::new()), ExportFormat::Spreadsheet).unwrap();

    assert_eq!(export.file_name, "form_data.xlsx");
    assert_eq!(export.mime_type, "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet");
    let sheets = read_sheets(&export.bytes);
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].0, "Extracted Text");
    assert_eq!(sheets[0].1, strings(&[&["Field", "Value"], &["Name", "Alice"], &["Age", "30"]]));
}

#[test]
fn scenario_plain_text_as_text() {
    let export = normalize(&ExtractionResult::plain_text("Hello world"), ExportFormat::Text).unwrap();

    assert_eq!(export.file_name, "extracted_text.txt");
    assert_eq!(export.mime_type, "text/plain");
    assert_eq!(export.bytes, b"Hello world".to_vec());
}

#[test]
fn scenario_table_without_fields() {
    let result = ExtractionResult::form(FormFields::new(), vec![table(&[&["H1", "H2"], &["a", "b"]])]);
    let export = normalize(&result, ExportFormat::Spreadsheet).unwrap();

    let sheets = read_sheets(&export.bytes);
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[0].0, "Extracted Text");
    assert_eq!(sheets[0].1, strings(&[&["Field", "Value"]]));
    assert_eq!(sheets[1].0, "Table_1");
    assert_eq!(sheets[1].1, strings(&[&["H1", "H2"], &["a", "b"]]));
}

#[test]
fn plain_text_spreadsheet_has_single_data_row() {
    let text = "Première ligne\nsecond line 😀";
    let export = normalize(&ExtractionResult::plain_text(text), ExportFormat::Spreadsheet).unwrap();

    assert_eq!(export.file_name, "extracted_text.xlsx");
    let sheets = read_sheets(&export.bytes);
    assert_eq!(sheets.len(), 1);
    assert_eq!(sheets[0].1, strings(&[&["Extracted Text"], &[text]]));
}

#[test]
fn one_sheet_per_table_with_matching_row_counts() {
    let fields: FormFields = [("Invoice", "F-001"), ("Total", "12.50"), ("Due", "2024-10-01")].into_iter().collect();
    let tables = vec![
        table(&[&["Item", "Qty"], &["Pen", "2"], &["Ink", "1"]]),
        table(&[&["Only header"]]),
        table(&[&["a", "b", "c"], &["d", "e", "f"], &["g", "h", "i"], &["j", "k", "l"]]),
    ];
    let result = ExtractionResult::form(fields.clone(), tables.clone());
    let sheets = read_sheets(&normalize(&result, ExportFormat::Spreadsheet).unwrap().bytes);

    assert_eq!(sheets.len(), 1 + tables.len());
    assert_eq!(sheets[0].1.len() - 1, fields.len());
    for (index, table) in tables.iter().enumerate() {
        let (name, rows) = &sheets[index + 1];
        assert_eq!(name, &format!("Table_{}", index + 1));
        assert_eq!(rows.len(), table.len());
        assert_eq!(rows, table.rows());
    }
}

#[test]
fn placeholder_is_written_once() {
    let mut fields = FormFields::new();
    fields.insert_entity(Some("Signature"), None);
    fields.insert_entity(Some(UNKNOWN_PLACEHOLDER), Some("kept"));
    let export = normalize(&ExtractionResult::form(fields, Vec::new()), ExportFormat::Spreadsheet).unwrap();

    let sheets = read_sheets(&export.bytes);
    assert_eq!(
        sheets[0].1,
        strings(&[&["Field", "Value"], &["Signature", UNKNOWN_PLACEHOLDER], &[UNKNOWN_PLACEHOLDER, "kept"]])
    );
}

#[test]
fn repeated_exports_are_byte_identical() {
    let fields: FormFields = [("Name", "Alice")].into_iter().collect();
    let result = ExtractionResult::form(fields, vec![table(&[&["H1"], &["v"]])]);

    let first = normalize(&result, ExportFormat::Spreadsheet).unwrap();
    let second = normalize(&result, ExportFormat::Spreadsheet).unwrap();
    assert_eq!(first, second);

    let text = ExtractionResult::plain_text("same");
    assert_eq!(
        normalize(&text, ExportFormat::Spreadsheet).unwrap().bytes,
        normalize(&text, ExportFormat::Spreadsheet).unwrap().bytes
    );
}

/// Reads the raw XML of one package part.
fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).expect("valid zip");
    let mut xml = String::new();
    archive.by_name(name).expect("part present").read_to_string(&mut xml).expect("utf-8 part");
    xml
}

#[test]
fn control_characters_are_escaped_in_spreadsheet_export() {
    let result = ExtractionResult::form(FormFields::new(), vec![table(&[&["ok", "esc\u{1B}"]])]);
    let export = normalize(&result, ExportFormat::Spreadsheet).unwrap();

    let shared_strings = read_part(&export.bytes, "xl/sharedStrings.xml");
    assert!(shared_strings.contains("<t>esc_x001B_</t>"));
    let sheets = read_sheets(&export.bytes);
    assert_eq!(sheets.len(), 2);
    assert_eq!(sheets[1].0, "Table_1");
    assert_eq!(sheets[1].1.len(), 1);

    let text = normalize(&ExtractionResult::plain_text("page 1\u{C}page 2"), ExportFormat::Spreadsheet).unwrap();
    assert!(read_part(&text.bytes, "xl/sharedStrings.xml").contains("<t>page 1_x000C_page 2</t>"));
    assert_eq!(read_sheets(&text.bytes)[0].1.len(), 2);
}

struct CannedProcessor(ProcessedDocument);

impl DocumentProcessor for CannedProcessor {
    fn process(&self, _resource_name: &str, _document: &RawDocument) -> anyhow::Result<ProcessedDocument> {
        Ok(self.0.clone())
    }
}

#[test]
fn uploaded_form_to_workbook() {
    let processor = CannedProcessor(ProcessedDocument {
        text: "Name: Alice".to_owned(),
        entities: vec![Entity {
            field_name: Some("Name".to_owned()),
            field_value: Some("Alice".to_owned()),
        }],
        pages: vec![Page {
            tables: vec![DetectedTable {
                header_rows: strings(&[&["H1", "H2"]]),
                body_rows: strings(&[&["a", "b"]]),
            }],
        }],
    });
    let config = ProcessorConfig::new("project", "us", "ocr", "form");
    let extractor = Extractor::new(&processor, config);

    let document = RawDocument::from_file("registration_form.pdf", b"%PDF-1.7".to_vec()).unwrap();
    let result = extractor.extract(&document).unwrap();
    let export = normalize(&result, ExportFormat::Text).unwrap();

    assert_eq!(export.file_name, "form_data.xlsx");
    let sheets = read_sheets(&export.bytes);
    assert_eq!(sheets[0].1, strings(&[&["Field", "Value"], &["Name", "Alice"]]));
    assert_eq!(sheets[1].1, strings(&[&["H1", "H2"], &["a", "b"]]));
}
