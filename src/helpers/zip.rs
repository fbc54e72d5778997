//! ZIP archive helper utilities for writing Excel (.xlsx) packages
//! Provides deterministic part creation within ZIP archives

use crate::error::OcrSheetError;
use crate::error::ResultMessage;
use crate::helpers::xml::XmlWriter;
use std::io::Seek;
use std::io::Write;
use zip::write::SimpleFileOptions;
use zip::CompressionMethod;
use zip::DateTime;
use zip::ZipWriter;

/// Helper trait for ZIP archive operations with specialized writer creation
pub(crate) trait ZipHelper: Write {
    /// Starts a new part, normalizing path separators and pinning its timestamp
    fn start_part(&mut self, name: &str) -> Result<(), OcrSheetError>;

    /// Starts a new part and writes it as an XML document produced by `content`
    fn write_xml_part<F>(&mut self, name: &str, content: F) -> Result<(), OcrSheetError>
    where
        F: FnOnce(&mut XmlWriter<&mut Self>) -> Result<(), OcrSheetError>;
}

/// Options shared by every part: deflated and stamped with the DOS epoch
fn part_options() -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .last_modified_time(DateTime::default())
}

impl<WS: Write + Seek> ZipHelper for ZipWriter<WS> {
    fn start_part(&mut self, name: &str) -> Result<(), OcrSheetError> {
        let path = name.replace('\\', "/");
        self.start_file(path.trim_start_matches('/'), part_options())?;
        Ok(())
    }

    fn write_xml_part<F>(&mut self, name: &str, content: F) -> Result<(), OcrSheetError>
    where
        F: FnOnce(&mut XmlWriter<&mut Self>) -> Result<(), OcrSheetError>,
    {
        self.start_part(name).with_prefix(name)?;
        let mut writer = XmlWriter::new(self);
        writer.declaration().with_prefix(name)?;
        content(&mut writer).with_prefix(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::io::Read;
    use zip::ZipArchive;

    #[test]
    fn writes_xml_part() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.write_xml_part("\\xl\\workbook.xml", |writer| writer.empty("workbook", &[])).unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name("xl/workbook.xml").unwrap();
        let mut xml = String::new();
        file.read_to_string(&mut xml).unwrap();
        assert!(xml.ends_with("<workbook/>"));
    }

    #[test]
    fn part_timestamps_are_fixed() {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        zip.start_part("a.xml").unwrap();
        let bytes = zip.finish().unwrap().into_inner();

        let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let file = archive.by_index(0).unwrap();
        let modified = file.last_modified().unwrap();
        assert_eq!((modified.year(), modified.month(), modified.day()), (1980, 1, 1));
    }
}
