use crate::spreadsheet::reference::index_to_reference;

/// A named worksheet holding string cells, with an optional styled header row.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sheet {
    /// Sheet name as shown on the tab
    pub(crate) name: String,
    /// Column labels written as the first row
    pub(crate) header: Option<Vec<String>>,
    /// Data rows, kept as given (rows may differ in length)
    pub(crate) rows: Vec<Vec<String>>,
}

impl Sheet {
    /// Creates an empty sheet.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_owned(),
            header: None,
            rows: Vec::new(),
        }
    }

    /// Sets the header row.
    pub fn with_header<I, S>(mut self, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = Some(header.into_iter().map(Into::into).collect());
        self
    }

    /// Appends a data row.
    pub fn push_row<I, S>(&mut self, row: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(row.into_iter().map(Into::into).collect());
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn header(&self) -> Option<&[String]> {
        self.header.as_deref()
    }

    /// Data rows, excluding the header.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Returns true if the sheet has neither header nor data rows.
    pub fn is_empty(&self) -> bool {
        self.header.is_none() && self.rows.is_empty()
    }

    /// Iterates over every written row (header first) as `(is_header, cells)`.
    pub(crate) fn written_rows(&self) -> impl Iterator<Item = (bool, &[String])> + '_ {
        self.header
            .iter()
            .map(|header| (true, header.as_slice()))
            .chain(self.rows.iter().map(|row| (false, row.as_slice())))
    }

    /// Used range of the sheet, e.g. `A1:B3`; `A1` when nothing is written.
    pub(crate) fn dimension(&self) -> String {
        let row_count = self.written_rows().count();
        let col_count = self.written_rows().map(|(_, cells)| cells.len()).max().unwrap_or(0);
        if row_count == 0 || col_count == 0 {
            "A1".to_owned()
        } else if row_count == 1 && col_count == 1 {
            index_to_reference(0, 0)
        } else {
            format!("A1:{}", index_to_reference(row_count - 1, col_count - 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_initial() {
        let sheet = Sheet::new("Extracted Text");

        assert_eq!(sheet.name(), "Extracted Text");
        assert!(sheet.is_empty());
        assert_eq!(sheet.header(), None);
        assert_eq!(sheet.dimension(), "A1");
    }

    #[test]
    fn sheet_with_header() {
        let mut sheet = Sheet::new("Extracted Text").with_header(["Field", "Value"]);
        sheet.push_row(["Name", "Alice"]);
        sheet.push_row(["Age", "30"]);

        assert_eq!(sheet.rows().len(), 2);
        let written: Vec<_> = sheet.written_rows().map(|(is_header, cells)| (is_header, cells.len())).collect();
        assert_eq!(written, vec![(true, 2), (false, 2), (false, 2)]);
        assert_eq!(sheet.dimension(), "A1:B3");
    }

    #[test]
    fn sheet_ragged_rows() {
        let mut sheet = Sheet::new("Table_1");
        sheet.push_row(["a"]);
        sheet.push_row(["b", "c", "d"]);
        sheet.push_row(Vec::<String>::new());

        assert_eq!(sheet.rows()[1], vec!["b", "c", "d"]);
        assert_eq!(sheet.dimension(), "A1:C3");
    }

    #[test]
    fn sheet_single_cell() {
        let mut sheet = Sheet::new("Table_1");
        sheet.push_row(["only"]);

        assert_eq!(sheet.dimension(), "A1");
    }
}
