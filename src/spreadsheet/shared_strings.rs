use std::collections::HashMap;

/// Workbook-wide string table; cells refer to entries by index.
/// Entries keep first-seen order so the same workbook always serializes identically.
#[derive(Debug, Default)]
pub(crate) struct SharedStrings {
    strings: Vec<String>,
    indexes: HashMap<String, usize>,
    /// Number of cell references, including repeats
    count: usize,
}

impl SharedStrings {
    /// Returns the index of `value`, adding it on first use.
    pub(crate) fn intern(&mut self, value: &str) -> usize {
        self.count += 1;
        if let Some(index) = self.indexes.get(value) {
            return *index;
        }
        let index = self.strings.len();
        self.strings.push(value.to_owned());
        self.indexes.insert(value.to_owned(), index);
        index
    }

    pub(crate) fn count(&self) -> usize {
        self.count
    }

    pub(crate) fn unique_count(&self) -> usize {
        self.strings.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &str> {
        self.strings.iter().map(String::as_str)
    }
}
