//! Excel-style cell references

/// Converts a 0-based column index to its column letters (`0` -> `A`, `26` -> `AA`)
pub(crate) fn column_name(col: usize) -> String {
    let mut column = col + 1;
    let mut name = String::new();
    while column > 0 {
        column -= 1;
        name.insert(0, (b'A' + (column % 26) as u8) as char);
        column /= 26;
    }
    name
}

/// Converts 0-based row & column indexes to an Excel-style cell reference
pub(crate) fn index_to_reference(row: usize, col: usize) -> String {
    format!("{}{}", column_name(col), row + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_names() {
        assert_eq!(column_name(0), "A");
        assert_eq!(column_name(1), "B");
        assert_eq!(column_name(25), "Z");
        assert_eq!(column_name(26), "AA");
        assert_eq!(column_name(51), "AZ");
        assert_eq!(column_name(52), "BA");
        assert_eq!(column_name(701), "ZZ");
        assert_eq!(column_name(702), "AAA");
        assert_eq!(column_name(16383), "XFD");
    }

    #[test]
    fn references() {
        assert_eq!(index_to_reference(0, 0), "A1");
        assert_eq!(index_to_reference(1, 1), "B2");
        assert_eq!(index_to_reference(99, 27), "AB100");
    }
}
