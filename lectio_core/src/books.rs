//! Canonical book order.
//!
//! The counts file is a JSON object whose key order carries no meaning, so
//! books are ordered by this list unless the config overrides it.

/// The 66-book Protestant canon, Genesis through Revelation
pub const CANONICAL_BOOKS: [&str; 66] = [
    // Old Testament
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    // New Testament
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Owned copy of the canonical order, for config defaults
pub fn default_book_order() -> Vec<String> {
    CANONICAL_BOOKS.iter().map(|b| b.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_canon_bounds() {
        assert_eq!(CANONICAL_BOOKS[0], "Genesis");
        assert_eq!(CANONICAL_BOOKS[38], "Malachi");
        assert_eq!(CANONICAL_BOOKS[39], "Matthew");
        assert_eq!(CANONICAL_BOOKS[65], "Revelation");
    }

    #[test]
    fn test_canon_has_no_duplicates() {
        let unique: HashSet<_> = CANONICAL_BOOKS.iter().collect();
        assert_eq!(unique.len(), CANONICAL_BOOKS.len());
    }
}
