//! Typed corpus table.
//!
//! The counts file maps `book -> "chapter" -> words`. On load it becomes an
//! ordered list of books, each holding its chapter word counts in a `Vec`
//! indexed by `chapter - 1`, so chapter numbering is contiguous by
//! construction.

use crate::{Error, Position, Result};
use std::collections::{BTreeMap, HashSet};
use std::path::Path;

/// Nested word-count mapping as stored on disk
pub type WordCounts = BTreeMap<String, BTreeMap<String, u32>>;

/// A book and the word count of each of its chapters
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Book {
    pub name: String,
    chapters: Vec<u32>,
}

impl Book {
    /// Create a book from chapter word counts in chapter order
    pub fn new(name: impl Into<String>, chapters: Vec<u32>) -> Result<Self> {
        let name = name.into();
        if chapters.is_empty() {
            return Err(Error::Corpus(format!("book {:?} has no chapters", name)));
        }
        if let Some(idx) = chapters.iter().position(|&w| w == 0) {
            return Err(Error::Corpus(format!(
                "{} {} has no words",
                name,
                idx + 1
            )));
        }
        Ok(Self { name, chapters })
    }

    pub fn chapter_count(&self) -> u32 {
        self.chapters.len() as u32
    }

    /// Word count of a one-based chapter number
    pub fn words(&self, chapter: u32) -> Option<u32> {
        let idx = usize::try_from(chapter).ok()?.checked_sub(1)?;
        self.chapters.get(idx).copied()
    }

    pub fn total_words(&self) -> u64 {
        self.chapters.iter().map(|&w| u64::from(w)).sum()
    }
}

/// The ordered, read-only corpus
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Corpus {
    books: Vec<Book>,
}

impl Corpus {
    pub fn new(books: Vec<Book>) -> Result<Self> {
        if books.is_empty() {
            return Err(Error::Corpus("corpus has no books".into()));
        }
        Ok(Self { books })
    }

    /// Build the corpus from the on-disk mapping, ordering books by `book_order`
    pub fn from_counts(counts: &WordCounts, book_order: &[String]) -> Result<Self> {
        if book_order.is_empty() {
            return Err(Error::Corpus("book order is empty".into()));
        }

        let mut seen = HashSet::new();
        let mut books = Vec::with_capacity(book_order.len());

        for name in book_order {
            if !seen.insert(name.as_str()) {
                return Err(Error::Corpus(format!(
                    "book {:?} listed twice in book order",
                    name
                )));
            }

            let chapters = counts
                .get(name)
                .ok_or_else(|| Error::Corpus(format!("book {:?} missing from counts", name)))?;

            books.push(Book::new(name.clone(), chapter_words(name, chapters)?)?);
        }

        if let Some(extra) = counts.keys().find(|k| !seen.contains(k.as_str())) {
            return Err(Error::Corpus(format!(
                "book {:?} is not in the book order",
                extra
            )));
        }

        tracing::debug!("Built corpus of {} books", books.len());
        Self::new(books)
    }

    /// Load the JSON counts file from disk
    pub fn load(path: &Path, book_order: &[String]) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let counts: WordCounts = serde_json::from_str(&contents)?;
        let corpus = Self::from_counts(&counts, book_order)?;
        tracing::info!(
            "Loaded {} books ({} chapters, {} words) from {:?}",
            corpus.book_count(),
            corpus.chapter_total(),
            corpus.total_words(),
            path
        );
        Ok(corpus)
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    pub fn book_count(&self) -> usize {
        self.books.len()
    }

    pub fn book(&self, book: usize) -> Option<&Book> {
        self.books.get(book)
    }

    pub fn book_name(&self, book: usize) -> Option<&str> {
        self.books.get(book).map(|b| b.name.as_str())
    }

    pub fn chapter_count(&self, book: usize) -> Option<u32> {
        self.books.get(book).map(Book::chapter_count)
    }

    /// Number of chapters across every book
    pub fn chapter_total(&self) -> usize {
        self.books.iter().map(|b| b.chapters.len()).sum()
    }

    pub fn total_words(&self) -> u64 {
        self.books.iter().map(Book::total_words).sum()
    }

    pub fn first_position(&self) -> Position {
        Position::start()
    }

    pub fn last_position(&self) -> Position {
        let book = self.books.len() - 1;
        Position::new(book, self.books[book].chapter_count())
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.book(pos.book)
            .and_then(|b| b.words(pos.chapter))
            .is_some()
    }
}

/// Convert string chapter keys into a contiguous, ordered word list
fn chapter_words(book: &str, chapters: &BTreeMap<String, u32>) -> Result<Vec<u32>> {
    let mut numbered = chapters
        .iter()
        .map(|(key, &words)| {
            key.trim()
                .parse::<u32>()
                .map(|n| (n, words))
                .map_err(|_| Error::Corpus(format!("{} has non-numeric chapter {:?}", book, key)))
        })
        .collect::<Result<Vec<_>>>()?;

    numbered.sort_unstable_by_key(|&(n, _)| n);

    for (idx, &(n, _)) in numbered.iter().enumerate() {
        let expected = idx as u32 + 1;
        if n != expected {
            return Err(Error::Corpus(format!(
                "{} chapters are not contiguous: expected {}, found {}",
                book, expected, n
            )));
        }
    }

    Ok(numbered.into_iter().map(|(_, words)| words).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(entries: &[(&str, &[(&str, u32)])]) -> WordCounts {
        entries
            .iter()
            .map(|(book, chapters)| {
                (
                    book.to_string(),
                    chapters
                        .iter()
                        .map(|(c, w)| (c.to_string(), *w))
                        .collect(),
                )
            })
            .collect()
    }

    fn order(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_from_counts_orders_books_and_chapters() {
        let table = counts(&[
            ("Ruth", &[("1", 10), ("2", 20), ("3", 30), ("4", 40)][..]),
            (
                "Jonah",
                &[
                    ("10", 5),
                    ("1", 1),
                    ("2", 2),
                    ("3", 3),
                    ("4", 4),
                    ("5", 5),
                    ("6", 6),
                    ("7", 7),
                    ("8", 8),
                    ("9", 9),
                ][..],
            ),
        ]);

        let corpus = Corpus::from_counts(&table, &order(&["Jonah", "Ruth"])).unwrap();

        assert_eq!(corpus.book_name(0), Some("Jonah"));
        assert_eq!(corpus.book_name(1), Some("Ruth"));
        assert_eq!(corpus.chapter_count(0), Some(10));
        // "10" sorts before "2" as a string but must land at chapter 10
        assert_eq!(corpus.book(0).unwrap().words(10), Some(5));
        assert_eq!(corpus.book(0).unwrap().words(2), Some(2));
        assert_eq!(corpus.total_words(), 100 + 50);
        assert_eq!(corpus.chapter_total(), 14);
        assert_eq!(corpus.last_position(), Position::new(1, 4));
    }

    #[test]
    fn test_missing_book_rejected() {
        let table = counts(&[("Ruth", &[("1", 10)][..])]);
        let result = Corpus::from_counts(&table, &order(&["Ruth", "Esther"]));
        assert!(matches!(result, Err(Error::Corpus(_))));
    }

    #[test]
    fn test_unlisted_book_rejected() {
        let table = counts(&[("Ruth", &[("1", 10)][..]), ("Esther", &[("1", 10)][..])]);
        let result = Corpus::from_counts(&table, &order(&["Ruth"]));
        assert!(matches!(result, Err(Error::Corpus(_))));
    }

    #[test]
    fn test_chapter_gap_rejected() {
        let table = counts(&[("Ruth", &[("1", 10), ("3", 30)][..])]);
        let err = Corpus::from_counts(&table, &order(&["Ruth"])).unwrap_err();
        assert!(err.to_string().contains("expected 2, found 3"));
    }

    #[test]
    fn test_non_numeric_chapter_rejected() {
        let table = counts(&[("Ruth", &[("1", 10), ("two", 30)][..])]);
        let result = Corpus::from_counts(&table, &order(&["Ruth"]));
        assert!(matches!(result, Err(Error::Corpus(_))));
    }

    #[test]
    fn test_empty_book_and_zero_words_rejected() {
        assert!(Book::new("Ruth", vec![]).is_err());
        assert!(Book::new("Ruth", vec![10, 0, 5]).is_err());
        assert!(Corpus::new(vec![]).is_err());
    }

    #[test]
    fn test_duplicate_order_entry_rejected() {
        let table = counts(&[("Ruth", &[("1", 10)][..])]);
        let result = Corpus::from_counts(&table, &order(&["Ruth", "Ruth"]));
        assert!(matches!(result, Err(Error::Corpus(_))));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("counts.json");
        std::fs::write(
            &path,
            r#"{"Ruth": {"1": 400, "2": 350}, "Jonah": {"1": 300}}"#,
        )
        .unwrap();

        let corpus = Corpus::load(&path, &order(&["Ruth", "Jonah"])).unwrap();
        assert_eq!(corpus.book_count(), 2);
        assert_eq!(corpus.total_words(), 1050);
    }

    #[test]
    fn test_contains() {
        let corpus = Corpus::new(vec![Book::new("Ruth", vec![1, 2]).unwrap()]).unwrap();
        assert!(corpus.contains(Position::new(0, 2)));
        assert!(!corpus.contains(Position::new(0, 0)));
        assert!(!corpus.contains(Position::new(0, 3)));
        assert!(!corpus.contains(Position::new(1, 1)));
    }
}
