//! Corpus ingestion: verse text to per-chapter word counts.
//!
//! Input is a JSON object `book -> chapter -> verse -> text`; output is the
//! `book -> chapter -> words` table consumed by [`Corpus::load`].
//!
//! [`Corpus::load`]: crate::Corpus::load

use crate::corpus::WordCounts;
use crate::{Error, Result};
use fs2::FileExt;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Verse text keyed by book, chapter and verse number
pub type VerseText = BTreeMap<String, BTreeMap<String, BTreeMap<String, String>>>;

/// Read the verse text JSON file
pub fn load_verses(path: &Path) -> Result<VerseText> {
    let contents = std::fs::read_to_string(path)?;
    let verses: VerseText = serde_json::from_str(&contents)?;
    tracing::info!("Loaded {} books of verse text from {:?}", verses.len(), path);
    Ok(verses)
}

/// Count whitespace-separated words in every chapter
pub fn count_words(verses: &VerseText) -> WordCounts {
    verses
        .iter()
        .map(|(book, chapters)| {
            let counts = chapters
                .iter()
                .map(|(chapter, verses)| {
                    let words = verses
                        .values()
                        .map(|text| text.split_whitespace().count() as u32)
                        .sum();
                    (chapter.clone(), words)
                })
                .collect();
            (book.clone(), counts)
        })
        .collect()
}

/// Write the counts table as pretty JSON, atomically
///
/// The table is written to a temp file in the target directory, synced, and
/// renamed over `path`.
pub fn write_counts(path: &Path, counts: &WordCounts) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let temp = NamedTempFile::new_in(parent)?;
    temp.as_file().lock_exclusive()?;

    {
        let mut writer = std::io::BufWriter::new(temp.as_file());
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut writer, formatter);
        counts.serialize(&mut ser)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
    }

    temp.as_file().sync_all()?;
    temp.as_file().unlock()?;
    temp.persist(path).map_err(|e| Error::Io(e.error))?;

    tracing::info!("Wrote word counts for {} books to {:?}", counts.len(), path);
    Ok(())
}

/// Load verse text, count it, and write the counts table
///
/// Returns the total number of words counted.
pub fn ingest(input: &Path, output: &Path) -> Result<u64> {
    let verses = load_verses(input)?;
    let counts = count_words(&verses);
    write_counts(output, &counts)?;

    Ok(counts
        .values()
        .flat_map(|chapters| chapters.values())
        .map(|&w| u64::from(w))
        .sum())
}
