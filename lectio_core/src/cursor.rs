//! Chapter navigation over the corpus.
//!
//! Moving past either end of the corpus is an `OutOfRange` error rather
//! than a silent wrap, so callers check `is_last_chapter` before advancing.

use crate::{Corpus, Error, Position, Result};

impl Corpus {
    /// Word count of the chapter at `pos`
    pub fn word_count(&self, pos: Position) -> Result<u32> {
        self.book(pos.book)
            .and_then(|b| b.words(pos.chapter))
            .ok_or(Error::OutOfRange {
                book: pos.book,
                chapter: pos.chapter,
            })
    }

    /// The chapter following `pos`, rolling over into the next book
    pub fn next_chapter(&self, pos: Position) -> Result<Position> {
        let chapters = self.checked_chapter_count(pos)?;

        let next = if pos.chapter == chapters {
            Position::new(pos.book + 1, 1)
        } else {
            Position::new(pos.book, pos.chapter + 1)
        };

        if !self.contains(next) {
            return Err(Error::OutOfRange {
                book: next.book,
                chapter: next.chapter,
            });
        }
        Ok(next)
    }

    /// The chapter preceding `pos`, rolling back into the previous book
    pub fn previous_chapter(&self, pos: Position) -> Result<Position> {
        self.checked_chapter_count(pos)?;

        if pos.chapter > 1 {
            return Ok(Position::new(pos.book, pos.chapter - 1));
        }

        let book = pos.book.checked_sub(1).ok_or(Error::OutOfRange {
            book: pos.book,
            chapter: 0,
        })?;
        let chapters = self.chapter_count(book).ok_or(Error::OutOfRange {
            book,
            chapter: 0,
        })?;
        Ok(Position::new(book, chapters))
    }

    /// True iff `pos` is the final chapter of the final book
    pub fn is_last_chapter(&self, pos: Position) -> bool {
        pos == self.last_position()
    }

    fn checked_chapter_count(&self, pos: Position) -> Result<u32> {
        if !self.contains(pos) {
            return Err(Error::OutOfRange {
                book: pos.book,
                chapter: pos.chapter,
            });
        }
        self.chapter_count(pos.book).ok_or(Error::OutOfRange {
            book: pos.book,
            chapter: pos.chapter,
        })
    }
}
