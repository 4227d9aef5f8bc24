//! Day allocator: decides which contiguous chapters make up one day.
//!
//! Allocation runs as a small state machine:
//!
//! 1. **Accumulating**: take whole chapters while they fit under the target.
//!    The final configured day takes everything that is left. Reaching the
//!    last chapter of the corpus takes it immediately and finishes.
//! 2. **BoundaryDecision**: the next chapter would meet or pass the target.
//!    Include it if the overshoot is no larger than the undershoot (ties
//!    include), otherwise leave it for the next day. A day that has not
//!    taken anything yet always takes the boundary chapter.
//! 3. **Done**: report the readings and where the next day starts.

use crate::{Corpus, DayAssignment, Position, Reading, Result};

/// Result of allocating a single day
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DayAllocation {
    pub assignment: DayAssignment,
    /// Where the next day starts. When `exhausted` is set this is the last
    /// chapter of the corpus, already read.
    pub next: Position,
    /// The corpus ran out during this day
    pub exhausted: bool,
}

#[derive(Clone, Copy, Debug)]
enum State {
    Accumulating { cursor: Position },
    BoundaryDecision { cursor: Position, chapter_len: u64 },
    Done { next: Position, exhausted: bool },
}

/// Accumulator for the day being built
struct DayBuilder {
    day: usize,
    readings: Vec<Reading>,
    words: u64,
}

impl DayBuilder {
    fn take(&mut self, position: Position, chapter_len: u64) {
        tracing::trace!(day = self.day, %position, chapter_len, "taking chapter");
        self.readings.push(Reading {
            day: self.day,
            position,
        });
        self.words += chapter_len;
    }
}

/// Allocate one day starting at `start`
///
/// # Arguments
/// * `target` - word budget for this day
/// * `day_index` - zero-based index of the day being allocated
/// * `last_day_index` - index of the final configured day, which absorbs
///   every remaining chapter regardless of the target
pub fn allocate_day(
    corpus: &Corpus,
    start: Position,
    target: u64,
    day_index: usize,
    last_day_index: usize,
) -> Result<DayAllocation> {
    let final_day = day_index == last_day_index;
    let mut day = DayBuilder {
        day: day_index,
        readings: Vec::new(),
        words: 0,
    };
    let mut state = State::Accumulating { cursor: start };

    let (next, exhausted) = loop {
        state = match state {
            State::Accumulating { cursor } => {
                let chapter_len = u64::from(corpus.word_count(cursor)?);

                if day.words + chapter_len < target || final_day {
                    day.take(cursor, chapter_len);

                    if corpus.is_last_chapter(cursor) {
                        State::Done {
                            next: cursor,
                            exhausted: true,
                        }
                    } else {
                        let next = corpus.next_chapter(cursor)?;
                        if corpus.is_last_chapter(next) {
                            day.take(next, u64::from(corpus.word_count(next)?));
                            State::Done {
                                next,
                                exhausted: true,
                            }
                        } else {
                            State::Accumulating { cursor: next }
                        }
                    }
                } else {
                    State::BoundaryDecision {
                        cursor,
                        chapter_len,
                    }
                }
            }

            State::BoundaryDecision {
                cursor,
                chapter_len,
            } => {
                let overshoot = (day.words + chapter_len).saturating_sub(target);
                let undershoot = target.saturating_sub(day.words);
                let include = day.readings.is_empty() || overshoot <= undershoot;

                tracing::trace!(
                    day = day_index,
                    %cursor,
                    overshoot,
                    undershoot,
                    include,
                    "boundary decision"
                );

                if !include {
                    State::Done {
                        next: cursor,
                        exhausted: false,
                    }
                } else {
                    day.take(cursor, chapter_len);
                    if corpus.is_last_chapter(cursor) {
                        State::Done {
                            next: cursor,
                            exhausted: true,
                        }
                    } else {
                        State::Done {
                            next: corpus.next_chapter(cursor)?,
                            exhausted: false,
                        }
                    }
                }
            }

            State::Done { next, exhausted } => break (next, exhausted),
        };
    };

    tracing::debug!(
        day = day_index,
        target,
        words = day.words,
        chapters = day.readings.len(),
        exhausted,
        "allocated day"
    );

    Ok(DayAllocation {
        assignment: DayAssignment {
            readings: day.readings,
            words: day.words,
        },
        next,
        exhausted,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Book, Error};

    fn single_book(chapters: Vec<u32>) -> Corpus {
        Corpus::new(vec![Book::new("Genesis", chapters).unwrap()]).unwrap()
    }

    fn chapters(alloc: &DayAllocation) -> Vec<(usize, u32)> {
        alloc
            .assignment
            .positions()
            .map(|p| (p.book, p.chapter))
            .collect()
    }

    #[test]
    fn test_tie_includes_boundary_chapter() {
        let corpus = single_book(vec![40, 40, 40, 500]);

        let alloc = allocate_day(&corpus, Position::start(), 100, 0, 9).unwrap();

        assert_eq!(chapters(&alloc), vec![(0, 1), (0, 2), (0, 3)]);
        assert_eq!(alloc.assignment.words, 120);
        assert_eq!(alloc.next, Position::new(0, 4));
        assert!(!alloc.exhausted);
    }

    #[test]
    fn test_larger_overshoot_leaves_boundary_for_next_day() {
        let corpus = single_book(vec![40, 40, 70, 500]);

        let alloc = allocate_day(&corpus, Position::start(), 100, 0, 9).unwrap();

        assert_eq!(chapters(&alloc), vec![(0, 1), (0, 2)]);
        assert_eq!(alloc.assignment.words, 80);
        assert_eq!(alloc.next, Position::new(0, 3));
    }

    #[test]
    fn test_smaller_overshoot_includes_boundary() {
        let corpus = single_book(vec![60, 50, 500, 500]);

        let alloc = allocate_day(&corpus, Position::start(), 100, 0, 9).unwrap();

        assert_eq!(alloc.assignment.words, 110);
        assert_eq!(alloc.next, Position::new(0, 3));
    }

    #[test]
    fn test_final_day_absorbs_remaining_chapters() {
        let corpus = single_book(vec![300, 500, 10, 10]);

        let alloc = allocate_day(&corpus, Position::new(0, 2), 500, 2, 2).unwrap();

        assert_eq!(chapters(&alloc), vec![(0, 2), (0, 3), (0, 4)]);
        assert_eq!(alloc.assignment.words, 520);
        assert!(alloc.exhausted);
        assert_eq!(alloc.next, Position::new(0, 4));
    }

    #[test]
    fn test_oversized_chapter_is_read_alone() {
        let corpus = single_book(vec![1000, 10, 10, 10]);

        let alloc = allocate_day(&corpus, Position::start(), 100, 0, 3).unwrap();

        assert_eq!(chapters(&alloc), vec![(0, 1)]);
        assert_eq!(alloc.assignment.words, 1000);
        assert_eq!(alloc.next, Position::new(0, 2));
        assert!(!alloc.exhausted);
    }

    #[test]
    fn test_reaching_last_chapter_takes_it_immediately() {
        let corpus = single_book(vec![10, 10, 900]);

        let alloc = allocate_day(&corpus, Position::start(), 100, 0, 4).unwrap();

        assert_eq!(chapters(&alloc), vec![(0, 1), (0, 2), (0, 3)]);
        assert_eq!(alloc.assignment.words, 920);
        assert!(alloc.exhausted);
    }

    #[test]
    fn test_start_on_last_chapter() {
        let corpus = single_book(vec![10, 20]);

        let small = allocate_day(&corpus, Position::new(0, 2), 100, 1, 4).unwrap();
        assert_eq!(small.assignment.words, 20);
        assert!(small.exhausted);

        let large = allocate_day(&corpus, Position::new(0, 2), 5, 1, 4).unwrap();
        assert_eq!(large.assignment.words, 20);
        assert!(large.exhausted);
        assert_eq!(large.next, Position::new(0, 2));
    }

    #[test]
    fn test_readings_cross_book_boundary() {
        let corpus = Corpus::new(vec![
            Book::new("Ruth", vec![30, 30]).unwrap(),
            Book::new("Esther", vec![30, 30, 500]).unwrap(),
        ])
        .unwrap();

        let alloc = allocate_day(&corpus, Position::start(), 100, 0, 5).unwrap();

        assert_eq!(chapters(&alloc), vec![(0, 1), (0, 2), (1, 1)]);
        assert_eq!(alloc.assignment.words, 90);
        assert_eq!(alloc.next, Position::new(1, 2));
    }

    #[test]
    fn test_readings_are_tagged_with_day() {
        let corpus = single_book(vec![40, 40, 40, 500]);

        let alloc = allocate_day(&corpus, Position::start(), 100, 6, 9).unwrap();

        assert!(alloc.assignment.readings.iter().all(|r| r.day == 6));
    }

    #[test]
    fn test_invalid_start_is_out_of_range() {
        crate::logging::init_test();
        let corpus = single_book(vec![40, 40]);

        let result = allocate_day(&corpus, Position::new(0, 3), 100, 0, 1);

        assert!(matches!(
            result,
            Err(Error::OutOfRange { book: 0, chapter: 3 })
        ));
    }
}
