//! Core domain types for reading plans.
//!
//! This module defines the values derived from a corpus:
//! - Positions (book index, chapter number)
//! - Readings and per-day assignments
//! - The finished plan

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Position
// ============================================================================

/// A (book index, chapter number) coordinate into the corpus
///
/// Book indices are zero-based; chapter numbers are one-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub book: usize,
    pub chapter: u32,
}

impl Position {
    pub fn new(book: usize, chapter: u32) -> Self {
        Self { book, chapter }
    }

    /// The first chapter of the first book
    pub fn start() -> Self {
        Self::new(0, 1)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.book, self.chapter)
    }
}

// ============================================================================
// Readings and Days
// ============================================================================

/// A chapter assigned to a specific day
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reading {
    pub day: usize,
    pub position: Position,
}

/// One day of the plan: contiguous readings plus their word total
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAssignment {
    pub readings: Vec<Reading>,
    pub words: u64,
}

impl DayAssignment {
    /// Positions of this day's readings, in order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.readings.iter().map(|r| r.position)
    }

    pub fn first(&self) -> Option<Position> {
        self.readings.first().map(|r| r.position)
    }

    pub fn last(&self) -> Option<Position> {
        self.readings.last().map(|r| r.position)
    }
}

// ============================================================================
// Plan
// ============================================================================

/// The finished reading plan
///
/// `days.len()` never exceeds `requested_days`; it is shorter only when the
/// corpus ran out first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub requested_days: u32,
    pub days: Vec<DayAssignment>,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Total words across every day
    pub fn total_words(&self) -> u64 {
        self.days.iter().map(|d| d.words).sum()
    }

    /// Whether the plan fills every requested day
    pub fn is_complete(&self) -> bool {
        self.days.len() == self.requested_days as usize
    }

    /// Per-day word totals, in day order
    pub fn daily_words(&self) -> Vec<u64> {
        self.days.iter().map(|d| d.words).collect()
    }

    /// All positions of the plan, in reading order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.days.iter().flat_map(|d| d.positions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(index: usize, positions: &[(usize, u32)], words: u64) -> DayAssignment {
        DayAssignment {
            readings: positions
                .iter()
                .map(|&(b, c)| Reading {
                    day: index,
                    position: Position::new(b, c),
                })
                .collect(),
            words,
        }
    }

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(0, 50) < Position::new(1, 1));
        assert!(Position::new(2, 3) < Position::new(2, 4));
        assert_eq!(Position::start(), Position::new(0, 1));
    }

    #[test]
    fn test_plan_accessors() {
        let plan = Plan {
            requested_days: 3,
            days: vec![day(0, &[(0, 1), (0, 2)], 120), day(1, &[(1, 1)], 90)],
        };

        assert_eq!(plan.len(), 2);
        assert!(!plan.is_complete());
        assert_eq!(plan.total_words(), 210);
        assert_eq!(plan.daily_words(), vec![120, 90]);
        assert_eq!(plan.days[0].last(), Some(Position::new(0, 2)));

        let all: Vec<_> = plan.positions().collect();
        assert_eq!(
            all,
            vec![Position::new(0, 1), Position::new(0, 2), Position::new(1, 1)]
        );
    }
}
