//! Plan builder: drives the day allocator across every configured day.
//!
//! Each day's target is recomputed from the words still unread divided by
//! the days still left (floor division), so rounding and boundary choices
//! made early are absorbed by later days.

use crate::allocator::allocate_day;
use crate::{Corpus, Error, Plan, Result};

/// Build a reading plan of at most `days` days
///
/// Returns a shorter plan when the corpus runs out before the last day.
pub fn build_plan(corpus: &Corpus, days: u32) -> Result<Plan> {
    if days == 0 {
        return Err(Error::InvalidConfiguration(
            "day count must be positive".into(),
        ));
    }

    let day_count = days as usize;
    let last_day_index = day_count - 1;
    let mut remaining = corpus.total_words();
    let mut cursor = corpus.first_position();
    let mut plan = Plan {
        requested_days: days,
        // every day reads at least one chapter
        days: Vec::with_capacity(day_count.min(corpus.chapter_total())),
    };

    tracing::info!(
        "Building {}-day plan over {} words",
        days,
        remaining
    );

    for day in 0..day_count {
        let target = remaining / (day_count - day) as u64;
        let allocation = allocate_day(corpus, cursor, target, day, last_day_index)?;

        remaining = remaining.saturating_sub(allocation.assignment.words);
        plan.days.push(allocation.assignment);
        cursor = allocation.next;

        if allocation.exhausted {
            if day < last_day_index {
                tracing::info!(
                    "Corpus exhausted after {} of {} days",
                    day + 1,
                    days
                );
            }
            break;
        }
    }

    Ok(plan)
}
