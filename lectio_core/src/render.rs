//! Plan rendering.
//!
//! Readings are grouped into per-book chapter ranges ("Genesis 1-3") and
//! laid out as a Markdown table, CSV, or JSON.

use crate::{Corpus, DayAssignment, Error, Plan, Result};
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

/// Supported output formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" | "markdown" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::InvalidConfiguration(format!(
                "unknown output format: {}",
                other
            ))),
        }
    }
}

/// A day with its readings resolved to text
#[derive(Clone, Debug, Serialize)]
struct RenderedDay {
    day: usize,
    reading: String,
    words: u64,
    chapters: Vec<String>,
}

/// Render a day's readings as comma-separated per-book ranges
///
/// A run of one chapter renders as `"Ruth 2"`, a longer run as
/// `"Ruth 1-4"`.
pub fn format_reading(corpus: &Corpus, day: &DayAssignment) -> Result<String> {
    let mut groups: Vec<(usize, u32, u32)> = Vec::new();

    for pos in day.positions() {
        match groups.last_mut() {
            Some((book, _, last)) if *book == pos.book => *last = pos.chapter,
            _ => groups.push((pos.book, pos.chapter, pos.chapter)),
        }
    }

    let parts = groups
        .into_iter()
        .map(|(book, first, last)| -> Result<String> {
            let name = book_name(corpus, book, first)?;
            Ok(if first == last {
                format!("{} {}", name, first)
            } else {
                format!("{} {}-{}", name, first, last)
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(parts.join(", "))
}

/// Checklist-style labels, one per chapter (`"Ruth 1"`, `"Ruth 2"`, ...)
pub fn chapter_labels(corpus: &Corpus, day: &DayAssignment) -> Result<Vec<String>> {
    day.positions()
        .map(|pos| -> Result<String> {
            Ok(format!("{} {}", book_name(corpus, pos.book, pos.chapter)?, pos.chapter))
        })
        .collect()
}

/// Spread between the heaviest and lightest day
///
/// Zero for an empty plan.
pub fn greatest_delta(plan: &Plan) -> u64 {
    let words = plan.days.iter().map(|d| d.words);
    match (words.clone().max(), words.min()) {
        (Some(max), Some(min)) => max - min,
        _ => 0,
    }
}

/// Format an integer with comma thousands separators
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Render the plan as the delta header plus a Markdown table
pub fn render_table(plan: &Plan, corpus: &Corpus) -> Result<String> {
    let rows = rendered_days(plan, corpus)?;
    // never narrower than the "Reading " header cell
    let width = rows
        .iter()
        .map(|r| r.reading.chars().count())
        .max()
        .unwrap_or(0)
        .max(8);

    let mut out = String::new();
    writeln!(out, "Greatest delta: {}", group_thousands(greatest_delta(plan))).ok();
    writeln!(out).ok();
    writeln!(out, "| Day | Reading {} | Words |", " ".repeat(width - 8)).ok();
    writeln!(out, "|-----|{}|-------|", "-".repeat(width + 2)).ok();

    for row in &rows {
        writeln!(
            out,
            "| {:<3} | {:<width$} | {:<5} |",
            row.day,
            row.reading,
            group_thousands(row.words),
            width = width
        )
        .ok();
    }

    Ok(out)
}

/// Render the plan as CSV with a `day,reading,words` header
pub fn render_csv(plan: &Plan, corpus: &Corpus) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["day", "reading", "words"])?;

    for row in rendered_days(plan, corpus)? {
        writer.write_record([
            row.day.to_string(),
            row.reading,
            row.words.to_string(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Other(format!("Failed to flush CSV: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| Error::Other(format!("CSV is not UTF-8: {}", e)))
}

/// Render the plan as pretty JSON with book names resolved
pub fn render_json(plan: &Plan, corpus: &Corpus) -> Result<String> {
    let rows = rendered_days(plan, corpus)?;
    let doc = serde_json::json!({
        "requested_days": plan.requested_days,
        "greatest_delta": greatest_delta(plan),
        "total_words": plan.total_words(),
        "days": rows,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

/// Render the plan in the requested format
pub fn render(plan: &Plan, corpus: &Corpus, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Table => render_table(plan, corpus),
        OutputFormat::Csv => render_csv(plan, corpus),
        OutputFormat::Json => render_json(plan, corpus),
    }
}

fn rendered_days(plan: &Plan, corpus: &Corpus) -> Result<Vec<RenderedDay>> {
    plan.days
        .iter()
        .enumerate()
        .map(|(idx, day)| -> Result<RenderedDay> {
            Ok(RenderedDay {
                day: idx + 1,
                reading: format_reading(corpus, day)?,
                words: day.words,
                chapters: chapter_labels(corpus, day)?,
            })
        })
        .collect()
}

fn book_name(corpus: &Corpus, book: usize, chapter: u32) -> Result<&str> {
    corpus
        .book_name(book)
        .ok_or(Error::OutOfRange { book, chapter })
}
