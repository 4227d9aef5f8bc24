//! Board export for a finished plan.
//!
//! A plan becomes one board with a list per week and a card per day, each
//! card carrying a "Readings" checklist with one item per chapter. The
//! board service sits behind [`BoardClient`]; calls are issued in day order.

use crate::render::chapter_labels;
use crate::{Corpus, Error, Plan, Result};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Card names, cycling once per week
pub const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Title of the checklist added to every card
pub const CHECKLIST_TITLE: &str = "Readings";

/// Remote board operations used by the exporter
pub trait BoardClient {
    /// Create an empty board (no default lists) and return its id
    fn add_board(&mut self, name: &str) -> Result<String>;
    fn add_list(&mut self, board_id: &str, name: &str, position: u32) -> Result<String>;
    fn add_card(&mut self, list_id: &str, name: &str) -> Result<String>;
    fn add_checklist(&mut self, card_id: &str, title: &str, items: &[String]) -> Result<()>;
}

/// What an export created
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSummary {
    pub board_id: String,
    pub lists: usize,
    pub cards: usize,
    pub checklist_items: usize,
}

/// Export the plan to a board
pub fn export_plan<C: BoardClient>(
    plan: &Plan,
    corpus: &Corpus,
    client: &mut C,
    board_name: &str,
) -> Result<ExportSummary> {
    if plan.is_empty() {
        return Err(Error::Export("plan has no days to export".into()));
    }

    tracing::info!("Creating board {:?}", board_name);
    let board_id = client.add_board(board_name)?;

    let weeks = plan.len().div_ceil(WEEKDAYS.len());
    let mut summary = ExportSummary {
        board_id: board_id.clone(),
        lists: 0,
        cards: 0,
        checklist_items: 0,
    };
    let mut days = plan.days.iter();

    for week in 1..=weeks {
        let list_name = format!("Week {}", week);
        tracing::info!("Creating list {:?}", list_name);
        let list_id = client.add_list(&board_id, &list_name, week as u32)?;
        summary.lists += 1;

        for weekday in WEEKDAYS {
            let Some(day) = days.next() else {
                break;
            };

            tracing::debug!("Creating card {:?} in {:?}", weekday, list_name);
            let card_id = client.add_card(&list_id, weekday)?;
            let items = chapter_labels(corpus, day)?;
            client.add_checklist(&card_id, CHECKLIST_TITLE, &items)?;

            summary.cards += 1;
            summary.checklist_items += items.len();
        }
    }

    tracing::info!(
        "Exported {} days to board {:?} ({} lists)",
        summary.cards,
        board_name,
        summary.lists
    );
    Ok(summary)
}

// ============================================================================
// File-backed client
// ============================================================================

/// One board operation as recorded by [`JsonlBoardClient`]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BoardEvent {
    BoardCreated {
        id: String,
        name: String,
        at: DateTime<Utc>,
    },
    ListCreated {
        id: String,
        board_id: String,
        name: String,
        position: u32,
        at: DateTime<Utc>,
    },
    CardCreated {
        id: String,
        list_id: String,
        name: String,
        at: DateTime<Utc>,
    },
    ChecklistAdded {
        card_id: String,
        title: String,
        items: Vec<String>,
        at: DateTime<Utc>,
    },
}

/// Board client that appends each operation to a JSONL file
///
/// Every append takes an exclusive lock on the file.
pub struct JsonlBoardClient {
    path: PathBuf,
}

impl JsonlBoardClient {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, event: &BoardEvent) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.lock_exclusive()?;

        let mut writer = std::io::BufWriter::new(&file);
        let line = serde_json::to_string(event)?;
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        drop(writer);

        file.unlock()?;
        Ok(())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

impl BoardClient for JsonlBoardClient {
    fn add_board(&mut self, name: &str) -> Result<String> {
        let id = new_id();
        self.append(&BoardEvent::BoardCreated {
            id: id.clone(),
            name: name.into(),
            at: Utc::now(),
        })?;
        Ok(id)
    }

    fn add_list(&mut self, board_id: &str, name: &str, position: u32) -> Result<String> {
        let id = new_id();
        self.append(&BoardEvent::ListCreated {
            id: id.clone(),
            board_id: board_id.into(),
            name: name.into(),
            position,
            at: Utc::now(),
        })?;
        Ok(id)
    }

    fn add_card(&mut self, list_id: &str, name: &str) -> Result<String> {
        let id = new_id();
        self.append(&BoardEvent::CardCreated {
            id: id.clone(),
            list_id: list_id.into(),
            name: name.into(),
            at: Utc::now(),
        })?;
        Ok(id)
    }

    fn add_checklist(&mut self, card_id: &str, title: &str, items: &[String]) -> Result<()> {
        self.append(&BoardEvent::ChecklistAdded {
            card_id: card_id.into(),
            title: title.into(),
            items: items.to_vec(),
            at: Utc::now(),
        })
    }
}

/// Read back every event from a board file
pub fn read_board_events(path: &Path) -> Result<Vec<BoardEvent>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut events = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<BoardEvent>(&line) {
            Ok(event) => events.push(event),
            Err(e) => {
                tracing::warn!("Failed to parse board event at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} board events", events.len());
    Ok(events)
}
