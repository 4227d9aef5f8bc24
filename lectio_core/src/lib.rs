#![forbid(unsafe_code)]

//! Core domain model and planning logic for Lectio.
//!
//! This crate provides:
//! - The typed corpus table (books, chapters, word counts)
//! - Chapter navigation
//! - The greedy day allocator and plan builder
//! - Plan rendering (table, CSV, JSON)
//! - Corpus ingestion and board export

pub mod types;
pub mod error;
pub mod books;
pub mod config;
pub mod logging;
pub mod corpus;
pub mod cursor;
pub mod allocator;
pub mod builder;
pub mod render;
pub mod ingest;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::{parse_day_count, Config};
pub use corpus::{Book, Corpus};
pub use allocator::{allocate_day, DayAllocation};
pub use builder::build_plan;
pub use render::{format_reading, greatest_delta, render_table, OutputFormat};
pub use export::{export_plan, BoardClient, ExportSummary, JsonlBoardClient};
