//! Error types for the lectio_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for lectio_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A (book, chapter) position that does not exist in the corpus
    #[error("Position out of range: book {book}, chapter {chapter}")]
    OutOfRange { book: usize, chapter: u32 },

    /// Rejected configuration value (day count, book order, ...)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Malformed corpus table
    #[error("Corpus error: {0}")]
    Corpus(String),

    /// Board export failure
    #[error("Export error: {0}")]
    Export(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
