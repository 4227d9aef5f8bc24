//! Configuration file support for Lectio.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/lectio/config.toml`.

use crate::books::default_book_order;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub plan: PlanConfig,

    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub export: ExportConfig,
}

/// Plan generation parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_days")]
    pub days: u32,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            days: default_days(),
        }
    }
}

/// Where the word-count table lives and how its books are ordered
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default = "default_counts_path")]
    pub counts_path: PathBuf,

    #[serde(default = "default_book_order")]
    pub book_order: Vec<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            counts_path: default_counts_path(),
            book_order: default_book_order(),
        }
    }
}

/// Board export settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ExportConfig {
    #[serde(default = "default_board_name")]
    pub board_name: String,

    #[serde(default = "default_board_path")]
    pub board_path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            board_name: default_board_name(),
            board_path: default_board_path(),
        }
    }
}

// Default value functions
fn default_days() -> u32 {
    90
}

fn data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("lectio")
}

fn default_counts_path() -> PathBuf {
    data_dir().join("esv-counts.json")
}

fn default_board_name() -> String {
    "Bible reading plan".into()
}

fn default_board_path() -> PathBuf {
    data_dir().join("board.jsonl")
}

/// Parse a day count given on the command line
///
/// Only positive integers are accepted.
pub fn parse_day_count(raw: &str) -> Result<u32> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        Error::InvalidConfiguration(format!("day count must be an integer, got {:?}", raw))
    })?;

    if value <= 0 {
        return Err(Error::InvalidConfiguration(format!(
            "day count must be positive, got {}",
            value
        )));
    }

    u32::try_from(value)
        .map_err(|_| Error::InvalidConfiguration(format!("day count too large: {}", value)))
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("lectio").join("config.toml")
    }

    /// Reject values the planner cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.plan.days == 0 {
            return Err(Error::InvalidConfiguration(
                "plan.days must be positive".into(),
            ));
        }
        if self.corpus.book_order.is_empty() {
            return Err(Error::InvalidConfiguration(
                "corpus.book_order must list at least one book".into(),
            ));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            Error::InvalidConfiguration(format!("Failed to serialize config: {}", e))
        })?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.plan.days, 90);
        assert_eq!(config.corpus.book_order.len(), 66);
        assert_eq!(config.export.board_name, "Bible reading plan");
        assert!(config.corpus.counts_path.ends_with("lectio/esv-counts.json"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.plan.days = 365;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.plan.days, 365);
        assert_eq!(loaded.corpus.book_order, config.corpus.book_order);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[corpus]
book_order = ["Ruth", "Jonah"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.corpus.book_order, vec!["Ruth", "Jonah"]);
        assert_eq!(config.plan.days, 90); // default
    }

    #[test]
    fn test_zero_days_rejected() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[plan]\ndays = 0\n").unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(result, Err(Error::InvalidConfiguration(_))));
    }

    #[test]
    fn test_empty_book_order_rejected() {
        let mut config = Config::default();
        config.corpus.book_order.clear();
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_parse_day_count() {
        assert_eq!(parse_day_count("90").unwrap(), 90);
        assert_eq!(parse_day_count(" 7 ").unwrap(), 7);

        for bad in ["0", "-3", "ninety", "1.5", ""] {
            assert!(
                matches!(parse_day_count(bad), Err(Error::InvalidConfiguration(_))),
                "expected {:?} to be rejected",
                bad
            );
        }
    }
}
