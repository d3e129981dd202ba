//! Configuration management for WorkShift
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    CONFIG_GENERATED, DEFAULT_ATTACHMENT_MAX_BYTES, DEFAULT_BOARD_BACKGROUND, DEFAULT_DUE_SOON_DAYS, DEFAULT_LISTS,
    LABEL_NAME_MAX_LEN, LIST_TITLE_MAX_LEN,
};
use crate::utils::{color, datetime};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub storage: StorageConfig,
    pub boards: BoardsConfig,
    pub attachments: AttachmentsConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Keep data between runs in a snapshot file.
    /// When false the snapshot only lives for the current session.
    pub persist: bool,
    /// Snapshot file location (defaults to the user data directory)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

/// Defaults applied to new boards
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardsConfig {
    /// Days after today a due date counts as "due soon"
    pub due_soon_days: i64,
    /// Background color for new boards
    pub default_background: String,
    /// Lists created on every new board, in order
    pub default_lists: Vec<String>,
    /// Labels created on every new board
    pub default_labels: Vec<LabelPreset>,
}

/// A label created on every new board
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LabelPreset {
    #[serde(default)]
    pub name: String,
    /// Palette name or hex color
    pub color: String,
}

/// Attachment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AttachmentsConfig {
    /// Maximum decoded attachment size in bytes
    pub max_size_bytes: u64,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Date format for due dates
    pub date_format: String,
    /// Show due dates relative to today ("tomorrow", "in 5 days")
    pub relative_dates: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to file
    pub enabled: bool,
    /// Minimum level: error, warn, info, debug or trace
    pub level: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            persist: true,
            snapshot_path: None,
        }
    }
}

impl Default for BoardsConfig {
    fn default() -> Self {
        Self {
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            default_background: DEFAULT_BOARD_BACKGROUND.to_string(),
            default_lists: DEFAULT_LISTS.iter().map(|s| (*s).to_string()).collect(),
            default_labels: ["green", "yellow", "orange", "red", "purple", "blue"]
                .iter()
                .map(|c| LabelPreset {
                    name: String::new(),
                    color: (*c).to_string(),
                })
                .collect(),
        }
    }
}

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            max_size_bytes: DEFAULT_ATTACHMENT_MAX_BYTES,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: datetime::DUE_DATE_FORMAT.to_string(),
            relative_dates: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Parsed log level filter
    pub fn level_filter(&self) -> Result<log::LevelFilter> {
        self.level
            .parse::<log::LevelFilter>()
            .map_err(|_| anyhow::anyhow!("Invalid logging level '{}'", self.level))
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from("workshift.toml");
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Some(config_dir) = dirs::config_dir() {
            let xdg_config = config_dir.join("workshift").join("config.toml");
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.validate_boards()?;

        if self.attachments.max_size_bytes == 0 {
            anyhow::bail!("attachments.max_size_bytes must be greater than zero");
        }

        if let Err(e) = chrono::NaiveDate::parse_from_str("2025-01-01", &self.display.date_format) {
            anyhow::bail!("Invalid date_format '{}': {}", self.display.date_format, e);
        }

        self.logging.level_filter()?;

        Ok(())
    }

    /// Validate board defaults
    fn validate_boards(&self) -> Result<()> {
        for title in &self.boards.default_lists {
            let trimmed = title.trim();
            if trimmed.is_empty() || trimmed.chars().count() > LIST_TITLE_MAX_LEN {
                anyhow::bail!("default_lists entries must be 1 to {} characters", LIST_TITLE_MAX_LEN);
            }
        }

        for preset in &self.boards.default_labels {
            if preset.name.chars().count() > LABEL_NAME_MAX_LEN {
                anyhow::bail!("Label preset '{}' exceeds {} characters", preset.name, LABEL_NAME_MAX_LEN);
            }
            if color::resolve_label_color(&preset.color).is_none() {
                anyhow::bail!("Label preset '{}' has invalid color '{}'", preset.name, preset.color);
            }
        }

        if color::normalize_hex(&self.boards.default_background).is_none() {
            anyhow::bail!("Invalid default_background '{}'", self.boards.default_background);
        }

        if !(0..=365).contains(&self.boards.due_soon_days) {
            anyhow::bail!("due_soon_days must be between 0 and 365, got {}", self.boards.due_soon_days);
        }

        Ok(())
    }

    /// Snapshot file path, configured or default
    pub fn snapshot_path(&self) -> Result<PathBuf> {
        match &self.storage.snapshot_path {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::get_data_dir()?.join("snapshot.json")),
        }
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# WorkShift Configuration File\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::DUE_DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join("workshift"))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }

    /// Get the data directory used for snapshots and logs
    pub fn get_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("workshift"))
    }
}
