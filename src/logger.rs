//! Logging setup.
//!
//! Records go through the `log` facade. [`Logger`] keeps an in-memory buffer of
//! formatted lines for display and, when file logging is enabled, a `fern`
//! dispatcher also appends them to the log file.

use anyhow::{Context, Result};
use chrono::Local;
use log::LevelFilter;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::config::{Config, LoggingConfig};

/// Maximum number of lines kept in memory
const MAX_BUFFERED_LOGS: usize = 1000;

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    level: LevelFilter,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// In-memory logger at info level, no file output
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            level: LevelFilter::Info,
            log_file: None,
        }
    }

    /// Build a logger from the logging section of the configuration
    pub fn from_config(config: &LoggingConfig) -> Result<Self> {
        let mut logger = Self::new();
        logger.level = config.level_filter()?;
        if config.enabled {
            logger.log_file = Some(Self::get_log_file_path()?);
        }
        Ok(logger)
    }

    /// Write log lines to `path` instead of the default log file
    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    /// Whether file output is enabled
    pub fn is_enabled(&self) -> bool {
        self.log_file.is_some()
    }

    pub fn level(&self) -> LevelFilter {
        self.level
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Add a log entry
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        Self::push(&self.logs, format!("[{}] {}", timestamp, message));
    }

    fn push(logs: &Mutex<Vec<String>>, line: String) {
        if let Ok(mut logs) = logs.lock() {
            if logs.len() >= MAX_BUFFERED_LOGS {
                logs.remove(0);
            }
            logs.push(line);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    /// Install this logger as the global `log` backend.
    ///
    /// Fails if a global logger is already installed.
    pub fn install(&self) -> Result<()> {
        let buffer = Arc::clone(&self.logs);

        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{}] {:<5} {}: {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(self.level)
            .level_for("sqlx", LevelFilter::Warn)
            .level_for("sea_orm", LevelFilter::Warn)
            .chain(fern::Output::call(move |record| {
                Self::push(&buffer, record.args().to_string());
            }));

        if let Some(path) = &self.log_file {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(file);
        }

        dispatch.apply().context("A global logger is already installed")?;
        Ok(())
    }

    /// Default log file location
    pub fn get_log_file_path() -> Result<PathBuf> {
        Ok(Config::get_data_dir()?.join("workshift.log"))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
