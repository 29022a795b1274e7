//! Configuration for the JEE tracker.

use crate::models::ExamDates;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const APP_NAME: &str = "jee-tracker";

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Display settings.
    #[serde(default)]
    pub display: DisplayConfig,
    /// Exam countdown settings.
    #[serde(default)]
    pub exam: ExamConfig,
    /// Log file settings.
    #[serde(default)]
    pub logging: LoggingConfig,
    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Load configuration from default path.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| toml::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save configuration to default path.
    pub fn save(&self) -> anyhow::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let content = toml::to_string_pretty(self)?;
            std::fs::write(path, content)?;
        }
        Ok(())
    }

    /// Get configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", APP_NAME).map(|d| d.config_dir().join("config.toml"))
    }

    /// Get data directory.
    pub fn data_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", APP_NAME).map(|d| d.data_dir().to_path_buf())
    }

    /// Directory for log files: configured, else `<data_dir>/logs`.
    pub fn log_dir(&self) -> Option<PathBuf> {
        self.logging
            .directory
            .clone()
            .or_else(|| Self::data_dir().map(|d| d.join("logs")))
    }

    /// Directory for exported snapshots: configured, else `<data_dir>/exports`.
    pub fn export_dir(&self) -> Option<PathBuf> {
        self.export
            .path
            .clone()
            .or_else(|| Self::data_dir().map(|d| d.join("exports")))
    }
}

/// Display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// First day of week in the calendar grid.
    #[serde(default)]
    pub week_start: WeekStart,
    /// Date format string.
    #[serde(default = "default_date_format")]
    pub date_format: String,
    /// Seconds between motivational quotes.
    #[serde(default = "default_quote_rotation_secs")]
    pub quote_rotation_secs: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            week_start: WeekStart::Monday,
            date_format: default_date_format(),
            quote_rotation_secs: default_quote_rotation_secs(),
        }
    }
}

fn default_date_format() -> String {
    "%b %d, %Y".to_string()
}

fn default_quote_rotation_secs() -> u64 {
    15
}

/// First day of week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeekStart {
    #[default]
    Monday,
    Sunday,
}

impl WeekStart {
    pub fn weekday(&self) -> Weekday {
        match self {
            Self::Monday => Weekday::Mon,
            Self::Sunday => Weekday::Sun,
        }
    }
}

/// Which exam the dashboard counts down to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum CountdownTarget {
    #[default]
    MainsSession1,
    MainsSession2,
    Advanced,
}

impl CountdownTarget {
    pub fn label(&self) -> &'static str {
        match self {
            Self::MainsSession1 => "JEE Mains (Session 1)",
            Self::MainsSession2 => "JEE Mains (Session 2)",
            Self::Advanced => "JEE Advanced",
        }
    }

    pub fn date(&self, dates: &ExamDates) -> NaiveDate {
        match self {
            Self::MainsSession1 => dates.mains_session1,
            Self::MainsSession2 => dates.mains_session2,
            Self::Advanced => dates.advanced,
        }
    }
}

/// Exam settings. Dates left unset use the built-in schedule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExamConfig {
    #[serde(default)]
    pub countdown: CountdownTarget,
    #[serde(default)]
    pub mains_session1: Option<NaiveDate>,
    #[serde(default)]
    pub mains_session2: Option<NaiveDate>,
    #[serde(default)]
    pub advanced: Option<NaiveDate>,
}

impl ExamConfig {
    /// Apply configured overrides on top of `base`.
    pub fn resolve(&self, base: ExamDates) -> ExamDates {
        ExamDates {
            mains_session1: self.mains_session1.unwrap_or(base.mains_session1),
            mains_session2: self.mains_session2.unwrap_or(base.mains_session2),
            advanced: self.advanced.unwrap_or(base.advanced),
        }
    }
}

/// Log file settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Disable file logging entirely.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
            enabled: true,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

/// Export settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Export directory.
    #[serde(default)]
    pub path: Option<PathBuf>,
}
