//! Configuration types for gbm-forecast

use crate::model::{DEFAULT_MAX_CELLS, DEFAULT_TIME_STEPS, DEFAULT_TRIALS};
use crate::telemetry::LogFormat;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub provider: ProviderConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Where historical prices come from
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Yahoo,
    File,
}

/// End of the history window: a fixed date or the current day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndDate {
    Today,
    Fixed(NaiveDate),
}

impl EndDate {
    pub fn resolve(&self) -> NaiveDate {
        match self {
            EndDate::Today => Local::now().date_naive(),
            EndDate::Fixed(date) => *date,
        }
    }
}

impl std::str::FromStr for EndDate {
    type Err = chrono::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("today") {
            Ok(EndDate::Today)
        } else {
            s.parse().map(EndDate::Fixed)
        }
    }
}

impl std::fmt::Display for EndDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EndDate::Today => write!(f, "today"),
            EndDate::Fixed(date) => write!(f, "{}", date),
        }
    }
}

impl<'de> Deserialize<'de> for EndDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Historical data provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    #[serde(default)]
    pub kind: ProviderKind,

    /// Chart API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// HTTP request timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Use dividend/split adjusted closes when available
    #[serde(default = "default_true")]
    pub use_adjusted_close: bool,

    /// First day of history
    #[serde(default = "default_start_date")]
    pub start_date: NaiveDate,

    /// Last day of history, or "today"
    #[serde(default = "default_end_date")]
    pub end_date: EndDate,

    /// Price file for the "file" provider
    #[serde(default)]
    pub file_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    crate::history::YAHOO_CHART_URL.to_string()
}
fn default_timeout_secs() -> u64 {
    10
}
fn default_user_agent() -> String {
    concat!("gbm-forecast/", env!("CARGO_PKG_VERSION")).to_string()
}
fn default_true() -> bool {
    true
}
fn default_start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default()
}
fn default_end_date() -> EndDate {
    EndDate::Fixed(NaiveDate::from_ymd_opt(2026, 3, 31).unwrap_or_default())
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::Yahoo,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
            use_adjusted_close: true,
            start_date: default_start_date(),
            end_date: default_end_date(),
            file_path: None,
        }
    }
}

/// Monte Carlo configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Rows in the price matrix, including the initial row
    #[serde(default = "default_time_steps")]
    pub time_steps: usize,

    /// Number of simulated paths
    #[serde(default = "default_trials")]
    pub trials: usize,

    /// Upper bound on time_steps * trials
    #[serde(default = "default_max_cells")]
    pub max_cells: usize,
}

fn default_time_steps() -> usize {
    DEFAULT_TIME_STEPS
}
fn default_trials() -> usize {
    DEFAULT_TRIALS
}
fn default_max_cells() -> usize {
    DEFAULT_MAX_CELLS
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            time_steps: DEFAULT_TIME_STEPS,
            trials: DEFAULT_TRIALS,
            max_cells: default_max_cells(),
        }
    }
}

/// Result output format
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {}", other)),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Write an SVG path chart here when set
    #[serde(default)]
    pub chart_path: Option<PathBuf>,
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
