//! Core configuration types.
//! - Config holds one run's settings with sensible defaults.
//! - LogLevel represents verbosity with simple parsing helpers.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::paths;

/// Program-defined verbosity levels exposed to users/config.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogLevel {
    /// Only errors
    Quiet,
    /// Informational output (default)
    #[default]
    Normal,
    /// More info (like verbose)
    Info,
    /// Debug/trace
    Debug,
}

impl LogLevel {
    /// Parse common string names into our LogLevel (case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiet" | "error" | "none" => Some(LogLevel::Quiet),
            "normal" => Some(LogLevel::Normal),
            "info" | "verbose" | "detailed" => Some(LogLevel::Info),
            "debug" | "trace" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Quiet => "quiet",
            LogLevel::Normal => "normal",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        };
        f.write_str(s)
    }
}

impl FromStr for LogLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("invalid log level: '{s}'"))
    }
}

/// Settings for one sort (and optional cleanup) run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory tree to sort
    pub source: PathBuf,
    /// Where bucket directories go; None means "same as source"
    pub destination: Option<PathBuf>,
    /// Remove directories left empty after sorting
    pub cleanup: bool,
    /// Console verbosity
    pub log_level: LogLevel,
    /// Optional path to a log file
    pub log_file: Option<PathBuf>,
    /// Exit non-zero when any file or folder was skipped
    pub fail_on_skips: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::from("."),
            destination: None,
            cleanup: false,
            log_level: LogLevel::Normal,
            log_file: paths::default_log_path(),
            fail_on_skips: false,
        }
    }
}

impl Config {
    /// Construct a Config for `source`; other fields use defaults.
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Default::default()
        }
    }

    /// Destination root actually used: the explicit one, else the source.
    pub fn effective_destination(&self) -> &Path {
        self.destination.as_deref().unwrap_or(&self.source)
    }
}
