//! CLI definition and parsing.
//! Defines Args and provides parse() for command-line handling.
//!
//! Notes:
//! - `-d` is the destination (not debug); use `--debug` for debug logging.
//! - CLI flags override values from the XML config file.

use clap::{Parser, ValueHint};
use std::path::PathBuf;

use crate::config::types::{Config, LogLevel};

/// Sort files into `<ext>_files` folders.
#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Sort a directory tree into per-extension folders"
)]
pub struct Args {
    /// Directory to sort.
    #[arg(value_name = "PATH", value_hint = ValueHint::DirPath, required_unless_present = "print_config")]
    pub path: Option<PathBuf>,

    /// Destination root for bucket folders (defaults to PATH).
    #[arg(short = 'd', long, value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub destination: Option<PathBuf>,

    /// Remove directories left empty after sorting.
    #[arg(long)]
    pub cleanup: bool,

    /// Enable debug logging (equivalent to `--log-level debug`).
    #[arg(long)]
    pub debug: bool,

    /// Set log level. One of: quiet, normal, info, debug.
    #[arg(long, help = "Set log level: quiet, normal, info, debug")]
    pub log_level: Option<String>,

    /// Write logs to this file in addition to stderr.
    #[arg(long, value_name = "FILE", value_hint = ValueHint::FilePath)]
    pub log_file: Option<PathBuf>,

    /// Emit logs in structured JSON.
    #[arg(long)]
    pub json: bool,

    /// Exit with status 2 if any file or folder was skipped.
    #[arg(long)]
    pub fail_on_skips: bool,

    /// Print the config file location used by ext_sort and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Args {
    /// Effective log level derived from flags.
    /// Precedence: --debug > --log-level value > None (use config default).
    pub fn effective_log_level(&self) -> Option<LogLevel> {
        if self.debug {
            return Some(LogLevel::Debug);
        }
        self.log_level.as_deref().and_then(LogLevel::parse)
    }

    /// Apply CLI overrides to a loaded Config (in-place). No-ops for unset flags.
    pub fn apply_overrides(&self, cfg: &mut Config) {
        if let Some(p) = &self.path {
            cfg.source = p.clone();
        }
        if let Some(d) = &self.destination {
            cfg.destination = Some(d.clone());
        }
        if self.cleanup {
            cfg.cleanup = true;
        }
        if let Some(level) = self.effective_log_level() {
            cfg.log_level = level;
        }
        if let Some(f) = &self.log_file {
            cfg.log_file = Some(f.clone());
        }
        if self.fail_on_skips {
            cfg.fail_on_skips = true;
        }
    }
}

pub fn parse() -> Args {
    Args::parse()
}
