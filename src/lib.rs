//! Core library for `ext_sort`.
//!
//! Sorts every file under a directory into `<ext>_files` buckets, then optionally
//! prunes directories the sort left empty. Both passes are fail-soft: per-item
//! failures are logged and counted, never fatal.

pub mod classify;
pub mod cleanup;
pub mod cli;
pub mod config;
pub mod errors;
pub mod fs_ops;
pub mod output;
pub mod platform;
pub mod sort;
pub mod walk;

pub use classify::{bucket_name, classify};
pub use cleanup::{cleanup, CleanupCounters, DirOutcome};
pub use config::{default_config_path, default_log_path, path_has_symlink_ancestor, Config, LogLevel};
pub use errors::{SkipKind, SortError};
pub use fs_ops::{place, Outcome};
pub use sort::{sort, RunCounters};
