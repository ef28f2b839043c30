//! Typed error definitions for ext_sort.
//! `SortError` covers the fatal startup failures; `SkipKind` names the per-item
//! failures that are counted and logged but never abort a pass.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SortError {
    #[error("Source path not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Source path is not a directory: {0}")]
    SourceNotDirectory(PathBuf),

    #[error("Cannot read source directory {path}: {context}")]
    SourceUnreadable { path: PathBuf, context: String },

    #[error("Destination exists but is not a directory: {0}")]
    DestinationNotDirectory(PathBuf),

    #[error("Failed to create destination directory {path}: {context}")]
    DestinationCreateFailed { path: PathBuf, context: String },
}

impl SortError {
    /// Stable numeric code for structured logs.
    pub fn code(&self) -> u16 {
        match self {
            SortError::SourceNotFound(_) => 10,
            SortError::SourceNotDirectory(_) => 11,
            SortError::SourceUnreadable { .. } => 12,
            SortError::DestinationNotDirectory(_) => 20,
            SortError::DestinationCreateFailed { .. } => 21,
        }
    }
}

/// Why a single file or directory was skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipKind {
    NoExtension,
    BucketCreateFailure,
    MoveCollision,
    MoveFailure,
    DirectoryRemoveFailure,
}

impl SkipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipKind::NoExtension => "no_extension",
            SkipKind::BucketCreateFailure => "bucket_create_failed",
            SkipKind::MoveCollision => "move_collision",
            SkipKind::MoveFailure => "move_failed",
            SkipKind::DirectoryRemoveFailure => "directory_remove_failed",
        }
    }
}

impl fmt::Display for SkipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
