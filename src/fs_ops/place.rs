//! Move executor: classify one file, make sure its bucket exists, move it there.
//!
//! Every failure is terminal for that file and leaves it where it was. `place` never
//! touches counters; callers aggregate the returned `Outcome`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

use crate::classify::classify;
use crate::errors::SkipKind;

use super::atomic::rename_no_replace;
use super::bucket::ensure_bucket;
use super::helpers::describe_io_error;

/// What happened to a single file.
#[derive(Debug)]
pub enum Outcome {
    /// File now lives at this path (also returned, unchanged, when it was already bucketed).
    Moved(PathBuf),
    SkippedNoExtension,
    SkippedBucketCreateFailed(io::Error),
    SkippedMoveCollision(io::Error),
    SkippedMoveFailed(io::Error),
}

impl Outcome {
    #[inline]
    pub fn is_moved(&self) -> bool {
        matches!(self, Outcome::Moved(_))
    }

    /// Skip classification for non-moved outcomes.
    pub fn skip_kind(&self) -> Option<SkipKind> {
        match self {
            Outcome::Moved(_) => None,
            Outcome::SkippedNoExtension => Some(SkipKind::NoExtension),
            Outcome::SkippedBucketCreateFailed(_) => Some(SkipKind::BucketCreateFailure),
            Outcome::SkippedMoveCollision(_) => Some(SkipKind::MoveCollision),
            Outcome::SkippedMoveFailed(_) => Some(SkipKind::MoveFailure),
        }
    }
}

/// Move `file` into `<destination_root>/<ext>_files/`, keeping its base name.
pub fn place(file: &Path, destination_root: &Path) -> Outcome {
    let Some(extension) = classify(file) else {
        warn!(
            path = %file.display(),
            kind = %SkipKind::NoExtension,
            "No extension found; skipping"
        );
        return Outcome::SkippedNoExtension;
    };
    info!(
        path = %file.display(),
        extension = %extension.to_string_lossy(),
        "Extension detected"
    );

    let bucket = match ensure_bucket(destination_root, &extension) {
        Ok(status) => status.path().to_path_buf(),
        Err(e) => {
            let bucket = super::bucket::bucket_path(destination_root, &extension);
            error!(
                path = %file.display(),
                kind = %SkipKind::BucketCreateFailure,
                error = %describe_io_error("create bucket", &bucket, &e),
                "Failed to create bucket directory; skipping"
            );
            return Outcome::SkippedBucketCreateFailed(e);
        }
    };

    // file_name is Some here: classify() already found a final segment.
    let Some(name) = file.file_name() else {
        return Outcome::SkippedNoExtension;
    };
    let dest = bucket.join(name);

    if already_in_bucket(file, &bucket) {
        info!(path = %file.display(), "File already in bucket");
        return Outcome::Moved(file.to_path_buf());
    }

    match rename_no_replace(file, &dest) {
        Ok(()) => {
            info!(src = %file.display(), dest = %dest.display(), "Moved file");
            Outcome::Moved(dest)
        }
        Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
            error!(
                path = %file.display(),
                dest = %dest.display(),
                kind = %SkipKind::MoveCollision,
                error = %e,
                "Destination already holds a file with this name; skipping"
            );
            Outcome::SkippedMoveCollision(e)
        }
        Err(e) => {
            error!(
                path = %file.display(),
                dest = %dest.display(),
                kind = %SkipKind::MoveFailure,
                error = %describe_io_error("move", file, &e),
                "Failed to move file; skipping"
            );
            Outcome::SkippedMoveFailed(e)
        }
    }
}

/// True when `file`'s parent directory is `bucket` (compared after resolving symlinks).
fn already_in_bucket(file: &Path, bucket: &Path) -> bool {
    let Some(parent) = file.parent() else {
        return false;
    };
    match (fs::canonicalize(parent), fs::canonicalize(bucket)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
