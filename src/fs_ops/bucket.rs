//! Bucket directories: `<destination_root>/<ext>_files`.
//! Existence is checked before a single-level create; the check-then-create is not
//! atomic, and losing that race is reported to the caller as a failure for that file.

use std::ffi::OsStr;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::classify::bucket_name;

/// Result of making sure a bucket is available.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BucketStatus {
    Existing(PathBuf),
    Created(PathBuf),
}

impl BucketStatus {
    pub fn path(&self) -> &Path {
        match self {
            BucketStatus::Existing(p) | BucketStatus::Created(p) => p,
        }
    }
}

/// Path of the bucket for `extension` under `destination_root`.
pub fn bucket_path(destination_root: &Path, extension: &OsStr) -> PathBuf {
    destination_root.join(bucket_name(extension))
}

/// Ensure the bucket for `extension` exists as a directory.
///
/// Only the final level is created; a missing destination root is an error here.
/// A same-named non-directory entry yields `AlreadyExists`.
pub fn ensure_bucket(destination_root: &Path, extension: &OsStr) -> io::Result<BucketStatus> {
    let bucket = bucket_path(destination_root, extension);
    match fs::metadata(&bucket) {
        Ok(meta) if meta.is_dir() => return Ok(BucketStatus::Existing(bucket)),
        Ok(_) => {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} exists and is not a directory", bucket.display()),
            ));
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    fs::create_dir(&bucket)?;
    info!(
        bucket = %bucket.display(),
        extension = %extension.to_string_lossy(),
        "Created bucket directory"
    );
    Ok(BucketStatus::Created(bucket))
}
