//! Sort pass: walk the source tree and place every file into its extension bucket.
//! Fail-soft: a file that cannot be moved is counted and logged, and the pass continues.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::errors::SortError;
use crate::fs_ops::{place, Outcome};
use crate::walk;

/// Counters for one sort pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunCounters {
    pub total_files_seen: usize,
    pub skipped_files: usize,
}

impl RunCounters {
    /// Fold one outcome into the counters.
    pub fn record(&mut self, outcome: &Outcome) {
        self.total_files_seen += 1;
        if !outcome.is_moved() {
            self.skipped_files += 1;
        }
    }

    #[inline]
    pub fn moved(&self) -> usize {
        self.total_files_seen - self.skipped_files
    }
}

/// Source root must be an existing, readable directory.
pub fn ensure_source_root(source: &Path) -> Result<(), SortError> {
    let meta = fs::metadata(source).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SortError::SourceNotFound(source.to_path_buf()),
        _ => SortError::SourceUnreadable {
            path: source.to_path_buf(),
            context: e.to_string(),
        },
    })?;
    if !meta.is_dir() {
        return Err(SortError::SourceNotDirectory(source.to_path_buf()));
    }
    fs::read_dir(source).map_err(|e| SortError::SourceUnreadable {
        path: source.to_path_buf(),
        context: e.to_string(),
    })?;
    Ok(())
}

/// Sort every file under `source` into buckets under `destination` (defaults to `source`).
///
/// Only an unusable source root is fatal; per-file failures are reflected in the counters.
pub fn sort(source: &Path, destination: Option<&Path>) -> Result<RunCounters, SortError> {
    ensure_source_root(source)?;
    let destination = destination.unwrap_or(source);
    info!(
        source = %source.display(),
        destination = %destination.display(),
        "Processing files"
    );

    let skip = nested_destination(source, destination);
    if let Some(dir) = &skip {
        debug!(path = %dir.display(), "Destination is inside the source; not walking it");
    }

    let mut counters = RunCounters::default();
    for file in walk::files(source, skip) {
        let outcome = place(&file, destination);
        debug!(path = %file.display(), ?outcome, "placed");
        counters.record(&outcome);
    }

    info!(
        total = counters.total_files_seen,
        moved = counters.moved(),
        skipped = counters.skipped_files,
        "Finished processing files"
    );
    Ok(counters)
}

/// `destination` spelled under `source` when it lies strictly inside it, so the walk can
/// leave the files it is filling alone. When both are the same directory nothing is
/// excluded; buckets there are revisited and resolve as already placed.
fn nested_destination(source: &Path, destination: &Path) -> Option<PathBuf> {
    let src = fs::canonicalize(source).ok()?;
    let dst = fs::canonicalize(destination).ok()?;
    let rel = dst.strip_prefix(&src).ok()?;
    if rel.as_os_str().is_empty() {
        return None;
    }
    Some(source.join(rel))
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn counters_reconcile() {
        let mut c = RunCounters::default();
        c.record(&Outcome::Moved("a".into()));
        c.record(&Outcome::SkippedNoExtension);
        c.record(&Outcome::SkippedMoveFailed(io::Error::from(io::ErrorKind::NotFound)));
        assert_eq!(c.total_files_seen, 3);
        assert_eq!(c.skipped_files, 2);
        assert_eq!(c.moved(), 1);
    }

    #[test]
    fn destination_defaults_to_source() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.TXT").touch().unwrap();
        temp.child("b.txt").touch().unwrap();
        temp.child("c").touch().unwrap();
        temp.child("sub/d.txt").touch().unwrap();

        let counters = sort(temp.path(), None).unwrap();
        assert_eq!(counters, RunCounters { total_files_seen: 4, skipped_files: 1 });

        let bucket = temp.child("txt_files");
        assert!(bucket.child("a.TXT").path().exists());
        assert!(bucket.child("b.txt").path().exists());
        assert!(bucket.child("d.txt").path().exists());
        assert!(temp.child("c").path().exists());
    }

    #[test]
    fn nested_destination_is_not_walked() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.txt").touch().unwrap();
        temp.child("b.txt").touch().unwrap();
        let dest = temp.child("zz");
        dest.create_dir_all().unwrap();

        let counters = sort(temp.path(), Some(dest.path())).unwrap();
        assert_eq!(counters, RunCounters { total_files_seen: 2, skipped_files: 0 });
        assert!(dest.child("txt_files/a.txt").path().exists());
        assert!(dest.child("txt_files/b.txt").path().exists());

        let again = sort(temp.path(), Some(dest.path())).unwrap();
        assert_eq!(again, RunCounters::default());
    }

    #[test]
    fn same_destination_excludes_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        assert_eq!(nested_destination(temp.path(), temp.path()), None);
        let outside = assert_fs::TempDir::new().unwrap();
        assert_eq!(nested_destination(temp.path(), outside.path()), None);
    }

    #[test]
    fn missing_source_is_fatal() {
        let temp = assert_fs::TempDir::new().unwrap();
        let err = sort(&temp.path().join("nope"), None).unwrap_err();
        assert!(matches!(err, SortError::SourceNotFound(_)));
    }

    #[test]
    fn file_as_source_is_fatal() {
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("file.txt");
        f.touch().unwrap();
        let err = sort(f.path(), None).unwrap_err();
        assert!(matches!(err, SortError::SourceNotDirectory(_)));
    }
}
