//! Cleanup pass: remove directories left empty, deepest first.
//!
//! Per directory: already absent -> nothing to do; non-empty -> left alone; empty ->
//! removed, or counted as skipped when removal fails. The root itself is never removed.

use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, error, info};

use crate::errors::SkipKind;
use crate::fs_ops::describe_io_error;
use crate::walk;

/// Counters for one cleanup pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanupCounters {
    pub removed_folders: usize,
    pub skipped_folders: usize,
}

impl CleanupCounters {
    /// Fold one directory decision into the counters.
    pub fn record(&mut self, outcome: &DirOutcome) {
        match outcome {
            DirOutcome::Removed => self.removed_folders += 1,
            other if other.skip_kind().is_some() => self.skipped_folders += 1,
            _ => {}
        }
    }
}

/// What the pass decided for one directory.
#[derive(Debug)]
pub enum DirOutcome {
    AlreadyAbsent,
    NonEmpty,
    Removed,
    RemoveFailed(io::Error),
}

impl DirOutcome {
    /// Only an attempted-and-failed removal counts as a skip; non-empty is not one.
    pub fn skip_kind(&self) -> Option<SkipKind> {
        match self {
            DirOutcome::RemoveFailed(_) => Some(SkipKind::DirectoryRemoveFailure),
            DirOutcome::AlreadyAbsent | DirOutcome::NonEmpty | DirOutcome::Removed => None,
        }
    }
}

/// Judge and, if empty, remove a single directory.
pub fn prune_dir(dir: &Path) -> DirOutcome {
    let mut entries = match fs::read_dir(dir) {
        Ok(rd) => rd,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %dir.display(), "Directory already removed");
            return DirOutcome::AlreadyAbsent;
        }
        Err(e) => {
            error!(
                path = %dir.display(),
                kind = %SkipKind::DirectoryRemoveFailure,
                error = %describe_io_error("read directory", dir, &e),
                "Failed to inspect directory"
            );
            return DirOutcome::RemoveFailed(e);
        }
    };

    if entries.next().is_some() {
        debug!(path = %dir.display(), "Directory not empty; keeping");
        return DirOutcome::NonEmpty;
    }
    drop(entries);

    match fs::remove_dir(dir) {
        Ok(()) => {
            info!(path = %dir.display(), "Removed empty directory");
            DirOutcome::Removed
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            info!(path = %dir.display(), "Directory already removed");
            DirOutcome::AlreadyAbsent
        }
        Err(e) => {
            error!(
                path = %dir.display(),
                kind = %SkipKind::DirectoryRemoveFailure,
                error = %describe_io_error("remove directory", dir, &e),
                "Failed to remove directory"
            );
            DirOutcome::RemoveFailed(e)
        }
    }
}

/// Remove every empty directory below `root`, bottom-up.
pub fn cleanup(root: &Path) -> CleanupCounters {
    let mut counters = CleanupCounters::default();
    for dir in walk::dirs_bottom_up(root) {
        counters.record(&prune_dir(&dir));
    }
    info!(
        removed = counters.removed_folders,
        skipped = counters.skipped_folders,
        "Finished cleanup"
    );
    counters
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn removes_nested_empty_chain() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a/b/c").create_dir_all().unwrap();

        let c = cleanup(temp.path());
        assert_eq!(c, CleanupCounters { removed_folders: 3, skipped_folders: 0 });
        assert!(!temp.path().join("a").exists());
        assert!(temp.path().exists(), "root is never removed");
    }

    #[test]
    fn keeps_directories_with_content() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("keep/file.txt").touch().unwrap();
        temp.child("keep/empty").create_dir_all().unwrap();

        let c = cleanup(temp.path());
        assert_eq!(c, CleanupCounters { removed_folders: 1, skipped_folders: 0 });
        assert!(temp.path().join("keep/file.txt").exists());
        assert!(!temp.path().join("keep/empty").exists());
    }

    #[test]
    fn absent_directory_is_not_an_error() {
        let temp = assert_fs::TempDir::new().unwrap();
        let out = prune_dir(&temp.path().join("never"));
        assert!(matches!(out, DirOutcome::AlreadyAbsent));
    }

    #[test]
    fn unreadable_entry_is_a_counted_failure() {
        // A regular file where a directory was listed: read_dir fails with something
        // other than NotFound, regardless of privileges.
        let temp = assert_fs::TempDir::new().unwrap();
        let f = temp.child("was_a_dir");
        f.touch().unwrap();

        let out = prune_dir(f.path());
        assert!(matches!(out, DirOutcome::RemoveFailed(_)), "got {out:?}");
        assert_eq!(out.skip_kind(), Some(SkipKind::DirectoryRemoveFailure));

        let mut c = CleanupCounters::default();
        c.record(&out);
        c.record(&DirOutcome::NonEmpty);
        c.record(&DirOutcome::AlreadyAbsent);
        c.record(&DirOutcome::Removed);
        assert_eq!(c, CleanupCounters { removed_folders: 1, skipped_folders: 1 });
        assert!(f.path().exists());
    }

    #[cfg(unix)]
    #[test]
    #[ignore = "permission bits are bypassed for root; run as a regular user with --ignored"]
    fn failed_removal_is_counted() {
        use std::os::unix::fs::PermissionsExt;

        let temp = assert_fs::TempDir::new().unwrap();
        let locked = temp.child("locked");
        locked.child("inner").create_dir_all().unwrap();
        fs::set_permissions(locked.path(), fs::Permissions::from_mode(0o555)).unwrap();

        let c = cleanup(temp.path());
        fs::set_permissions(locked.path(), fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(c.skipped_folders, 1);
        assert!(locked.path().join("inner").exists());
        assert!(locked.path().exists());
    }
}
