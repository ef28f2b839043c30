//! Tree walker.
//! Lazy recursive listings built on walkdir. Each directory's entries are read and
//! sorted when the directory is entered, so entries created later in an already-listed
//! directory are not yielded by the same walk.
//!
//! Entries that vanish or cannot be read mid-walk are dropped (debug-logged), never fatal.

use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

fn ok_entry(res: walkdir::Result<DirEntry>) -> Option<DirEntry> {
    match res {
        Ok(e) => Some(e),
        Err(e) => {
            debug!(
                path = %e.path().map(|p| p.display().to_string()).unwrap_or_default(),
                error = %e,
                "walk entry unavailable; skipping"
            );
            None
        }
    }
}

/// Symlinks are not followed; a link counts as a file unless it points at a directory.
fn is_file_like(e: &DirEntry) -> bool {
    let ft = e.file_type();
    ft.is_file() || (ft.is_symlink() && !e.path().is_dir())
}

/// Every non-directory path under `root`, top-down.
///
/// `skip` names a subtree (spelled under `root`) that is never entered.
pub fn files(root: &Path, skip: Option<PathBuf>) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| skip.as_deref() != Some(e.path()))
        .filter_map(ok_entry)
        .filter(is_file_like)
        .map(DirEntry::into_path)
}

/// Every directory strictly below `root`, children before parents.
pub fn dirs_bottom_up(root: &Path) -> impl Iterator<Item = PathBuf> {
    WalkDir::new(root)
        .min_depth(1)
        .contents_first(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(ok_entry)
        .filter(|e| e.file_type().is_dir())
        .map(DirEntry::into_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn files_skips_directories() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.txt").touch().unwrap();
        temp.child("sub/b.txt").touch().unwrap();
        temp.child("empty").create_dir_all().unwrap();

        let got: Vec<PathBuf> = files(temp.path(), None).collect();
        assert_eq!(
            got,
            vec![temp.path().join("a.txt"), temp.path().join("sub").join("b.txt")]
        );
    }

    #[test]
    fn skipped_subtree_is_pruned() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("a.txt").touch().unwrap();
        temp.child("out/txt_files/b.txt").touch().unwrap();
        temp.child("outer/c.txt").touch().unwrap();

        let got: Vec<PathBuf> = files(temp.path(), Some(temp.path().join("out"))).collect();
        assert_eq!(
            got,
            vec![temp.path().join("a.txt"), temp.path().join("outer").join("c.txt")]
        );
    }

    #[test]
    fn dirs_bottom_up_yields_children_first() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("x/y/z").create_dir_all().unwrap();

        let got: Vec<PathBuf> = dirs_bottom_up(temp.path()).collect();
        let x = temp.path().join("x");
        assert_eq!(got, vec![x.join("y").join("z"), x.join("y"), x]);
    }

    #[test]
    fn missing_root_yields_nothing() {
        let temp = assert_fs::TempDir::new().unwrap();
        let gone = temp.path().join("gone");
        assert_eq!(files(&gone, None).count(), 0);
        assert_eq!(dirs_bottom_up(&gone).count(), 0);
    }

    #[test]
    fn restartable() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("one.md").touch().unwrap();
        assert_eq!(files(temp.path(), None).count(), 1);
        temp.child("two.md").touch().unwrap();
        assert_eq!(files(temp.path(), None).count(), 2);
    }
}
