use std::fs;

use ext_sort::{cleanup, sort, CleanupCounters};
use tempfile::tempdir;

/// Sorting empties two folders; cleanup removes both.
#[test]
fn sort_then_cleanup_removes_emptied_folders() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    fs::create_dir_all(root.join("sub1"))?;
    fs::create_dir_all(root.join("sub2"))?;
    fs::write(root.join("sub1").join("a.txt"), "a")?;
    fs::write(root.join("sub2").join("b.csv"), "b")?;

    let counters = sort(root, None)?;
    assert_eq!(counters.skipped_files, 0);

    let cleaned = cleanup(root);
    assert_eq!(cleaned, CleanupCounters { removed_folders: 2, skipped_folders: 0 });
    assert!(!root.join("sub1").exists());
    assert!(!root.join("sub2").exists());
    assert!(root.join("txt_files").join("a.txt").exists());
    assert!(root.join("csv_files").join("b.csv").exists());
    Ok(())
}

/// Folders still holding skipped files are kept and not counted as skipped.
#[test]
fn non_empty_folders_are_untouched() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    fs::create_dir_all(root.join("keep").join("inner"))?;
    fs::write(root.join("keep").join("inner").join("README"), "x")?;

    sort(root, None)?;
    let cleaned = cleanup(root);
    assert_eq!(cleaned.skipped_folders, 0);
    assert_eq!(cleaned.removed_folders, 0);
    assert!(root.join("keep").join("inner").join("README").exists());
    Ok(())
}

/// Nested empties collapse in one pass because children go first.
#[test]
fn nested_empty_tree_collapses() -> Result<(), Box<dyn std::error::Error>> {
    let td = tempdir()?;
    let root = td.path();
    fs::create_dir_all(root.join("a").join("b").join("c"))?;
    fs::create_dir_all(root.join("a").join("d"))?;

    let cleaned = cleanup(root);
    assert_eq!(cleaned.removed_folders, 4);
    assert_eq!(fs::read_dir(root)?.count(), 0);
    assert!(root.exists());
    Ok(())
}

#[test]
fn cleanup_of_missing_root_is_a_no_op() {
    let td = tempdir().unwrap();
    assert_eq!(cleanup(&td.path().join("gone")), CleanupCounters::default());
}
