//! Non-clobbering rename.
//! - Linux/glibc: renameat2(RENAME_NOREPLACE), so a collision is detected atomically.
//! - Elsewhere, or when the filesystem rejects the flag: existence check, then rename.
//! - Cross-device: copy into a create_new destination, then remove the source. If the
//!   source cannot be removed the copy is rolled back and the original stays in place.
//!   A symlink is recreated as a link, never dereferenced.
//!
//! A collision always surfaces as `io::ErrorKind::AlreadyExists`.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use tracing::debug;

use super::helpers::io_error_with_help_io;

pub fn rename_no_replace(src: &Path, dst: &Path) -> io::Result<()> {
    match rename_exclusive(src, dst) {
        Err(e) if is_cross_device(&e) => {
            debug!(src = %src.display(), dst = %dst.display(), "cross-device move; copying");
            copy_then_remove(src, dst)
        }
        other => other,
    }
}

#[cfg(all(target_os = "linux", target_env = "gnu"))]
fn rename_exclusive(src: &Path, dst: &Path) -> io::Result<()> {
    use std::ffi::CString;
    use std::os::unix::ffi::OsStrExt;

    let to_c = |p: &Path| {
        CString::new(p.as_os_str().as_bytes())
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "path contains null byte"))
    };
    let src_c = to_c(src)?;
    let dst_c = to_c(dst)?;
    let rc = unsafe {
        libc::renameat2(
            libc::AT_FDCWD,
            src_c.as_ptr(),
            libc::AT_FDCWD,
            dst_c.as_ptr(),
            libc::RENAME_NOREPLACE,
        )
    };
    if rc == 0 {
        return Ok(());
    }
    let e = io::Error::last_os_error();
    match e.raw_os_error() {
        // Filesystem or kernel without RENAME_NOREPLACE support.
        Some(code) if code == libc::EINVAL || code == libc::ENOSYS || code == libc::ENOTSUP => {
            checked_rename(src, dst)
        }
        _ => Err(e),
    }
}

#[cfg(not(all(target_os = "linux", target_env = "gnu")))]
fn rename_exclusive(src: &Path, dst: &Path) -> io::Result<()> {
    checked_rename(src, dst)
}

fn checked_rename(src: &Path, dst: &Path) -> io::Result<()> {
    if fs::symlink_metadata(dst).is_ok() {
        return Err(already_exists(dst));
    }
    fs::rename(src, dst)
}

fn copy_then_remove(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::symlink_metadata(src).map_err(io_error_with_help_io("inspect source", src))?;
    if meta.file_type().is_symlink() {
        return relink_then_remove(src, dst);
    }

    let mut reader = File::open(src).map_err(io_error_with_help_io("open source", src))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .map_err(|e| {
            if e.kind() == io::ErrorKind::AlreadyExists {
                already_exists(dst)
            } else {
                e
            }
        })?;

    let copied = io::copy(&mut reader, &mut writer).and_then(|_| writer.sync_all());
    drop(writer);
    if let Err(e) = copied {
        let _ = fs::remove_file(dst);
        return Err(e);
    }
    if let Ok(meta) = fs::metadata(src) {
        let _ = fs::set_permissions(dst, meta.permissions());
    }

    if let Err(e) = fs::remove_file(src) {
        let _ = fs::remove_file(dst);
        return Err(io_error_with_help_io("remove original after copy", src)(e));
    }
    Ok(())
}

/// Recreate the link itself at `dst`; the target is never read.
fn relink_then_remove(src: &Path, dst: &Path) -> io::Result<()> {
    let target = fs::read_link(src).map_err(io_error_with_help_io("read link", src))?;
    make_symlink(&target, dst).map_err(|e| {
        if e.kind() == io::ErrorKind::AlreadyExists {
            already_exists(dst)
        } else {
            e
        }
    })?;
    if let Err(e) = fs::remove_file(src) {
        let _ = fs::remove_file(dst);
        return Err(io_error_with_help_io("remove original link", src)(e));
    }
    Ok(())
}

#[cfg(unix)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(target, link)
}

#[cfg(windows)]
fn make_symlink(target: &Path, link: &Path) -> io::Result<()> {
    std::os::windows::fs::symlink_file(target, link)
}

fn already_exists(dst: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("destination already exists: {}", dst.display()),
    )
}

pub(crate) fn is_cross_device(e: &io::Error) -> bool {
    // std::io::ErrorKind::CrossesDevices is not stable everywhere; use raw codes.
    match e.raw_os_error() {
        #[cfg(unix)]
        Some(code) => code == libc::EXDEV,
        #[cfg(windows)]
        Some(code) => code == 17, // ERROR_NOT_SAME_DEVICE
        _ => false,
    }
}
