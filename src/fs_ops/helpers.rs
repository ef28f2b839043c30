//! I/O helper utilities.
//!
//! Enrich io::Error values with the operation, the path and a short hint so per-item
//! log events say something actionable.
//!
//! Usage (in functions returning io::Result<_>):
//!   fs::remove_file(p).map_err(io_error_with_help_io("remove original", p))?;

use std::io;
use std::path::Path;

fn hint_for(e: &io::Error) -> Option<&'static str> {
    #[cfg(unix)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            libc::EACCES | libc::EPERM => Some("permission denied; check ownership and write permissions"),
            libc::EXDEV => Some("cross-filesystem; rename not possible"),
            libc::EEXIST => Some("already exists in the destination"),
            libc::ENOENT => Some("path not found; it may have been moved or removed"),
            libc::ENOTEMPTY => Some("directory is not empty"),
            libc::EBUSY => Some("resource busy; another process holds it"),
            libc::EROFS => Some("read-only filesystem"),
            libc::ENOSPC => Some("insufficient space on device"),
            libc::ENOTDIR => Some("a path component is not a directory"),
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }
    #[cfg(windows)]
    if let Some(code) = e.raw_os_error() {
        let hint = match code {
            5 => Some("access denied; check permissions"),   // ERROR_ACCESS_DENIED
            17 => Some("not same device; cross-filesystem"), // ERROR_NOT_SAME_DEVICE
            32 => Some("sharing violation; file is in use"), // ERROR_SHARING_VIOLATION
            80 | 183 => Some("already exists in the destination"),
            145 => Some("directory is not empty"), // ERROR_DIR_NOT_EMPTY
            _ => None,
        };
        if hint.is_some() {
            return hint;
        }
    }
    match e.kind() {
        io::ErrorKind::PermissionDenied => Some("permission denied; check ownership and write permissions"),
        io::ErrorKind::NotFound => Some("path not found; it may have been moved or removed"),
        io::ErrorKind::AlreadyExists => Some("already exists in the destination"),
        _ => None,
    }
}

/// "<op> '<path>': <error> (<hint>)", plus the raw OS code when there is one.
pub fn describe_io_error(op: &str, path: &Path, e: &io::Error) -> String {
    let mut msg = format!("{} '{}': {}", op, path.display(), e);
    if let Some(hint) = hint_for(e) {
        msg.push_str(&format!(" ({hint})"));
    }
    if let Some(code) = e.raw_os_error() {
        msg.push_str(&format!(" [os code: {code}]"));
    }
    msg
}

/// Adapter for io::Result code; keeps the original ErrorKind.
pub fn io_error_with_help_io<'a>(
    op: &'a str,
    path: &'a Path,
) -> impl FnOnce(io::Error) -> io::Error + 'a {
    move |e: io::Error| io::Error::new(e.kind(), describe_io_error(op, path, &e))
}
