//! Extension classifier.
//! Derives the bucket key for a file from its final path segment. Pure; never touches disk.
//!
//! Extensions stay `OsString`s so names that are not valid UTF-8 keep their own bytes
//! and land in distinct buckets.

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Suffix appended to an extension to form the bucket directory name.
pub const BUCKET_SUFFIX: &str = "_files";

/// Lowercased extension of `path`'s final segment, or None when it has no dot-suffix.
///
/// Dotfiles such as `.bashrc` have an empty base and are treated as extensionless,
/// as is a trailing dot (`notes.`). Non-UTF-8 extensions are lowercased in their ASCII
/// range only.
pub fn classify(path: &Path) -> Option<OsString> {
    let name = path.file_name()?.as_encoded_bytes();
    let dot = name.iter().rposition(|&b| b == b'.')?;
    let (base, ext) = (&name[..dot], &name[dot + 1..]);
    if base.is_empty() || ext.is_empty() {
        return None;
    }
    // SAFETY: `ext` was split off a valid OsStr right after an ASCII '.'.
    let ext = unsafe { OsStr::from_encoded_bytes_unchecked(ext) };
    Some(match ext.to_str() {
        Some(s) => OsString::from(s.to_lowercase()),
        None => ext.to_ascii_lowercase(),
    })
}

/// Bucket directory name for an extension, e.g. `txt` -> `txt_files`.
#[inline]
pub fn bucket_name(extension: &OsStr) -> OsString {
    let mut name = extension.to_os_string();
    name.push(BUCKET_SUFFIX);
    name
}
