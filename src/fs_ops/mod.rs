//! Filesystem operations: bucket creation and single-file moves.

mod atomic;
mod bucket;
mod helpers;
mod place;

pub use atomic::rename_no_replace;
pub use bucket::{bucket_path, ensure_bucket, BucketStatus};
pub use helpers::{describe_io_error, io_error_with_help_io};
pub use place::{place, Outcome};
