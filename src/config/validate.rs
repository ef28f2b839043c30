//! Config validation logic.
//! Fatal startup checks: the source must be a readable directory; the destination
//! root must be a directory, and is created when missing.

use std::fs;
use std::path::Path;
use tracing::{debug, error, info};

use crate::errors::SortError;
use crate::sort::ensure_source_root;

use super::types::Config;

impl Config {
    /// Validate source and destination roots before any file is touched.
    pub fn validate(&self) -> Result<(), SortError> {
        ensure_source_root(&self.source).inspect_err(|e| {
            error!(code = e.code(), path = %self.source.display(), "{e}");
        })?;
        debug!("source readable: {}", self.source.display());

        let dest = self.effective_destination();
        ensure_destination_root(dest).inspect_err(|e| {
            error!(code = e.code(), path = %dest.display(), "{e}");
        })?;

        info!(
            "Config validated: source='{}' destination='{}' cleanup={} log_file='{}'",
            self.source.display(),
            dest.display(),
            self.cleanup,
            self.log_file
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "<none>".into())
        );
        Ok(())
    }
}

/// Ensure directory exists (create if missing). If it exists, it must be a directory.
fn ensure_destination_root(path: &Path) -> Result<(), SortError> {
    if path.exists() {
        if !path.is_dir() {
            return Err(SortError::DestinationNotDirectory(path.to_path_buf()));
        }
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| SortError::DestinationCreateFailed {
        path: path.to_path_buf(),
        context: e.to_string(),
    })?;
    info!("Created destination directory: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;

    #[test]
    fn creates_missing_destination() {
        let temp = assert_fs::TempDir::new().unwrap();
        let mut cfg = Config::new(temp.path());
        cfg.destination = Some(temp.path().join("out/sorted"));
        cfg.validate().unwrap();
        assert!(temp.path().join("out/sorted").is_dir());
    }

    #[test]
    fn destination_file_is_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("dest").touch().unwrap();
        let mut cfg = Config::new(temp.path());
        cfg.destination = Some(temp.path().join("dest"));
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, SortError::DestinationNotDirectory(_)));
    }

    #[test]
    fn missing_source_is_rejected() {
        let temp = assert_fs::TempDir::new().unwrap();
        let cfg = Config::new(temp.path().join("missing"));
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, SortError::SourceNotFound(_)));
    }
}
