//! XML configuration support.
//! - Loads optional settings from config.xml (quick_xml + serde).
//! - A missing file means "no settings"; a malformed one is an error.
//!
//! Notes:
//! - Source/destination are per-run and only come from the command line.
//! - Unknown XML fields are rejected to surface typos early.

use anyhow::{Context, Result};
use quick_xml::de::from_str as from_xml_str;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::paths::default_config_path;
use super::types::{Config, LogLevel};

/// Struct mirroring the XML config for deserialization.
#[derive(Debug, Deserialize)]
#[serde(rename = "config")]
#[serde(deny_unknown_fields)]
struct XmlConfig {
    #[serde(rename = "log_level")]
    log_level: Option<String>,
    #[serde(rename = "log_file")]
    log_file: Option<String>,
    #[serde(rename = "cleanup", default, deserialize_with = "de_bool_trimmed_opt")]
    cleanup: Option<bool>,
    #[serde(rename = "fail_on_skips", default, deserialize_with = "de_bool_trimmed_opt")]
    fail_on_skips: Option<bool>,
}

// Accept "true"/"false"/"1"/"0"/"yes"/"no" with surrounding whitespace.
fn de_bool_trimmed_opt<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt: Option<String> = Option::deserialize(deserializer)?;
    Ok(opt.and_then(|s| match s.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }))
}

/// Settings read from a config file. Unset fields leave the Config untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    pub log_level: Option<LogLevel>,
    pub log_file: Option<PathBuf>,
    pub cleanup: Option<bool>,
    pub fail_on_skips: Option<bool>,
}

impl FileSettings {
    /// Overlay these settings onto `cfg`.
    pub fn apply(&self, cfg: &mut Config) {
        if let Some(level) = &self.log_level {
            cfg.log_level = level.clone();
        }
        if let Some(file) = &self.log_file {
            cfg.log_file = Some(file.clone());
        }
        if let Some(cleanup) = self.cleanup {
            cfg.cleanup = cleanup;
        }
        if let Some(fail) = self.fail_on_skips {
            cfg.fail_on_skips = fail;
        }
    }
}

/// Parse settings from a specific XML file.
pub fn load_config_from_xml_path(path: &Path) -> Result<FileSettings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("read config file {}", path.display()))?;
    let parsed: XmlConfig = from_xml_str(&content)
        .with_context(|| format!("parse config file {}", path.display()))?;

    let non_empty = |s: &str| {
        let t = s.trim();
        (!t.is_empty()).then(|| t.to_string())
    };

    Ok(FileSettings {
        log_level: parsed
            .log_level
            .as_deref()
            .and_then(|s| s.trim().parse::<LogLevel>().ok()),
        log_file: parsed.log_file.as_deref().and_then(non_empty).map(PathBuf::from),
        cleanup: parsed.cleanup,
        fail_on_skips: parsed.fail_on_skips,
    })
}

/// Load settings from $EXT_SORT_CONFIG or the default location.
/// Returns Ok(None) when no config file exists.
pub fn load_config_from_xml() -> Result<Option<FileSettings>> {
    let Some(path) = default_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        debug!(path = %path.display(), "No config file; using defaults");
        return Ok(None);
    }
    load_config_from_xml_path(&path).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn reads_all_fields() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(
            &p,
            "<config>\n  <log_level> debug </log_level>\n  <log_file>/tmp/s.log</log_file>\n  <cleanup>true</cleanup>\n  <fail_on_skips> yes </fail_on_skips>\n</config>\n",
        )
        .unwrap();

        let s = load_config_from_xml_path(&p).unwrap();
        assert_eq!(s.log_level, Some(LogLevel::Debug));
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/s.log")));
        assert_eq!(s.cleanup, Some(true));
        assert_eq!(s.fail_on_skips, Some(true));
    }

    #[test]
    fn empty_log_file_is_ignored() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config><log_file>   </log_file></config>").unwrap();
        let s = load_config_from_xml_path(&p).unwrap();
        assert_eq!(s.log_file, None);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let td = tempdir().unwrap();
        let p = td.path().join("config.xml");
        fs::write(&p, "<config><download_base>/x</download_base></config>").unwrap();
        assert!(load_config_from_xml_path(&p).is_err());
    }

    #[test]
    fn apply_overlays_only_set_fields() {
        let mut cfg = Config::new("/src");
        cfg.log_file = None;
        let s = FileSettings {
            cleanup: Some(true),
            ..Default::default()
        };
        s.apply(&mut cfg);
        assert!(cfg.cleanup);
        assert_eq!(cfg.log_level, LogLevel::Normal);
        assert_eq!(cfg.log_file, None);
    }
}
