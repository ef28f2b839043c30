//! Config module.
//! Provides configuration types, default paths, XML loading, and validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, default_log_path, path_has_symlink_ancestor, CONFIG_ENV};
pub use types::{Config, LogLevel};
pub use xml::{load_config_from_xml, load_config_from_xml_path, FileSettings};
