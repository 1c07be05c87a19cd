//! Exclusion and text-detection rules.
//!
//! [`CaptureConfig::default`] holds the built-in rule set. Callers override it with a
//! [`ConfigOverrides`] value, usually read from a YAML file; every field present in the
//! overrides replaces the default field as a whole.

use crate::error::CaptureError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;

const DEFAULT_EXCLUDED_DIRS: &[&str] = &[
    ".git",
    ".terraform",
    "lib",
    "__pycache__",
    "venv",
    "node_modules",
    "autoload",
    "backup",
    "pack",
];
const DEFAULT_EXCLUDED_FILES: &[&str] = &["credentials.txt", ".gitignore"];
const DEFAULT_TEXT_EXTENSIONS: &[&str] = &[
    ".yml",
    ".yaml",
    ".json",
    ".j2",
    ".conf",
    ".txt",
    ".md",
    ".py",
    ".gitignore",
];

/// The active classification rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Directory basenames that are never traversed.
    pub excluded_dirs: BTreeSet<String>,
    /// File basenames that are never captured, whatever their type.
    pub excluded_files: BTreeSet<String>,
    /// Suffixes that mark a file as text outright.
    pub text_extensions: Vec<String>,
    /// When non-empty, the only basenames considered text.
    pub include_files: BTreeSet<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            excluded_dirs: to_set(DEFAULT_EXCLUDED_DIRS),
            excluded_files: to_set(DEFAULT_EXCLUDED_FILES),
            text_extensions: DEFAULT_TEXT_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            include_files: BTreeSet::new(),
        }
    }
}

impl CaptureConfig {
    /// Returns a copy with every field set in `overrides` replaced.
    pub fn merged(&self, overrides: ConfigOverrides) -> Self {
        let ConfigOverrides {
            excluded_dirs,
            excluded_files,
            text_extensions,
            include_files,
            ..
        } = overrides;
        Self {
            excluded_dirs: excluded_dirs.unwrap_or_else(|| self.excluded_dirs.clone()),
            excluded_files: excluded_files.unwrap_or_else(|| self.excluded_files.clone()),
            text_extensions: text_extensions.unwrap_or_else(|| self.text_extensions.clone()),
            include_files: include_files.unwrap_or_else(|| self.include_files.clone()),
        }
    }

    /// Loads overrides from `path` and applies them to the built-in defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let overrides = ConfigOverrides::from_yaml_file(path)?;
        Ok(Self::default().merged(overrides))
    }
}

/// A partial configuration. `None` fields keep the value they are merged onto.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    pub excluded_dirs: Option<BTreeSet<String>>,
    pub excluded_files: Option<BTreeSet<String>>,
    pub text_extensions: Option<Vec<String>>,
    pub include_files: Option<BTreeSet<String>>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_yml::Value>,
}

impl ConfigOverrides {
    /// Parses a YAML document. An empty or blank document yields no overrides.
    pub fn from_yaml_str(source: &str) -> Result<Self, serde_yml::Error> {
        if source.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yml::from_str(source)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, CaptureError> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|e| CaptureError::io(path, e))?;
        let overrides =
            Self::from_yaml_str(&source).map_err(|source| CaptureError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        for key in overrides.unknown.keys() {
            tracing::warn!("Ignoring unknown config key '{}' in {}", key, path.display());
        }
        Ok(overrides)
    }

    /// Keys present in the document that do not name a configuration field.
    pub fn unknown_keys(&self) -> impl Iterator<Item = &str> {
        self.unknown.keys().map(String::as_str)
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}
