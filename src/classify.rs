//! Inclusion decisions for single filesystem entries.

use crate::config::CaptureConfig;
use std::borrow::Cow;
use std::path::Path;

/// Applies a [`CaptureConfig`] to individual paths.
///
/// Only the basename of a path is ever consulted; the classifier never touches the
/// filesystem.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    config: &'a CaptureConfig,
}

impl<'a> Classifier<'a> {
    pub fn new(config: &'a CaptureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &'a CaptureConfig {
        self.config
    }

    /// Decides whether a file is human-readable text.
    ///
    /// A non-empty `include_files` list is the whole rule. Otherwise the basename is
    /// matched against `text_extensions` (case-sensitive suffix match), and failing
    /// that against the media type guessed from the file name.
    pub fn is_text_file(&self, path: &Path) -> bool {
        let name = basename(path);
        if !self.config.include_files.is_empty() {
            return self.config.include_files.contains(name.as_ref());
        }
        if self
            .config
            .text_extensions
            .iter()
            .any(|ext| name.ends_with(ext.as_str()))
        {
            return true;
        }
        mime_guess::from_path(path)
            .first()
            .is_some_and(|mime| mime.type_().as_str() == "text")
    }

    /// A file is captured when it is not excluded by name and is text.
    pub fn should_include_file(&self, path: &Path) -> bool {
        !self.config.excluded_files.contains(basename(path).as_ref()) && self.is_text_file(path)
    }

    /// Whether a directory is traversed at all.
    pub fn should_descend(&self, path: &Path) -> bool {
        self.is_dir_name_allowed(&basename(path))
    }

    pub(crate) fn is_dir_name_allowed(&self, name: &str) -> bool {
        !self.config.excluded_dirs.contains(name)
    }
}

fn basename(path: &Path) -> Cow<'_, str> {
    path.file_name()
        .map(|name| name.to_string_lossy())
        .unwrap_or(Cow::Borrowed(""))
}
