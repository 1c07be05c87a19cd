//! The directory walk shared by the tree pass and the content pass.

use crate::classify::Classifier;
use crate::options::CaptureOptions;
use ignore::WalkBuilder;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A directory or regular file yielded by [`Walker`], below the walk root.
#[derive(Debug)]
pub(crate) struct WalkEntry {
    pub(crate) path: PathBuf,
    pub(crate) name: String,
    pub(crate) depth: usize,
    pub(crate) is_dir: bool,
}

/// Remembers which paths a walk has already yielded.
pub(crate) struct VisitGuard {
    follow_links: bool,
    seen: HashSet<PathBuf>,
}
impl VisitGuard {
    pub(crate) fn new(follow_links: bool) -> Self {
        Self {
            follow_links,
            seen: HashSet::new(),
        }
    }
    /// Returns `false` when `path` was seen before. With links followed, paths are
    /// compared by their canonical form so two routes to one entry count once.
    pub(crate) fn first_visit(&mut self, path: &Path) -> bool {
        let key = if self.follow_links {
            fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
        } else {
            path.to_path_buf()
        };
        self.seen.insert(key)
    }
}

/// Sorted depth-first walk that never enters excluded directories.
///
/// Every standard ignore filter is off. Symlinked directories are entered only when
/// `follow_links` is set, and a symlink to a regular file always counts as a file.
/// Entries that resolve to an already yielded path are dropped.
pub(crate) struct Walker {
    inner: ignore::Walk,
    guard: VisitGuard,
    debug: bool,
}
impl Walker {
    pub(crate) fn new(root: &Path, classifier: &Classifier, options: &CaptureOptions) -> Self {
        let mut builder = WalkBuilder::new(root);
        builder
            .standard_filters(false)
            .follow_links(options.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b));
        let config = classifier.config().clone();
        let debug = options.debug;
        builder.filter_entry(move |entry| {
            let is_dir = entry.file_type().is_some_and(|t| t.is_dir());
            if entry.depth() == 0 || !is_dir {
                return true;
            }
            let keep = Classifier::new(&config).should_descend(entry.path());
            if !keep {
                progress!(
                    debug,
                    "Skipping excluded directory: {}",
                    entry.file_name().to_string_lossy()
                );
            }
            keep
        });
        let mut guard = VisitGuard::new(options.follow_links);
        guard.first_visit(root);
        Self {
            inner: builder.build(),
            guard,
            debug,
        }
    }
}

impl Iterator for Walker {
    type Item = WalkEntry;

    fn next(&mut self) -> Option<WalkEntry> {
        loop {
            let entry = match self.inner.next()? {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("Skipping entry: {}", e);
                    continue;
                }
            };
            if entry.depth() == 0 {
                continue;
            }
            let Some(file_type) = entry.file_type() else {
                continue;
            };
            let is_dir = file_type.is_dir();
            if !is_dir && !entry.path().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            if !self.guard.first_visit(entry.path()) {
                let kind = if is_dir { "directory" } else { "file" };
                progress!(self.debug, "Skipping already processed {}: {}", kind, name);
                continue;
            }
            return Some(WalkEntry {
                depth: entry.depth(),
                path: entry.into_path(),
                name,
                is_dir,
            });
        }
    }
}
