use crate::config::CaptureConfig;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Maps a requested root to the directory that is actually scanned.
#[derive(Clone)]
pub struct RootTransform(Arc<dyn Fn(&Path) -> PathBuf + Send + Sync>);

impl RootTransform {
    pub fn new(f: impl Fn(&Path) -> PathBuf + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Builds a transform from `(name, subdir)` rules.
    ///
    /// The first rule whose `name` equals a component of the requested path redirects
    /// the scan to `requested/subdir`. Paths that match no rule are left alone.
    pub fn from_rules(rules: Vec<(String, PathBuf)>) -> Self {
        Self::new(move |requested| {
            rules
                .iter()
                .find(|(name, _)| {
                    requested
                        .components()
                        .any(|c| c.as_os_str() == name.as_str())
                })
                .map(|(_, subdir)| requested.join(subdir))
                .unwrap_or_else(|| requested.to_path_buf())
        })
    }

    pub fn apply(&self, requested: &Path) -> PathBuf {
        (self.0)(requested)
    }
}

impl fmt::Debug for RootTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RootTransform(..)")
    }
}

#[derive(Debug, Clone)]
pub struct CaptureOptions {
    pub root: PathBuf,
    pub config: CaptureConfig,
    pub follow_links: bool,
    pub debug: bool,
    pub required_tools: Vec<String>,
    pub root_transform: Option<RootTransform>,
}
impl Default for CaptureOptions {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            config: CaptureConfig::default(),
            follow_links: false,
            debug: false,
            required_tools: Vec::new(),
            root_transform: None,
        }
    }
}
#[derive(Debug, Default)]
pub struct CaptureBuilder {
    options: CaptureOptions,
}
impl CaptureBuilder {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            options: CaptureOptions {
                root: root.into(),
                ..Default::default()
            },
        }
    }
    pub fn config(mut self, config: CaptureConfig) -> Self {
        self.options.config = config;
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn debug(mut self, yes: bool) -> Self {
        self.options.debug = yes;
        self
    }
    pub fn require_tool(mut self, name: impl Into<String>) -> Self {
        self.options.required_tools.push(name.into());
        self
    }
    pub fn root_transform(mut self, transform: RootTransform) -> Self {
        self.options.root_transform = Some(transform);
        self
    }
    pub fn build(self) -> CaptureOptions {
        self.options
    }
}
