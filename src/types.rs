use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The complete snapshot of one directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureResult {
    /// A visual tree of the included directories and files.
    ///
    /// The first line is the root's name; nesting is drawn with `├──`, `└──` and `│`
    /// connectors like the `tree` command.
    pub tree: String,
    /// Captured files keyed by their `/`-separated path relative to the scan root,
    /// in traversal order.
    ///
    /// A file that could not be read holds an `Error reading file: ...` placeholder
    /// instead of its content.
    pub files: IndexMap<String, String>,
}
