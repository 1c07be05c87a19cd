//! Internal module for rendering the directory tree of a capture.

use crate::classify::Classifier;
use crate::options::CaptureOptions;
use crate::walk::Walker;
use std::fs;
use std::path::Path;

#[derive(Debug)]
struct TreeNode {
    name: String,
    children: Vec<TreeNode>,
}

/// Renders the visible part of `root` as a `tree`-style listing.
///
/// Uses the same walk as the content pass, so excluded directories are never
/// entered and files rejected by the classifier are left out. Connectors are
/// chosen among the entries that are actually shown.
pub(crate) fn render_tree(
    root: &Path,
    classifier: &Classifier,
    options: &CaptureOptions,
) -> String {
    progress!(options.debug, "Generating tree for: {}", root.display());

    // levels[d] holds the children collected so far for the open node at depth d
    let mut levels: Vec<Vec<TreeNode>> = vec![Vec::new()];
    for entry in Walker::new(root, classifier, options) {
        if entry.depth > levels.len() {
            continue;
        }
        if !entry.is_dir && !classifier.should_include_file(&entry.path) {
            progress!(options.debug, "Skipping non-text file: {}", entry.name);
            continue;
        }
        close_levels(&mut levels, entry.depth);
        levels[entry.depth - 1].push(TreeNode {
            name: entry.name,
            children: Vec::new(),
        });
        if entry.is_dir {
            progress!(options.debug, "Generating tree for: {}", entry.path.display());
            levels.push(Vec::new());
        }
    }
    close_levels(&mut levels, 1);

    let mut lines = vec![root_label(root)];
    if let Some(nodes) = levels.first() {
        render_nodes(nodes, "", &mut lines);
    }
    lines.join("\n")
}

/// Attaches every level deeper than `depth` to its parent node.
fn close_levels(levels: &mut Vec<Vec<TreeNode>>, depth: usize) {
    while levels.len() > depth {
        let Some(children) = levels.pop() else {
            break;
        };
        if let Some(parent) = levels.last_mut().and_then(|level| level.last_mut()) {
            parent.children = children;
        }
    }
}

fn render_nodes(nodes: &[TreeNode], prefix: &str, lines: &mut Vec<String>) {
    for (i, node) in nodes.iter().enumerate() {
        let is_last = i + 1 == nodes.len();
        let connector = if is_last { "└── " } else { "├── " };
        lines.push(format!("{}{}{}", prefix, connector, node.name));
        let extension = if is_last { "    " } else { "│   " };
        render_nodes(&node.children, &format!("{}{}", prefix, extension), lines);
    }
}

fn root_label(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            fs::canonicalize(root)
                .ok()
                .and_then(|p| p.file_name().map(|name| name.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| root.display().to_string())
}
