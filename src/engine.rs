use crate::classify::Classifier;
use crate::error::CaptureError;
use crate::options::CaptureOptions;
use crate::output::{OutputFormat, write_result};
use crate::tree::render_tree;
use crate::types::CaptureResult;
use crate::walk::Walker;
use indexmap::IndexMap;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::env;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

fn read_file_content(path: &Path) -> io::Result<String> {
    let mut file = File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Relative path of `path` under `root`, joined with `/` on every platform.
fn relative_key(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

fn check_required_tools(tools: &[String]) -> Result<(), CaptureError> {
    match tools.iter().find(|tool| !tool_on_path(tool)) {
        Some(tool) => Err(CaptureError::MissingExternalTool(tool.clone())),
        None => Ok(()),
    }
}

fn tool_on_path(tool: &str) -> bool {
    let direct = Path::new(tool);
    if direct.components().count() > 1 {
        return direct.is_file();
    }
    let Some(paths) = env::var_os("PATH") else {
        return false;
    };
    env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(tool);
        candidate.is_file() || (cfg!(windows) && candidate.with_extension("exe").is_file())
    })
}

fn resolve_root(options: &CaptureOptions) -> Result<PathBuf, CaptureError> {
    if !options.root.exists() {
        return Err(CaptureError::DirectoryNotFound(options.root.clone()));
    }
    let root = match &options.root_transform {
        Some(transform) => transform.apply(&options.root),
        None => options.root.clone(),
    };
    if !root.is_dir() {
        return Err(CaptureError::DirectoryNotFound(root));
    }
    Ok(root)
}

/// Walks the root and builds the tree rendering plus captured file contents.
///
/// Fails before any traversal when a required tool is missing or the root (after
/// the optional root transform) is not an existing directory. Unreadable files do
/// not fail the snapshot.
pub fn snapshot(options: &CaptureOptions) -> Result<CaptureResult, CaptureError> {
    check_required_tools(&options.required_tools)?;
    let root = resolve_root(options)?;
    if root != options.root {
        progress!(
            options.debug,
            "Scanning {} instead of {}",
            root.display(),
            options.root.display()
        );
    }
    let classifier = Classifier::new(&options.config);
    let tree = render_tree(&root, &classifier, options);
    let files = collect_files(&root, &classifier, options);
    Ok(CaptureResult { tree, files })
}

/// Takes a [`snapshot`] and writes it to `sink` in the requested format.
///
/// Nothing is written unless the snapshot and its serialization both succeed.
pub fn capture<W: Write + ?Sized>(
    options: &CaptureOptions,
    sink: &mut W,
    format: OutputFormat,
) -> Result<(), CaptureError> {
    let result = snapshot(options)?;
    write_result(&result, format, sink)
}

fn collect_files(
    root: &Path,
    classifier: &Classifier,
    options: &CaptureOptions,
) -> IndexMap<String, String> {
    collect_files_with(root, classifier, options, read_file_content)
}

fn collect_files_with<R>(
    root: &Path,
    classifier: &Classifier,
    options: &CaptureOptions,
    read: R,
) -> IndexMap<String, String>
where
    R: Fn(&Path) -> io::Result<String> + Sync,
{
    progress!(options.debug, "Capturing file contents...");
    let candidates = gather_candidates(root, classifier, options);
    #[cfg(not(feature = "parallel"))]
    let contents = process_files(&candidates, options.debug, &read);
    #[cfg(feature = "parallel")]
    let contents = process_files_parallel(&candidates, options.debug, &read);
    candidates
        .into_iter()
        .map(|(key, _)| key)
        .zip(contents)
        .collect()
}

fn gather_candidates(
    root: &Path,
    classifier: &Classifier,
    options: &CaptureOptions,
) -> Vec<(String, PathBuf)> {
    let mut candidates = Vec::new();
    for entry in Walker::new(root, classifier, options) {
        if entry.is_dir {
            continue;
        }
        if !classifier.should_include_file(&entry.path) {
            progress!(options.debug, "Skipping file: {}", entry.name);
            continue;
        }
        candidates.push((relative_key(root, &entry.path), entry.path));
    }
    candidates
}

fn read_entry<R>(path: &Path, debug: bool, read: &R) -> String
where
    R: Fn(&Path) -> io::Result<String>,
{
    progress!(debug, "Processing file: {}", path.display());
    match read(path) {
        Ok(content) => content,
        Err(e) => {
            progress!(debug, "Error reading file {}: {}", path.display(), e);
            format!("Error reading file: {}", e)
        }
    }
}

#[cfg(not(feature = "parallel"))]
fn process_files<R>(candidates: &[(String, PathBuf)], debug: bool, read: &R) -> Vec<String>
where
    R: Fn(&Path) -> io::Result<String>,
{
    candidates
        .iter()
        .map(|(_, path)| read_entry(path, debug, read))
        .collect()
}

#[cfg(feature = "parallel")]
fn process_files_parallel<R>(
    candidates: &[(String, PathBuf)],
    debug: bool,
    read: &R,
) -> Vec<String>
where
    R: Fn(&Path) -> io::Result<String> + Sync,
{
    candidates
        .par_iter()
        .map(|(_, path)| read_entry(path, debug, read))
        .collect()
}
