//! Output formatting for capture results.
//!
//! Provides functions to serialize a [`CaptureResult`] as plain text, JSON or YAML.
//! All formats preserve the exact content of files and the directory tree, and list
//! files in the order they were collected.

use crate::{CaptureError, CaptureResult};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Returns the conventional file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OutputFormat {
    type Err = CaptureError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(CaptureError::UnknownFormat(other.to_string())),
        }
    }
}

/// Formats the capture result into a string.
pub fn format_result(result: &CaptureResult, format: OutputFormat) -> Result<String, CaptureError> {
    match format {
        OutputFormat::Text => Ok(format_text(result)),
        OutputFormat::Json => format_json(result),
        OutputFormat::Yaml => format_yaml(result),
    }
}

/// Writes the formatted result into `sink`.
///
/// The whole document is rendered before the first byte is written.
pub fn write_result<W: Write + ?Sized>(
    result: &CaptureResult,
    format: OutputFormat,
    sink: &mut W,
) -> Result<(), CaptureError> {
    let content = format_result(result, format)?;
    sink.write_all(content.as_bytes())
        .map_err(CaptureError::Write)?;
    sink.flush().map_err(CaptureError::Write)
}

/// Writes the formatted result to a file.
pub fn write_result_to_file(
    result: &CaptureResult,
    format: OutputFormat,
    path: impl AsRef<Path>,
) -> Result<(), CaptureError> {
    let content = format_result(result, format)?;
    fs::write(&path, content).map_err(|source| CaptureError::OutputFile {
        path: path.as_ref().to_path_buf(),
        source,
    })
}

// ----------------------- Internal formatting -----------------------

fn format_text(result: &CaptureResult) -> String {
    let mut out = String::with_capacity(1024);
    out.push_str(&result.tree);
    for (path, content) in &result.files {
        out.push_str("\n\n# File: ");
        out.push_str(path);
        out.push_str("\n\n");
        out.push_str(content);
    }
    out
}

fn format_json(result: &CaptureResult) -> Result<String, CaptureError> {
    Ok(serde_json::to_string_pretty(result)?)
}

fn format_yaml(result: &CaptureResult) -> Result<String, CaptureError> {
    Ok(serde_yml::to_string(result)?)
}
