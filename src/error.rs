use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("Directory not found: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("The '{0}' command is not installed. Please install it first.")]
    MissingExternalTool(String),
    #[error("Failed to write output: {0}")]
    Write(#[source] std::io::Error),
    #[error("Failed to write output file {path}: {source}")]
    OutputFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    Yaml(#[from] serde_yml::Error),
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid configuration in {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_yml::Error,
    },
    #[error("Unknown output format '{0}' (expected text, json or yaml)")]
    UnknownFormat(String),
}
impl CaptureError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CaptureError::Io {
            path: path.into(),
            source,
        }
    }
}
