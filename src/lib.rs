//! # Sourcesnatcher
//!
//! `sourcesnatcher` captures a project directory as a single snapshot: a `tree`-style
//! listing of the directory followed by the contents of every text file in it. The
//! snapshot can be written as plain text, JSON or YAML, which makes it easy to share a
//! codebase or hand it to another tool in one piece.
//!
//! Which entries are captured is decided by a [`CaptureConfig`]:
//!
//! - directories named in `excluded_dirs` are never entered,
//! - files named in `excluded_files` are never captured,
//! - a file is text when its name is listed in `include_files` (if that list is not
//!   empty), or otherwise when it ends with one of `text_extensions` or its name maps
//!   to a `text/*` media type.
//!
//! # Features
//!
//! - `parallel`: Reads file contents in parallel using Rayon. Output order is unchanged.
//!
//! # Example
//!
//! ```no_run
//! use sourcesnatcher::{CaptureBuilder, CaptureConfig, OutputFormat, capture};
//!
//! let options = CaptureBuilder::new("my-project")
//!     .config(CaptureConfig::default())
//!     .debug(true)
//!     .build();
//!
//! let mut out = Vec::new();
//! capture(&options, &mut out, OutputFormat::Json).expect("Failed to capture project");
//! println!("{}", String::from_utf8_lossy(&out));
//! ```

macro_rules! progress {
    ($enabled:expr, $($arg:tt)+) => {
        if $enabled {
            tracing::debug!($($arg)+);
        }
    };
}

mod classify;
mod config;
mod engine;
mod error;
mod options;
pub mod output;
mod tree;
mod types;
mod walk;

pub use classify::Classifier;
pub use config::{CaptureConfig, ConfigOverrides};
pub use engine::{capture, snapshot};
pub use error::CaptureError;
pub use options::{CaptureBuilder, CaptureOptions, RootTransform};
pub use output::OutputFormat;
pub use types::CaptureResult;
