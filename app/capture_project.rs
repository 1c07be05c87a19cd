//! Command-line interface for sourcesnatcher.
//!
//! Captures a project directory's tree and text file contents into a single
//! output file in text, JSON or YAML.

use clap::{Parser, ValueEnum};
use sourcesnatcher::output::{write_result, write_result_to_file};
use sourcesnatcher::{
    CaptureBuilder, CaptureConfig, CaptureError, CaptureOptions, OutputFormat, RootTransform,
    snapshot,
};
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use std::process::exit;
use tracing_subscriber::EnvFilter;

/// Capture project structure and file contents
#[derive(Parser)]
#[command(name = "capture-project", version, about, long_about = None)]
struct Cli {
    /// Project directory to capture
    directory: PathBuf,

    /// Output file name (default: <project_name>_contents.<ext>, `-` for stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Enable debug output
    #[arg(long)]
    debug: bool,

    /// Path to a YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Follow symlinked directories
    #[arg(long)]
    follow_links: bool,

    /// Scan SUBDIR instead when the directory path contains a component NAME (can be repeated)
    #[arg(long = "remap", value_name = "NAME=SUBDIR", value_parser = parse_remap)]
    remaps: Vec<(String, PathBuf)>,

    /// Fail unless this command is available on PATH (can be repeated)
    #[arg(long = "require-tool", value_name = "NAME")]
    required_tools: Vec<String>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
    Yaml,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::Yaml => OutputFormat::Yaml,
        }
    }
}

/// Parse `NAME=SUBDIR` into a remap rule.
fn parse_remap(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((name, subdir)) if !name.is_empty() && !subdir.is_empty() => {
            Ok((name.to_string(), PathBuf::from(subdir)))
        }
        _ => Err(format!("invalid remap '{}', expected NAME=SUBDIR", s)),
    }
}

enum Destination {
    Stdout,
    File(PathBuf),
}

impl Cli {
    fn into_options(self) -> Result<(CaptureOptions, OutputFormat, Destination), CaptureError> {
        let config = match &self.config {
            Some(path) => CaptureConfig::load(path)?,
            None => CaptureConfig::default(),
        };
        let format = OutputFormat::from(self.format);
        let destination = match self.output {
            Some(path) if path.as_os_str() == "-" => Destination::Stdout,
            Some(path) => Destination::File(path),
            None => Destination::File(default_output_path(&self.directory, format)),
        };

        let mut builder = CaptureBuilder::new(self.directory)
            .config(config)
            .follow_links(self.follow_links)
            .debug(self.debug);
        if !self.remaps.is_empty() {
            builder = builder.root_transform(RootTransform::from_rules(self.remaps));
        }
        for tool in self.required_tools {
            builder = builder.require_tool(tool);
        }

        Ok((builder.build(), format, destination))
    }
}

fn default_output_path(directory: &Path, format: OutputFormat) -> PathBuf {
    let project_name = directory
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            std::fs::canonicalize(directory)
                .ok()
                .and_then(|p| p.file_name().map(|name| name.to_string_lossy().into_owned()))
        })
        .unwrap_or_else(|| "project".to_string());
    PathBuf::from(format!("{}_contents.{}", project_name, format.extension()))
}

fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);
    let directory = cli.directory.clone();

    if let Err(e) = run(cli, &directory) {
        eprintln!("Error: {}", e);
        exit(1);
    }
}

fn run(cli: Cli, directory: &Path) -> Result<(), CaptureError> {
    let (options, format, destination) = cli.into_options()?;
    match destination {
        Destination::Stdout => {
            eprintln!(
                "Preparing to capture project structure for {}",
                directory.display()
            );
            let result = snapshot(&options)?;
            write_result(&result, format, &mut io::stdout().lock())?;
        }
        Destination::File(path) => {
            println!(
                "Preparing to capture project structure for {}",
                directory.display()
            );
            let result = snapshot(&options)?;
            write_result_to_file(&result, format, &path)?;
            println!("Output saved to {}", path.display());
        }
    }
    Ok(())
}
