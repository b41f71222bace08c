//! This file defines the command-line interface (CLI) for the xt-entropy application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "xt-entropy",
    author = "Obscura Team (Relay)",
    version = env!("CARGO_PKG_VERSION"),
    about = "Score every file of an evidence volume by Shannon entropy",
    long_about = "xt-entropy runs the XT Entropy engine against a directory on disk, presenting the directory as one evidence volume. Every file is read once and annotated with the Shannon entropy of its bytes (0 to 8 bits per byte), the same value the extension attaches inside the forensic host.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress the summary table and all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `xt-entropy` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scores every file below a directory.
    #[command(about = "Scores every file below a directory and prints one line per file.")]
    Scan(ScanCommand),

    /// Prints the extension banner.
    #[command(about = "Prints the extension name and version.")]
    About,
}

/// Arguments for the `scan` command.
#[derive(Parser, Debug)]
pub struct ScanCommand {
    /// Directory presented as the evidence volume.
    #[arg(value_name = "DIR", help = "Directory presented as the evidence volume.")]
    pub root: PathBuf,

    /// Short name of the volume (defaults to the directory name).
    #[arg(long = "volume", value_name = "NAME", help = "Short volume name used to derive the registry key.")]
    pub volume: Option<String>,

    /// Path to an engine configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", env = "XT_ENTROPY_CONFIG", help = "Path to an engine configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Export the scores and statistics to a JSON file.
    #[arg(long = "json-file", value_name = "FILE", help = "Export the scores and statistics to a JSON file.")]
    pub json_file: Option<PathBuf>,

    /// Suppress the summary table.
    #[arg(long = "no-summary", help = "Suppress the summary table.")]
    pub no_summary: bool,
}
