//! Command line argument parsing for the annotext CLI using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Annotext - inspect and normalize annotated-text JSON documents
#[derive(Parser, Debug, Clone)]
#[command(name = "annotext")]
#[command(about = "Inspect and normalize annotated-text JSON documents")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct AnnotextArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human")]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl AnnotextArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Summarize the layers of an annotated-text document
    Inspect(InspectArgs),

    /// Decode a document and write it back in canonical form
    Normalize(NormalizeArgs),

    /// Decode a JSON array of morphological analyses
    #[command(name = "decode-analyses")]
    DecodeAnalyses(DecodeAnalysesArgs),
}

/// Arguments for inspecting a document
#[derive(Parser, Debug, Clone)]
pub struct InspectArgs {
    /// Annotated-text JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Arguments for normalizing a document
#[derive(Parser, Debug, Clone)]
pub struct NormalizeArgs {
    /// Annotated-text JSON file
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Write the normalized document here instead of stdout
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

/// Arguments for decoding an analysis array
#[derive(Parser, Debug, Clone)]
pub struct DecodeAnalysesArgs {
    /// JSON file holding an array of analyses
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
