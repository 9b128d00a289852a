//! Output formatting for CLI commands.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::cli::args::{AnnotextArgs, OutputFormat};
use crate::error::Result;

/// Summary of one annotation layer.
#[derive(Debug, Serialize, Deserialize)]
pub struct LayerSummary {
    pub key: String,
    pub items: usize,
}

/// Result structure for document inspection.
#[derive(Debug, Serialize, Deserialize)]
pub struct InspectResult {
    pub characters: usize,
    pub layers: Vec<LayerSummary>,
    pub tokens_with_analyses: usize,
    pub document_metadata_keys: Vec<String>,
}

/// Result structure for normalization into a file.
#[derive(Debug, Serialize, Deserialize)]
pub struct NormalizeResult {
    pub output: String,
    pub bytes_written: usize,
}

/// Summary of one decoded analysis.
#[derive(Debug, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub kind: String,
    pub lemma: Option<String>,
    pub part_of_speech: Option<String>,
    pub leftover_keys: Vec<String>,
}

/// Result structure for analysis decoding.
#[derive(Debug, Serialize, Deserialize)]
pub struct DecodeAnalysesResult {
    pub count: usize,
    pub analyses: Vec<AnalysisSummary>,
}

/// Types that know how to print themselves for a person.
pub trait HumanOutput {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()>;
}

impl HumanOutput for InspectResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Document:")?;
        writeln!(out, "═════════")?;
        writeln!(out, "Characters: {}", self.characters)?;
        writeln!(out, "Tokens with analyses: {}", self.tokens_with_analyses)?;

        if !self.layers.is_empty() {
            writeln!(out)?;
            writeln!(out, "Layers:")?;
            writeln!(out, "───────")?;
            for layer in &self.layers {
                writeln!(out, "{}: {}", layer.key, layer.items)?;
            }
        }

        if !self.document_metadata_keys.is_empty() {
            writeln!(out)?;
            writeln!(out, "Metadata keys: {}", self.document_metadata_keys.join(", "))?;
        }
        Ok(())
    }
}

impl HumanOutput for NormalizeResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Wrote {} to {}", format_bytes(self.bytes_written), self.output)
    }
}

impl HumanOutput for DecodeAnalysesResult {
    fn write_human(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Analyses: {}", self.count)?;
        for (i, analysis) in self.analyses.iter().enumerate() {
            write!(out, "{:>4}  {:<8}", i, analysis.kind)?;
            write!(out, "  {}", analysis.lemma.as_deref().unwrap_or("-"))?;
            if let Some(pos) = &analysis.part_of_speech {
                write!(out, "/{pos}")?;
            }
            if !analysis.leftover_keys.is_empty() {
                write!(out, "  [{}]", analysis.leftover_keys.join(", "))?;
            }
            writeln!(out)?;
        }
        Ok(())
    }
}

/// Output a result to stdout in the specified format.
pub fn output_result<T: Serialize + HumanOutput>(message: &str, result: &T, args: &AnnotextArgs) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_result(&mut out, message, result, args)
}

/// Output a result to `out` in the specified format.
pub fn write_result<T: Serialize + HumanOutput>(
    out: &mut dyn Write,
    message: &str,
    result: &T,
    args: &AnnotextArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Human => {
            if args.verbosity() > 1 {
                writeln!(out, "{message}")?;
                writeln!(out)?;
            }
            result.write_human(out)?;
        }
        OutputFormat::Json => {
            writeln!(out, "{}", to_json(result, args.pretty)?)?;
        }
    }
    Ok(())
}

/// Serialize a value, pretty-printed when asked to.
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Format bytes in human-readable format.
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
