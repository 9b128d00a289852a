//! Command implementations for the annotext CLI.

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::info;

use crate::cli::args::*;
use crate::cli::output::*;
use crate::codec::{MorphoAnalysisListCodec, StandardShapes};
use crate::error::{AnnotextError, Result};
use crate::model::{AnnotatedText, BaseAttribute, MorphoAnalysis};

/// Execute a CLI command.
pub fn execute_command(args: AnnotextArgs) -> Result<()> {
    match &args.command {
        Command::Inspect(inspect_args) => inspect(inspect_args, &args),
        Command::Normalize(normalize_args) => normalize(normalize_args, &args),
        Command::DecodeAnalyses(decode_args) => decode(decode_args, &args),
    }
}

fn read_file(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
    info!("read {} bytes from {}", text.len(), path.display());
    Ok(text)
}

/// Load an annotated-text document from a JSON file.
pub fn load_document(path: &Path) -> Result<AnnotatedText> {
    let text = read_file(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Summarize the layers of a document.
pub fn inspect_document(document: &AnnotatedText) -> InspectResult {
    let layers = document
        .attributes()
        .iter()
        .map(|(key, layer)| LayerSummary {
            key: key.to_string(),
            items: layer.item_count(),
        })
        .collect();

    let tokens_with_analyses = document
        .tokens()
        .map(|tokens| tokens.iter().filter(|token| !token.analyses().is_empty()).count())
        .unwrap_or(0);

    InspectResult {
        characters: document.len(),
        layers,
        tokens_with_analyses,
        document_metadata_keys: document.document_metadata().keys().cloned().collect(),
    }
}

/// Decode an analysis array from a JSON file.
pub fn decode_analyses_file(path: &Path) -> Result<DecodeAnalysesResult> {
    let codec = MorphoAnalysisListCodec::new().bind(&StandardShapes)?;
    let analyses = codec.decode_str(&read_file(path)?)?;

    Ok(DecodeAnalysesResult {
        count: analyses.len(),
        analyses: analyses.iter().map(summarize).collect(),
    })
}

fn summarize(analysis: &MorphoAnalysis) -> AnalysisSummary {
    AnalysisSummary {
        kind: analysis.kind().to_string(),
        lemma: analysis.lemma().map(str::to_string),
        part_of_speech: analysis.part_of_speech().map(str::to_string),
        leftover_keys: analysis.extended_properties().keys().cloned().collect(),
    }
}

fn inspect(args: &InspectArgs, cli_args: &AnnotextArgs) -> Result<()> {
    let document = load_document(&args.file)?;
    let result = inspect_document(&document);
    output_result(&format!("Inspected {}", args.file.display()), &result, cli_args)
}

fn normalize(args: &NormalizeArgs, cli_args: &AnnotextArgs) -> Result<()> {
    if args.output.as_deref() == Some(args.file.as_path()) {
        return Err(AnnotextError::invalid_argument(format!(
            "output {} would overwrite the input document",
            args.file.display()
        )));
    }
    let document = load_document(&args.file)?;
    let json = to_json(&document, cli_args.pretty)?;

    match &args.output {
        Some(output) => {
            fs::write(output, &json).with_context(|| format!("failed to write {}", output.display()))?;
            info!(
                "normalized {} ({} layers) into {}",
                args.file.display(),
                document.attributes().len(),
                output.display()
            );
            output_result(
                "Document normalized",
                &NormalizeResult {
                    output: output.to_string_lossy().to_string(),
                    bytes_written: json.len(),
                },
                cli_args,
            )
        }
        None => {
            println!("{json}");
            Ok(())
        }
    }
}

fn decode(args: &DecodeAnalysesArgs, cli_args: &AnnotextArgs) -> Result<()> {
    let result = decode_analyses_file(&args.file)?;
    if let Some(first) = result.analyses.iter().find(|a| a.kind != "generic") {
        info!("analysis array uses the {} shape", first.kind);
    }
    output_result(&format!("Decoded {}", args.file.display()), &result, cli_args)
}

