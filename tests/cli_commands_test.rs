use std::fs;

use clap::Parser;
use tempfile::TempDir;

use annotext::cli::args::AnnotextArgs;
use annotext::cli::commands::{decode_analyses_file, execute_command, inspect_document, load_document};
use annotext::error::{AnnotextError, Result};
use annotext::model::AnnotatedText;

const DOCUMENT: &str = r#"{
    "data": "Hello world",
    "attributes": {
        "token": {
            "items": [
                {"startOffset": 0, "endOffset": 5, "text": "Hello",
                 "analyses": [{"lemma": "hello", "partOfSpeech": "INTJ"}]},
                {"startOffset": 6, "endOffset": 11, "text": "world"}
            ]
        },
        "sentence": {"items": [{"startOffset": 0, "endOffset": 11}]}
    },
    "documentMetadata": {"source": ["test"]}
}"#;

fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> Result<std::path::PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, contents)?;
    Ok(path)
}

#[test]
fn inspect_summarizes_layers() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_fixture(&dir, "doc.json", DOCUMENT)?;

    let summary = inspect_document(&load_document(&path)?);
    assert_eq!(summary.characters, 11);
    assert_eq!(summary.tokens_with_analyses, 1);
    assert_eq!(summary.document_metadata_keys, vec!["source".to_string()]);

    let keys: Vec<(&str, usize)> = summary.layers.iter().map(|l| (l.key.as_str(), l.items)).collect();
    assert_eq!(keys, vec![("token", 2), ("sentence", 1)]);
    Ok(())
}

#[test]
fn normalize_writes_a_canonical_document() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_fixture(&dir, "doc.json", DOCUMENT)?;
    let output = dir.path().join("out.json");

    let input_arg = input.display().to_string();
    let output_arg = output.display().to_string();
    let args = AnnotextArgs::try_parse_from([
        "annotext",
        "-q",
        "normalize",
        input_arg.as_str(),
        "--output",
        output_arg.as_str(),
    ])
    .map_err(|e| AnnotextError::invalid_argument(e.to_string()))?;
    execute_command(args)?;

    let written = fs::read_to_string(&output)?;
    let normalized: AnnotatedText = serde_json::from_str(&written)?;
    assert_eq!(normalized, load_document(&input)?);
    assert!(!written.contains('\n'));
    Ok(())
}

#[test]
fn decode_analyses_reports_variants() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_fixture(
        &dir,
        "analyses.json",
        r#"[{"lemma": "a"}, {"lemma": "b", "root": "ktb"}, {"lemma": "c", "gloss": "x"}]"#,
    )?;

    let result = decode_analyses_file(&path)?;
    assert_eq!(result.count, 3);
    let kinds: Vec<&str> = result.analyses.iter().map(|a| a.kind.as_str()).collect();
    assert_eq!(kinds, vec!["generic", "arabic", "arabic"]);
    assert_eq!(result.analyses[2].leftover_keys, vec!["gloss".to_string()]);
    Ok(())
}

#[test]
fn missing_input_reports_the_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.json");

    let err = load_document(&missing).unwrap_err();
    assert!(matches!(err, AnnotextError::Anyhow(_)));
    assert!(err.to_string().contains("nope.json"));
}

#[test]
fn malformed_input_is_a_json_error() -> Result<()> {
    let dir = TempDir::new()?;
    let path = write_fixture(&dir, "bad.json", "{\"data\": ")?;

    assert!(matches!(load_document(&path).unwrap_err(), AnnotextError::Json(_)));
    Ok(())
}

#[test]
fn normalize_refuses_to_overwrite_its_input() -> Result<()> {
    let dir = TempDir::new()?;
    let input = write_fixture(&dir, "doc.json", DOCUMENT)?;
    let input_arg = input.display().to_string();

    let args = AnnotextArgs::try_parse_from(["annotext", "normalize", input_arg.as_str(), "-o", input_arg.as_str()])
        .map_err(|e| AnnotextError::invalid_argument(e.to_string()))?;
    let err = execute_command(args).unwrap_err();

    assert!(matches!(&err, AnnotextError::Other(msg) if msg.starts_with("Invalid argument")));
    assert_eq!(fs::read_to_string(&input)?, DOCUMENT);
    Ok(())
}
