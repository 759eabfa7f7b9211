//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::error::{CliError, Result};
use crate::ingest::{read_document, read_ner, Declared};
use crate::output::Formatter;
use provenant_report::{Analyzer, BatchItem};
use tracing::warn;

/// Execute the analyze command.
///
/// Files that cannot be read are reported and skipped; the rest are
/// analyzed as one batch. Fails when any file was skipped.
pub fn execute_analyze(args: AnalyzeArgs, analyzer: &Analyzer, formatter: &Formatter) -> Result<()> {
    let ner = args.ner.as_deref().map(read_ner).transpose()?;
    let declared = Declared {
        license: args.license,
        document_type: args.doc_type,
    };

    let mut items = Vec::with_capacity(args.files.len());
    let mut failures = Vec::new();
    for path in &args.files {
        match read_document(path, &declared) {
            Ok(document) => {
                let item = BatchItem::new(document);
                items.push(match &ner {
                    Some(entities) => item.with_ner(entities.clone()),
                    None => item,
                });
            }
            Err(e) => {
                warn!("Skipping {}: {}", path.display(), e);
                failures.push((path.display().to_string(), e.to_string()));
            }
        }
    }

    let mut outcome = analyzer.analyze_batch(&items);
    for (document, reason) in failures {
        eprintln!("{}", formatter.error(&format!("{}: {}", document, reason)));
        outcome.summary.record_failure(document, reason);
    }

    if !outcome.reports.is_empty() {
        println!("{}", formatter.format_reports(&outcome.reports)?);
    }
    eprintln!("{}", formatter.format_summary(&outcome.summary));

    if outcome.summary.has_failures() {
        return Err(CliError::AnalysisFailed(outcome.summary.failures.len()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::CliFormat;
    use provenant_report::EngineConfig;
    use std::fs;
    use tempfile::TempDir;

    fn setup() -> (Analyzer, Formatter) {
        (
            Analyzer::new(EngineConfig::default()).unwrap(),
            Formatter::new(CliFormat::Json, false),
        )
    }

    fn args(files: Vec<std::path::PathBuf>) -> AnalyzeArgs {
        AnalyzeArgs {
            files,
            license: None,
            doc_type: None,
            ner: None,
        }
    }

    #[test]
    fn test_analyze_text_files() {
        let (analyzer, formatter) = setup();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "Field notes on reef health.").unwrap();

        assert!(execute_analyze(args(vec![path]), &analyzer, &formatter).is_ok());
    }

    #[test]
    fn test_bad_file_does_not_stop_others() {
        let (analyzer, formatter) = setup();
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("notes.txt");
        fs::write(&good, "Field notes on reef health.").unwrap();
        let bad = dir.path().join("scan.pdf");
        fs::write(&bad, b"%PDF").unwrap();
        let missing = dir.path().join("missing.md");

        let err = execute_analyze(args(vec![good, bad, missing]), &analyzer, &formatter)
            .unwrap_err();
        assert!(matches!(err, CliError::AnalysisFailed(2)));
    }

    #[test]
    fn test_unreadable_ner_file_fails_early() {
        let (analyzer, formatter) = setup();
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, "Field notes").unwrap();
        let ner = dir.path().join("ner.json");
        fs::write(&ner, "not json").unwrap();

        let mut args = args(vec![path]);
        args.ner = Some(ner);
        let err = execute_analyze(args, &analyzer, &formatter).unwrap_err();
        assert!(matches!(err, CliError::Serialization(_)));
    }
}
