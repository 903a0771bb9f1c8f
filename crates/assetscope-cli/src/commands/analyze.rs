//! Analyze command implementation.

use crate::cli::AnalyzeArgs;
use crate::config::{Config, OutputFormat};
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::repl::{self, Session};
use assetscope_batch::{BatchError, BatchOrchestrator, BatchOutcome};
use assetscope_domain::{SortConfig, SortDirection, SortKey, UploadFile};
use assetscope_sdk::ExtractionClient;
use std::fs;
use std::path::{Path, PathBuf};

/// Execute the analyze command.
pub async fn execute_analyze(args: AnalyzeArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let files = read_files(&args.files)?;

    let endpoint = args
        .endpoint
        .clone()
        .unwrap_or_else(|| config.endpoint.clone());
    let client = ExtractionClient::new(&endpoint, config.request_timeout())?;
    let orchestrator = BatchOrchestrator::new(client, config.batch_config()?);

    if formatter.format() == OutputFormat::Table {
        eprintln!(
            "{}",
            formatter.info(&format!("Processing {} file(s) via {}", files.len(), endpoint))
        );
    }

    let outcome = match orchestrator.process(files).await {
        Ok(outcome) => outcome,
        Err(e) => {
            report_batch_error(&e, formatter);
            return Err(e.into());
        }
    };

    report_skipped(&outcome, formatter);

    let direction = if args.descending {
        SortDirection::Descending
    } else {
        SortDirection::Ascending
    };
    let sort = SortConfig::new(args.sort.unwrap_or(SortKey::AssetId), direction);
    let mut session = Session::new(outcome.assets.clone(), sort);

    if args.interactive {
        return repl::run_repl(&mut session, formatter, config.settings.history_size);
    }

    if formatter.format() == OutputFormat::Json {
        let sorted = session.sorted();
        let counts = session.summary();
        println!("{}", formatter.format_report(&outcome, &sorted, &counts)?);
        return Ok(());
    }

    repl::print_view(&session, formatter)?;
    if formatter.format() == OutputFormat::Table {
        println!(
            "{}",
            formatter.success(&format!("{} asset(s) extracted", outcome.assets.len()))
        );
    }

    Ok(())
}

/// Read the selected paths into upload files, guessing content types
fn read_files(paths: &[PathBuf]) -> Result<Vec<UploadFile>> {
    paths.iter().map(|path| read_file(path)).collect()
}

fn read_file(path: &Path) -> Result<UploadFile> {
    let bytes = fs::read(path)
        .map_err(|e| CliError::InvalidInput(format!("Cannot read {}: {}", path.display(), e)))?;

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let content_type = mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string();

    Ok(UploadFile::new(name, content_type, bytes))
}

/// Print per-file notices that explain a blocking batch error
fn report_batch_error(error: &BatchError, formatter: &Formatter) {
    match error {
        BatchError::NoPdfFiles { rejected } => {
            for file in rejected {
                eprintln!("{}", formatter.warning(&format!("{}: {}", file.name, file.reason)));
            }
        }
        BatchError::NoAssetsFound { failures } => {
            for failure in failures {
                eprintln!("{}", formatter.warning(&failure.reason));
            }
        }
        _ => {}
    }
}

/// Print rejected and failed files from a successful batch
fn report_skipped(outcome: &BatchOutcome, formatter: &Formatter) {
    for file in &outcome.rejected {
        eprintln!(
            "{}",
            formatter.warning(&format!("Skipped {}: {}", file.name, file.reason))
        );
    }
    for failure in &outcome.failures {
        eprintln!("{}", formatter.warning(&failure.reason));
    }
}
