//! Application orchestrator.
//! Builds the config from CLI args, initializes logging, constructs the mover,
//! prints the info record, and runs the move unless only info was requested.

use anyhow::{Context, Result};
use tracing::{debug, error};

use batch_mover::cli::Args;
use batch_mover::output as out;
use batch_mover::{BatchMover, BatchMoverError, MoverInfo};

use crate::logging::init_tracing;

fn print_info_record(info: &MoverInfo, json: bool) -> Result<()> {
    if json {
        out::print_user(&serde_json::to_string_pretty(info)?);
    } else {
        out::print_user(&info.to_string());
    }
    Ok(())
}

/// Log a failure with structured code/kind fields when it is one of ours.
fn log_failure(e: &anyhow::Error, stage: &str) {
    if let Some(bm) = e.downcast_ref::<BatchMoverError>() {
        let code = bm.code();
        let kind = bm.kind();
        match bm {
            BatchMoverError::EmptyInput(folder) => {
                error!(code, kind, stage, folder = %folder.display(), "No files to move")
            }
            BatchMoverError::Conflict(path) => {
                error!(code, kind, stage, path = %path.display(), "Destination already exists")
            }
            BatchMoverError::NotFound(path) => {
                error!(code, kind, stage, path = %path.display(), "Work folder not found")
            }
            BatchMoverError::Configuration(msg) => {
                error!(code, kind, stage, %msg, "Invalid configuration")
            }
            BatchMoverError::Io { op, path, .. } => {
                error!(code, kind, stage, %op, path = %path.display(), error = %bm, "I/O failure")
            }
        }
    } else {
        error!(stage, error = ?e, "Run failed");
    }
}

/// Run the CLI application.
pub fn run(args: Args) -> Result<()> {
    let cfg = args.to_config()?;

    // Keep the guard alive until the end of run() so file logs are flushed.
    let _guard = init_tracing(&cfg.log_level, cfg.log_file.as_deref(), args.json)
        .context("Failed to initialize logging")?;

    debug!("Starting batch_mover: {:?}", args);

    let mut mover = BatchMover::new(&cfg).inspect_err(|e| log_failure(e, "init"))?;
    print_info_record(&mover.info(), args.json)?;

    if args.info {
        return Ok(());
    }

    match mover.move_files() {
        Ok(report) => {
            if report.dry_run {
                out::print_info(&format!(
                    "Dry-run: would create {} folder(s) and move {} file(s)",
                    report.folders_created.len(),
                    report.files_moved
                ));
            } else {
                out::print_success("Done!");
            }
            Ok(())
        }
        Err(e) => {
            log_failure(&e, "move");
            let partial = matches!(
                e.downcast_ref::<BatchMoverError>(),
                Some(BatchMoverError::Conflict(_) | BatchMoverError::Io { .. })
            );
            if partial && !cfg.dry_run {
                out::print_warn(
                    "Run aborted; batches completed before the failure were not rolled back.",
                );
            }
            Err(e)
        }
    }
}
