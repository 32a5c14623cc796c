//! The `export` command: load a snapshot, run the engine, write the
//! module, report to stderr.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use ctygen_core::SnapshotCatalog;
use ctygen_export::{ExportOptions, ExportReport, OnUnresolved, export};

use crate::cli::OutputFormat;

pub struct ExportArgs {
    pub patterns: Vec<String>,
    pub catalog: PathBuf,
    pub on_unresolved: OnUnresolved,
    pub prefix: String,
    pub follow_deps: bool,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
}

/// What an export run produced: the payload to write and the report.
#[derive(Debug)]
pub struct Outcome {
    pub payload: String,
    pub report: ExportReport,
}

pub fn run(args: ExportArgs) {
    let outcome = execute(&args).unwrap_or_else(|msg| {
        eprintln!("error: {msg}");
        std::process::exit(1);
    });

    if let Some(ref path) = args.output {
        fs::write(path, &outcome.payload).unwrap_or_else(|e| {
            eprintln!("error: failed to write {}: {}", path.display(), e);
            std::process::exit(1);
        });
    } else {
        io::stdout()
            .write_all(outcome.payload.as_bytes())
            .expect("failed to write stdout");
    }

    // In json format the report travels inside the payload.
    if args.format == OutputFormat::Text {
        eprint!("{}", outcome.report.render());
    }
}

/// Everything `run` does short of writing and exiting, so it can be
/// exercised directly.
pub fn execute(args: &ExportArgs) -> Result<Outcome, String> {
    let catalog = SnapshotCatalog::load(&args.catalog)
        .map_err(|e| format!("{}: {e}", args.catalog.display()))?;

    let options = ExportOptions {
        on_unresolved: args.on_unresolved,
        follow_deps: args.follow_deps,
        prefix: args.prefix.clone(),
    };
    let export = export(&catalog, &args.patterns, &options).map_err(|e| e.to_string())?;

    let payload = match args.format {
        OutputFormat::Text => export.module(),
        OutputFormat::Json => {
            let doc = serde_json::json!({
                "module": export.module(),
                "report": &export.report,
            });
            let mut text = serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?;
            text.push('\n');
            text
        }
    };

    Ok(Outcome {
        payload,
        report: export.report,
    })
}
