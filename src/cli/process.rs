//! Process CLI command
//!
//! Runs the event pipeline over a JSONL event stream.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use clap::Args;

use crate::config::Settings;
use crate::error::{AuditError, AuditResult};
use crate::services::{EventPipeline, PipelineSummary};

/// Arguments for `process`
#[derive(Args, Debug)]
pub struct ProcessArgs {
    /// Read events from this file instead of stdin
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Write audit entities to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Abort on the first event that cannot be audited
    #[arg(long)]
    pub strict: bool,
}

/// Handle the process command
pub fn handle_process_command(settings: &Settings, args: ProcessArgs) -> AuditResult<()> {
    let mut settings = settings.clone();
    if args.strict {
        settings.skip_unsupported_events = false;
    }
    let pipeline = EventPipeline::new(&settings);

    let summary = match (&args.input, &args.output) {
        (Some(input), Some(output)) => {
            pipeline.run(BufReader::new(open(input)?), BufWriter::new(create(output)?))?
        }
        (Some(input), None) => {
            pipeline.run(BufReader::new(open(input)?), BufWriter::new(io::stdout().lock()))?
        }
        (None, Some(output)) => pipeline.run(io::stdin().lock(), BufWriter::new(create(output)?))?,
        (None, None) => pipeline.run(io::stdin().lock(), BufWriter::new(io::stdout().lock()))?,
    };

    report(&summary);
    Ok(())
}

fn open(path: &Path) -> AuditResult<File> {
    File::open(path)
        .map_err(|e| AuditError::Io(format!("Failed to open {}: {}", path.display(), e)))
}

fn create(path: &Path) -> AuditResult<File> {
    File::create(path)
        .map_err(|e| AuditError::Io(format!("Failed to create {}: {}", path.display(), e)))
}

/// Summary goes to stderr; stdout may be carrying entities
fn report(summary: &PipelineSummary) {
    eprintln!(
        "Processed events: {} written, {} skipped, {} rejected",
        summary.written, summary.skipped, summary.rejected
    );
    for (line, reason) in &summary.rejections {
        eprintln!("  line {}: {}", line, reason);
    }
}
