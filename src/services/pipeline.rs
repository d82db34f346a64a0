//! Event pipeline service
//!
//! Drives the audit core over a stream of line-delimited JSON events and
//! writes one audit entity per accepted event.

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use super::writer::AuditWriter;
use crate::audit::{process_event, AuditEntity, EventType};
use crate::config::Settings;
use crate::error::{AuditError, AuditResult};
use crate::models::{DomainEvent, RecordType};

/// What happened to a single input line
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// An audit entity was produced
    Written(AuditEntity),
    /// The record type is not audited
    Skipped(RecordType),
    /// The event could not be audited
    Rejected(String),
}

/// Totals for a pipeline run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PipelineSummary {
    /// Number of audit entities written
    pub written: usize,
    /// Number of events for record types that aren't audited
    pub skipped: usize,
    /// Number of rejected events
    pub rejected: usize,
    /// Rejection reasons by 1-based line number
    pub rejections: Vec<(usize, String)>,
}

/// Service that turns an event stream into an audit entity stream
pub struct EventPipeline<'a> {
    settings: &'a Settings,
}

impl<'a> EventPipeline<'a> {
    /// Create a new pipeline
    pub fn new(settings: &'a Settings) -> Self {
        Self { settings }
    }

    /// Process a single JSON-encoded event
    ///
    /// # Errors
    ///
    /// With `skip_unsupported_events` off, an undecodable or invalid event
    /// is returned as an error instead of a `Rejected` outcome.
    pub fn process_line(&self, line: &str) -> AuditResult<EventOutcome> {
        let result = serde_json::from_str::<DomainEvent>(line)
            .map_err(AuditError::from)
            .and_then(|event| self.process(&event));

        self.settle(result)
    }

    /// Process a decoded event
    ///
    /// The event type is checked before the record-type filter, so an
    /// unsupported event is rejected even for a record type that isn't
    /// audited.
    pub fn process(&self, event: &DomainEvent) -> AuditResult<EventOutcome> {
        event.event_type.parse::<EventType>()?;

        if let Some(record_type) = event.effective_record_type() {
            if !self.settings.audits(Some(record_type)) {
                return Ok(EventOutcome::Skipped(record_type.clone()));
            }
        }

        Ok(EventOutcome::Written(process_event(event)?))
    }

    /// Turn a per-event failure into `Rejected` unless running strict
    fn settle(&self, result: AuditResult<EventOutcome>) -> AuditResult<EventOutcome> {
        match result {
            Ok(outcome) => Ok(outcome),
            Err(e) if self.settings.skip_unsupported_events && !e.is_retryable() => {
                Ok(EventOutcome::Rejected(e.to_string()))
            }
            Err(e) => Err(e),
        }
    }

    /// Run the pipeline from `input` to `output`
    ///
    /// Blank lines are ignored. A line that is not valid UTF-8 is handled
    /// like any other undecodable event.
    pub fn run<R: BufRead, W: Write>(&self, input: R, output: W) -> AuditResult<PipelineSummary> {
        let mut writer = AuditWriter::new(output);
        let mut summary = PipelineSummary::default();

        for (idx, raw) in input.split(b'\n').enumerate() {
            let line_number = idx + 1;
            let bytes = raw.map_err(|e| {
                AuditError::Io(format!("Failed to read event line {}: {}", line_number, e))
            })?;
            let bytes = bytes.strip_suffix(b"\r").unwrap_or(&bytes);

            let outcome = match std::str::from_utf8(bytes) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.process_line(line)?,
                Err(e) => self.settle(Err(AuditError::Validation(format!(
                    "Event line is not valid UTF-8: {}",
                    e
                ))))?,
            };

            match outcome {
                EventOutcome::Written(entity) => {
                    debug!(line = line_number, "{}", entity.summary());
                    writer.write(&entity)?;
                    summary.written += 1;
                }
                EventOutcome::Skipped(record_type) => {
                    debug!(line = line_number, %record_type, "record type not audited");
                    summary.skipped += 1;
                }
                EventOutcome::Rejected(reason) => {
                    warn!(line = line_number, %reason, "event rejected");
                    summary.rejected += 1;
                    summary.rejections.push((line_number, reason));
                }
            }
        }

        writer.finish()?;

        info!(
            written = summary.written,
            skipped = summary.skipped,
            rejected = summary.rejected,
            "event stream processed"
        );

        Ok(summary)
    }
}
