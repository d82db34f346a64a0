//! Event classification
//!
//! Picks the processing branch from the declared event type, then selects
//! the record side, the acting user and the diff for that branch.

use std::fmt;
use std::str::FromStr;

use super::entry::Action;
use crate::error::{AuditError, AuditResult};
use crate::marc::{compute_diff, compute_single_sided_diff, flatten};
use crate::models::{DiffResult, DomainEvent, SourceRecord};

/// Supported source-record event types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Created,
    Updated,
    Deleted,
}

impl EventType {
    /// Wire label of the event type
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Created => "SOURCE_RECORD_CREATED",
            EventType::Updated => "SOURCE_RECORD_UPDATED",
            EventType::Deleted => "SOURCE_RECORD_DELETED",
        }
    }

    /// Audit action recorded for this event type
    pub fn action(&self) -> Action {
        match self {
            EventType::Created => Action::Create,
            EventType::Updated => Action::Update,
            EventType::Deleted => Action::Delete,
        }
    }
}

impl FromStr for EventType {
    type Err = AuditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SOURCE_RECORD_CREATED" => Ok(EventType::Created),
            "SOURCE_RECORD_UPDATED" => Ok(EventType::Updated),
            "SOURCE_RECORD_DELETED" => Ok(EventType::Deleted),
            other => Err(AuditError::UnsupportedEventType(other.to_string())),
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of the audited record and who touched it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordData {
    pub record_id: String,
    pub user_id: Option<String>,
}

/// Result of classifying one event
#[derive(Debug, Clone, PartialEq)]
pub struct ClassifiedEvent {
    pub event_type: EventType,
    pub record: RecordData,
    pub diff: DiffResult,
}

/// Classify an event and compute its diff
///
/// # Errors
///
/// `UnsupportedEventType` for any type other than created/updated/deleted,
/// `MissingRecord` when the payload lacks the side the branch reads, and
/// `Validation` when that side has no id.
pub fn classify(event: &DomainEvent) -> AuditResult<ClassifiedEvent> {
    let event_type: EventType = event.event_type.parse()?;
    let payload = &event.event_payload;

    let (record, diff) = match event_type {
        EventType::Created => {
            let new = required(payload.new_record.as_ref(), event_type, "new")?;
            let diff = compute_single_sided_diff(&flatten(&new.snapshot()), true);
            (record_data(new, new.created_by(), event_type, "new")?, diff)
        }
        EventType::Updated => {
            let new = required(payload.new_record.as_ref(), event_type, "new")?;
            let old = required(payload.old_record.as_ref(), event_type, "old")?;
            let diff = compute_diff(&flatten(&old.snapshot()), &flatten(&new.snapshot()));
            (record_data(new, new.updated_by(), event_type, "new")?, diff)
        }
        EventType::Deleted => {
            let old = required(payload.old_record.as_ref(), event_type, "old")?;
            let diff = compute_single_sided_diff(&flatten(&old.snapshot()), false);
            (record_data(old, old.updated_by(), event_type, "old")?, diff)
        }
    };

    Ok(ClassifiedEvent {
        event_type,
        record,
        diff,
    })
}

fn required<'a>(
    record: Option<&'a SourceRecord>,
    event_type: EventType,
    side: &'static str,
) -> AuditResult<&'a SourceRecord> {
    record.ok_or_else(|| AuditError::MissingRecord {
        event_type: event_type.as_str().to_string(),
        side,
    })
}

fn record_data(
    record: &SourceRecord,
    user_id: Option<&str>,
    event_type: EventType,
    side: &'static str,
) -> AuditResult<RecordData> {
    let record_id = record.id.clone().ok_or_else(|| {
        AuditError::Validation(format!("{} event '{}' record has no id", event_type, side))
    })?;

    Ok(RecordData {
        record_id,
        user_id: user_id.map(str::to_string),
    })
}
