//! Inbound source-record domain events
//!
//! The shape matches what the record storage service publishes for every
//! create, update and delete of a MARC record. Unknown keys are ignored.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::record::ParsedRecordSnapshot;

/// Kind of MARC record an event refers to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    MarcBib,
    MarcAuthority,
    /// Any other record type (holdings, EDIFACT, ...)
    Other(String),
}

impl RecordType {
    /// Wire label of the record type
    pub fn as_str(&self) -> &str {
        match self {
            RecordType::MarcBib => "MARC_BIB",
            RecordType::MarcAuthority => "MARC_AUTHORITY",
            RecordType::Other(label) => label,
        }
    }
}

impl From<String> for RecordType {
    fn from(label: String) -> Self {
        match label.as_str() {
            "MARC_BIB" => RecordType::MarcBib,
            "MARC_AUTHORITY" => RecordType::MarcAuthority,
            _ => RecordType::Other(label),
        }
    }
}

impl From<RecordType> for String {
    fn from(record_type: RecordType) -> Self {
        record_type.as_str().to_string()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Envelope metadata attached by the publisher
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventMetadata {
    #[serde(rename = "eventTTL", default, skip_serializing_if = "Option::is_none")]
    pub event_ttl: Option<i64>,

    /// Module that published the event; becomes the audit origin
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,

    /// Accepts an RFC 3339 string or epoch milliseconds
    #[serde(deserialize_with = "deserialize_event_date")]
    pub event_date: DateTime<Utc>,
}

/// Acting-user metadata on a source record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by_user_id: Option<String>,
}

/// Holder of the raw record content
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedRecord {
    /// MARC-in-JSON, either decoded or as an encoded string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<serde_json::Value>,
}

/// One side (old or new) of a record change
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRecord {
    /// Checked only for the side an event branch actually reads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parsed_record: Option<ParsedRecord>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<RecordMetadata>,
}

impl SourceRecord {
    /// Decode this record's content; absent or malformed content is empty
    pub fn snapshot(&self) -> ParsedRecordSnapshot {
        ParsedRecordSnapshot::from_content(
            self.parsed_record
                .as_ref()
                .and_then(|parsed| parsed.content.as_ref()),
        )
    }

    pub fn created_by(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.created_by_user_id.as_deref())
    }

    pub fn updated_by(&self) -> Option<&str> {
        self.metadata
            .as_ref()
            .and_then(|m| m.updated_by_user_id.as_deref())
    }
}

/// Old and new record states carried by an event
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventPayload {
    #[serde(rename = "new", default, skip_serializing_if = "Option::is_none")]
    pub new_record: Option<SourceRecord>,

    #[serde(rename = "old", default, skip_serializing_if = "Option::is_none")]
    pub old_record: Option<SourceRecord>,
}

/// A source-record domain event
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainEvent {
    /// Event id; the persistence layer deduplicates on it
    pub id: String,

    /// Declared event type, validated by the classifier
    pub event_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<RecordType>,

    pub event_metadata: EventMetadata,

    #[serde(default)]
    pub event_payload: EventPayload,
}

impl DomainEvent {
    /// Record type from the envelope, falling back to either record side
    pub fn effective_record_type(&self) -> Option<&RecordType> {
        self.record_type.as_ref().or_else(|| {
            let payload = &self.event_payload;
            payload
                .new_record
                .as_ref()
                .and_then(|r| r.record_type.as_ref())
                .or_else(|| payload.old_record.as_ref().and_then(|r| r.record_type.as_ref()))
        })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEventDate {
    Millis(i64),
    Text(String),
}

fn deserialize_event_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawEventDate::deserialize(deserializer)? {
        RawEventDate::Millis(millis) => Utc
            .timestamp_millis_opt(millis)
            .single()
            .ok_or_else(|| D::Error::custom(format!("eventDate out of range: {}", millis))),
        RawEventDate::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| D::Error::custom(format!("invalid eventDate '{}': {}", text, e))),
    }
}
