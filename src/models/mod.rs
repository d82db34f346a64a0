//! Core data models for marc-audit
//!
//! This module contains the data structures on both sides of the diff
//! engine: inbound record events, decoded MARC records, and the diff types
//! stored with each audit entity.

pub mod diff;
pub mod event;
pub mod record;

pub use diff::{DiffResult, FieldChange, FieldValue};
pub use event::{
    DomainEvent, EventMetadata, EventPayload, ParsedRecord, RecordMetadata, RecordType,
    SourceRecord,
};
pub use record::{FieldData, MarcField, ParsedRecordSnapshot, Subfield};
