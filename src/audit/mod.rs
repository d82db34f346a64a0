//! Audit entity production for marc-audit
//!
//! Turns one source-record domain event into one audit entity.
//!
//! # Architecture
//!
//! - `classify`: validates the event type, picks the old/new record and the
//!   acting user, and runs the MARC diff for that branch.
//! - `to_audit_entity`: assembles the `AuditEntity` from the event envelope
//!   and the classification.
//! - `AuditEntity`: the immutable unit handed to persistence.
//!
//! Everything here is pure. Replaying an event yields an identical entity,
//! so retrying after a downstream failure is always safe.
//!
//! # Example
//!
//! ```rust,ignore
//! use marc_audit::audit::process_event;
//!
//! let event: DomainEvent = serde_json::from_str(&line)?;
//! let entity = process_event(&event)?;
//! println!("{}", serde_json::to_string(&entity)?);
//! ```

mod classifier;
mod entry;
mod mapper;

pub use classifier::{classify, ClassifiedEvent, EventType, RecordData};
pub use entry::{Action, AuditEntity};
pub use mapper::to_audit_entity;

use crate::error::AuditResult;
use crate::models::DomainEvent;

/// Classify an event and build its audit entity
pub fn process_event(event: &DomainEvent) -> AuditResult<AuditEntity> {
    let classified = classify(event)?;
    Ok(to_audit_entity(event, classified))
}
