//! Entity mapping
//!
//! Assembles the audit entity from the event envelope and a classification.

use super::classifier::ClassifiedEvent;
use super::entry::AuditEntity;
use crate::models::DomainEvent;

/// Build the audit entity for a classified event
///
/// Event id, date and publisher come from the envelope; record id and
/// user come from the classification; the diff is attached unchanged.
pub fn to_audit_entity(event: &DomainEvent, classified: ClassifiedEvent) -> AuditEntity {
    let ClassifiedEvent {
        event_type,
        record,
        diff,
    } = classified;

    AuditEntity::new(
        event.id.clone(),
        event.event_metadata.event_date,
        record.record_id,
        event.event_metadata.published_by.clone(),
        event_type.action(),
        record.user_id,
        diff,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::classifier::{EventType, RecordData};
    use crate::audit::entry::Action;
    use crate::models::{DiffResult, FieldChange};
    use serde_json::json;

    fn envelope(published_by: Option<&str>) -> DomainEvent {
        let mut metadata = json!({ "eventDate": 1_709_288_130_000_i64, "tenantId": "diku" });
        if let Some(publisher) = published_by {
            metadata["publishedBy"] = json!(publisher);
        }
        serde_json::from_value(json!({
            "id": "evt-42",
            "eventType": "SOURCE_RECORD_DELETED",
            "eventMetadata": metadata
        }))
        .unwrap()
    }

    fn classified() -> ClassifiedEvent {
        ClassifiedEvent {
            event_type: EventType::Deleted,
            record: RecordData {
                record_id: "rec-9".into(),
                user_id: Some("user-3".into()),
            },
            diff: DiffResult {
                removed: vec![FieldChange::removed("001", "in9".into())],
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_copies_envelope_and_record_data() {
        let event = envelope(Some("mod-source-record-storage"));
        let entity = to_audit_entity(&event, classified());

        assert_eq!(entity.event_id(), "evt-42");
        assert_eq!(entity.event_date(), event.event_metadata.event_date);
        assert_eq!(entity.entity_id(), "rec-9");
        assert_eq!(entity.origin(), Some("mod-source-record-storage"));
        assert_eq!(entity.action(), Action::Delete);
        assert_eq!(entity.user_id(), Some("user-3"));
        assert_eq!(entity.diff(), &classified().diff);
    }

    #[test]
    fn test_missing_publisher() {
        let entity = to_audit_entity(&envelope(None), classified());
        assert_eq!(entity.origin(), None);
    }
}
