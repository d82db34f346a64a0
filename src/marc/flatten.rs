//! Record flattening
//!
//! Turns a decoded record into an ordered tag -> formatted value map. The
//! leader is stored under `LDR`; a repeated tag holds its occurrences as a
//! list in encounter order.

use std::collections::HashMap;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::models::{FieldValue, ParsedRecordSnapshot};

/// Reserved key for the record leader
pub const LEADER_TAG: &str = "LDR";

/// A flattened record, keyed by tag in first-seen order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlattenedRecord {
    entries: Vec<(String, FieldValue)>,
    index: HashMap<String, usize>,
}

impl FlattenedRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of a tag
    ///
    /// The first occurrence is stored as a single value; a second one
    /// promotes it to a list and later ones append to it.
    pub fn push(&mut self, tag: impl Into<String>, formatted: String) {
        let tag = tag.into();
        match self.index.get(&tag).copied() {
            Some(pos) => {
                let slot = &mut self.entries[pos].1;
                *slot = match std::mem::replace(slot, FieldValue::Multiple(Vec::new())) {
                    FieldValue::Single(first) => FieldValue::Multiple(vec![first, formatted]),
                    FieldValue::Multiple(mut values) => {
                        values.push(formatted);
                        FieldValue::Multiple(values)
                    }
                };
            }
            None => {
                self.index.insert(tag.clone(), self.entries.len());
                self.entries.push((tag, FieldValue::Single(formatted)));
            }
        }
    }

    /// Value stored for a tag
    pub fn get(&self, tag: &str) -> Option<&FieldValue> {
        self.index.get(tag).map(|&pos| &self.entries[pos].1)
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.index.contains_key(tag)
    }

    /// Iterate tags and values in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(tag, value)| (tag.as_str(), value))
    }

    /// Number of distinct tags
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for FlattenedRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (tag, value) in &self.entries {
            map.serialize_entry(tag, value)?;
        }
        map.end()
    }
}

/// Flatten a decoded record
pub fn flatten(snapshot: &ParsedRecordSnapshot) -> FlattenedRecord {
    let mut record = FlattenedRecord::new();

    if let Some(leader) = &snapshot.leader {
        record.push(LEADER_TAG, leader.clone());
    }

    for field in &snapshot.fields {
        record.push(field.tag.as_str(), field.data.formatted());
    }

    record
}

/// Flatten raw record content (decoded object or JSON string)
///
/// Absent or malformed content flattens to an empty record.
pub fn flatten_content(content: Option<&Value>) -> FlattenedRecord {
    flatten(&ParsedRecordSnapshot::from_content(content))
}
