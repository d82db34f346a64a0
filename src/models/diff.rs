//! Diff wire types
//!
//! These types define the `diff` object stored with every audit entity and
//! later surfaced verbatim by the read API, so their JSON shape is a
//! contract: empty categories and absent values are omitted, and a value is
//! a bare string unless the field repeats.

use serde::{Deserialize, Serialize};

/// A formatted field value: one occurrence or several, in record order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Single(String),
    Multiple(Vec<String>),
}

impl FieldValue {
    /// Collapse a list of occurrences: none yields `None`, one yields `Single`
    pub fn from_vec(mut values: Vec<String>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(FieldValue::Single),
            _ => Some(FieldValue::Multiple(values)),
        }
    }

    /// View the value as an ordered list of occurrences
    pub fn as_slice(&self) -> &[String] {
        match self {
            FieldValue::Single(value) => std::slice::from_ref(value),
            FieldValue::Multiple(values) => values,
        }
    }

    /// Number of occurrences
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// A `FieldValue` never holds zero occurrences when built by the flattener
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Single(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Single(value)
    }
}

/// A change to one tag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    /// The MARC tag, or `LDR` for the leader
    pub field: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<FieldValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<FieldValue>,
}

impl FieldChange {
    /// A tag that only exists on the new side
    pub fn added(field: impl Into<String>, new_value: FieldValue) -> Self {
        Self {
            field: field.into(),
            old_value: None,
            new_value: Some(new_value),
        }
    }

    /// A tag that only exists on the old side
    pub fn removed(field: impl Into<String>, old_value: FieldValue) -> Self {
        Self {
            field: field.into(),
            old_value: Some(old_value),
            new_value: None,
        }
    }

    /// A tag present on both sides with differing values
    pub fn modified(
        field: impl Into<String>,
        old_value: Option<FieldValue>,
        new_value: Option<FieldValue>,
    ) -> Self {
        debug_assert!(
            old_value.is_some() || new_value.is_some(),
            "a field change needs at least one side"
        );
        Self {
            field: field.into(),
            old_value,
            new_value,
        }
    }
}

/// Categorized changes between two record states
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffResult {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub added: Vec<FieldChange>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub removed: Vec<FieldChange>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modified: Vec<FieldChange>,
}

impl DiffResult {
    /// True when no category holds a change
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.modified.is_empty()
    }
}
