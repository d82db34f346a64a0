//! Parsed MARC record model
//!
//! A record arrives as MARC-in-JSON content: a leader string plus an ordered
//! array of single-key field objects. Control fields map their tag to a raw
//! string; data fields map it to an object with two indicators and an
//! ordered array of single-key subfield objects.
//!
//! ```json
//! {
//!   "leader": "00714cam a2200205 a 4500",
//!   "fields": [
//!     { "001": "in00000001" },
//!     { "245": { "ind1": "1", "ind2": "0", "subfields": [ { "a": "Title" } ] } }
//!   ]
//! }
//! ```

use serde_json::{Map, Value};

/// A single subfield within a data field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subfield {
    /// Subfield code, usually one character
    pub code: String,
    /// Subfield value
    pub value: String,
}

impl Subfield {
    /// Create a new subfield
    pub fn new(code: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            value: value.into(),
        }
    }
}

/// The payload of a MARC field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldData {
    /// Control field (tags below 010) holding a raw string
    Control(String),
    /// Data field with indicators and ordered subfields
    Data {
        ind1: String,
        ind2: String,
        subfields: Vec<Subfield>,
    },
}

impl FieldData {
    /// Format the field the way it is stored in audit diffs
    ///
    /// Data fields become `ind1 + ind2 + "$code value"...` in source order;
    /// control fields are returned unchanged.
    pub fn formatted(&self) -> String {
        match self {
            FieldData::Control(value) => value.clone(),
            FieldData::Data {
                ind1,
                ind2,
                subfields,
            } => {
                let mut out = String::with_capacity(
                    ind1.len()
                        + ind2.len()
                        + subfields
                            .iter()
                            .map(|s| 1 + s.code.len() + s.value.len())
                            .sum::<usize>(),
                );
                out.push_str(ind1);
                out.push_str(ind2);
                for subfield in subfields {
                    out.push('$');
                    out.push_str(&subfield.code);
                    out.push_str(&subfield.value);
                }
                out
            }
        }
    }
}

/// A tagged field occurrence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarcField {
    pub tag: String,
    pub data: FieldData,
}

impl MarcField {
    /// Create a control field
    pub fn control(tag: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            data: FieldData::Control(value.into()),
        }
    }

    /// Create a data field
    pub fn data(
        tag: impl Into<String>,
        ind1: impl Into<String>,
        ind2: impl Into<String>,
        subfields: Vec<Subfield>,
    ) -> Self {
        Self {
            tag: tag.into(),
            data: FieldData::Data {
                ind1: ind1.into(),
                ind2: ind2.into(),
                subfields,
            },
        }
    }
}

/// The decoded state of a record at one point in time
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedRecordSnapshot {
    /// Record leader, if the content carried one
    pub leader: Option<String>,
    /// Fields in source order; tags may repeat
    pub fields: Vec<MarcField>,
}

impl ParsedRecordSnapshot {
    /// Decode raw record content
    ///
    /// Content may be an already-decoded object or a JSON-encoded string.
    /// Anything else, including a string that does not decode to an object,
    /// yields an empty snapshot.
    pub fn from_content(content: Option<&Value>) -> Self {
        match content {
            Some(Value::Object(obj)) => Self::from_object(obj),
            Some(Value::String(raw)) => match serde_json::from_str::<Value>(raw) {
                Ok(Value::Object(obj)) => Self::from_object(&obj),
                _ => Self::default(),
            },
            _ => Self::default(),
        }
    }

    fn from_object(obj: &Map<String, Value>) -> Self {
        let leader = obj.get("leader").and_then(Value::as_str).map(str::to_string);

        let fields = match obj.get("fields") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(Value::as_object)
                .flat_map(|entry| {
                    entry
                        .iter()
                        .filter_map(|(tag, value)| decode_field(tag, value))
                })
                .collect(),
            _ => Vec::new(),
        };

        Self { leader, fields }
    }
}

fn decode_field(tag: &str, value: &Value) -> Option<MarcField> {
    let data = match value {
        Value::Object(obj) => FieldData::Data {
            ind1: indicator(obj, "ind1"),
            ind2: indicator(obj, "ind2"),
            subfields: decode_subfields(obj.get("subfields")),
        },
        Value::Null | Value::Array(_) => return None,
        scalar => FieldData::Control(scalar_text(scalar)),
    };

    Some(MarcField {
        tag: tag.to_string(),
        data,
    })
}

fn indicator(obj: &Map<String, Value>, key: &str) -> String {
    match obj.get(key) {
        None | Some(Value::Null) => String::new(),
        Some(value) => scalar_text(value),
    }
}

fn decode_subfields(value: Option<&Value>) -> Vec<Subfield> {
    let Some(Value::Array(entries)) = value else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(Value::as_object)
        .flat_map(|entry| {
            entry
                .iter()
                .map(|(code, value)| Subfield::new(code.clone(), scalar_text(value)))
        })
        .collect()
}

/// Strings verbatim, everything else as compact JSON text
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
