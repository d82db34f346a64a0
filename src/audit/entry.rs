//! Audit entity data structures
//!
//! Defines the action labels and the entity handed to persistence for
//! every processed record event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::DiffResult;

/// What happened to the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Action {
    /// Record was created
    Create,
    /// Record was updated
    Update,
    /// Record was deleted
    Delete,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Create => write!(f, "CREATE"),
            Action::Update => write!(f, "UPDATE"),
            Action::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit entity
///
/// Built once per event by the entity mapper and never changed afterwards;
/// fields are read through accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntity {
    event_id: String,
    event_date: DateTime<Utc>,
    /// Id of the audited record
    entity_id: String,
    /// Publisher of the event
    origin: Option<String>,
    action: Action,
    /// Acting user; `null` when the record metadata doesn't name one
    user_id: Option<String>,
    diff: DiffResult,
}

impl AuditEntity {
    pub(crate) fn new(
        event_id: String,
        event_date: DateTime<Utc>,
        entity_id: String,
        origin: Option<String>,
        action: Action,
        user_id: Option<String>,
        diff: DiffResult,
    ) -> Self {
        Self {
            event_id,
            event_date,
            entity_id,
            origin,
            action,
            user_id,
            diff,
        }
    }

    pub fn event_id(&self) -> &str {
        &self.event_id
    }

    pub fn event_date(&self) -> DateTime<Utc> {
        self.event_date
    }

    pub fn entity_id(&self) -> &str {
        &self.entity_id
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn diff(&self) -> &DiffResult {
        &self.diff
    }

    /// One-line description for logs
    pub fn summary(&self) -> String {
        let mut output = format!(
            "[{}] {} {} (event {})",
            self.event_date.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action,
            self.entity_id,
            self.event_id
        );

        if let Some(user) = &self.user_id {
            output.push_str(&format!(" by {}", user));
        }

        output.push_str(&format!(
            ": +{} -{} ~{}",
            self.diff.added.len(),
            self.diff.removed.len(),
            self.diff.modified.len()
        ));

        output
    }
}
