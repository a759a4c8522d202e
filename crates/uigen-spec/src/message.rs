//! Inter-stage messages
//!
//! Every stage transition appends one [`PipelineMessage`] to the
//! conversation's [`MessageLog`]. Entries are never mutated or removed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Participant in the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The person typing requests
    User,
    /// Sequencer
    Orchestrator,
    /// Generation stage
    Generator,
    /// Critique stage
    Critic,
    /// Validation stage
    Validator,
    /// Export stage
    Exporter,
}

/// Unique message identifier (ULID, sortable by creation)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MessageId(pub Ulid);

impl MessageId {
    /// Generate a new id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One inter-stage event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineMessage {
    /// Identifier
    pub id: MessageId,
    /// Sender
    pub from: Role,
    /// Receiver
    pub to: Role,
    /// Action tag (`generate`, `critique`, ...)
    pub action: String,
    /// Opaque payload
    pub payload: serde_json::Value,
    /// Creation time
    pub timestamp: DateTime<Utc>,
}

impl PipelineMessage {
    /// Create a message stamped now
    #[must_use]
    pub fn new(from: Role, to: Role, action: impl Into<String>, payload: serde_json::Value) -> Self {
        Self {
            id: MessageId::new(),
            from,
            to,
            action: action.into(),
            payload,
            timestamp: Utc::now(),
        }
    }
}

/// Append-only message history
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<PipelineMessage>,
}

impl MessageLog {
    /// Empty log
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message, returning its id
    pub fn push(&mut self, message: PipelineMessage) -> MessageId {
        let id = message.id;
        self.entries.push(message);
        id
    }

    /// Number of messages
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was logged
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Messages appended at or after position `from`
    #[must_use]
    pub fn since(&self, from: usize) -> &[PipelineMessage] {
        self.entries.get(from..).unwrap_or(&[])
    }

    /// Most recent message
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&PipelineMessage> {
        self.entries.last()
    }

    /// Iterate in append order
    pub fn iter(&self) -> impl Iterator<Item = &PipelineMessage> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn log_appends_in_order() {
        let mut log = MessageLog::new();
        let first = log.push(PipelineMessage::new(
            Role::Orchestrator,
            Role::Generator,
            "generate",
            json!({ "request": "pricing" }),
        ));
        log.push(PipelineMessage::new(
            Role::Orchestrator,
            Role::Validator,
            "validate",
            json!(null),
        ));

        assert_eq!(log.len(), 2);
        assert_eq!(log.iter().next().map(|m| m.id), Some(first));
        assert_eq!(log.last().map(|m| m.action.as_str()), Some("validate"));
    }

    #[test]
    fn since_handles_out_of_range() {
        let mut log = MessageLog::new();
        log.push(PipelineMessage::new(Role::User, Role::Orchestrator, "request", json!("x")));
        assert_eq!(log.since(0).len(), 1);
        assert_eq!(log.since(1).len(), 0);
        assert_eq!(log.since(5).len(), 0);
    }

    #[test]
    fn message_ids_are_unique() {
        let a = MessageId::new();
        let b = MessageId::new();
        assert_ne!(a, b);
    }
}
