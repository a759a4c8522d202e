//! Conversation context
//!
//! Owned by exactly one orchestrator. Two conversations never share a
//! context, so no locking is needed.

use crate::config::StylePreferences;
use serde::{Deserialize, Serialize};
use uigen_spec::{MessageLog, PipelineMessage, Specification};
use uuid::Uuid;

/// Conversation identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub Uuid);

impl ConversationId {
    /// Generate a fresh id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConversationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// State carried across requests in one conversation
#[derive(Debug, Clone, Default)]
pub struct ConversationContext {
    id: ConversationId,
    current: Option<Specification>,
    history: MessageLog,
    preferences: Option<StylePreferences>,
}

impl ConversationContext {
    /// Fresh context with a new id
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh context carrying initial preferences
    #[must_use]
    pub fn with_preferences(preferences: Option<StylePreferences>) -> Self {
        Self {
            preferences,
            ..Self::default()
        }
    }

    /// Conversation id
    #[inline]
    #[must_use]
    pub fn id(&self) -> ConversationId {
        self.id
    }

    /// Current specification
    #[inline]
    #[must_use]
    pub fn current(&self) -> Option<&Specification> {
        self.current.as_ref()
    }

    /// Replace the current specification
    pub fn set_current(&mut self, spec: Specification) {
        self.current = Some(spec);
    }

    /// Message history
    #[inline]
    #[must_use]
    pub fn history(&self) -> &MessageLog {
        &self.history
    }

    /// Append a message
    pub fn record(&mut self, message: PipelineMessage) {
        self.history.push(message);
    }

    /// Style preferences
    #[inline]
    #[must_use]
    pub fn preferences(&self) -> Option<&StylePreferences> {
        self.preferences.as_ref()
    }

    /// Replace style preferences
    pub fn set_preferences(&mut self, preferences: Option<StylePreferences>) {
        self.preferences = preferences;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uigen_spec::Role;

    #[test]
    fn fresh_contexts_differ() {
        let a = ConversationContext::new();
        let b = ConversationContext::new();
        assert_ne!(a.id(), b.id());
        assert!(a.current().is_none());
        assert!(a.history().is_empty());
    }

    #[test]
    fn records_messages_in_order() {
        let mut ctx = ConversationContext::new();
        ctx.record(PipelineMessage::new(Role::User, Role::Orchestrator, "request", serde_json::json!({})));
        ctx.record(PipelineMessage::new(Role::Orchestrator, Role::Generator, "generate", serde_json::json!({})));
        assert_eq!(ctx.history().len(), 2);
        assert_eq!(ctx.history().last().unwrap().action, "generate");
    }
}
