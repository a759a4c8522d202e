//! Generation stage
//!
//! Turns a request into a specification without any model in the loop:
//! keyword classification, a fixed topic table and per-topic templates.
//! Generation always produces something for a classifiable request; the only
//! failures are a modify with nothing to modify, a blank request with no
//! prior state, and a template whose kind the registry does not know.

mod classify;
mod modify;
mod templates;

pub use classify::{classify, topics_in, wants_call_to_action, RequestKind, Topic};
pub use modify::{modifications, Modification};
pub use templates::{call_to_action, container, pricing_table, template, testimonial};

use crate::config::StylePreferences;
use crate::error::GenerationError;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uigen_registry::ComponentRegistry;
use uigen_spec::{Arrangement, ComponentNode, LayoutHints, Specification};

const MAX_NAME_LEN: usize = 60;

/// Input to generation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Request text
    pub text: String,
    /// Explicit intent; skips classification when set
    pub intent: Option<RequestKind>,
}

impl GenerationRequest {
    /// Request to be classified
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            intent: None,
        }
    }

    /// With explicit intent
    #[inline]
    #[must_use]
    pub fn with_intent(mut self, intent: RequestKind) -> Self {
        self.intent = Some(intent);
        self
    }
}

/// The generation stage
#[derive(Debug, Clone)]
pub struct Generator {
    registry: Arc<ComponentRegistry>,
}

impl Generator {
    /// Create a generator over a component registry
    #[must_use]
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self { registry }
    }

    /// Registry in use
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &ComponentRegistry {
        &self.registry
    }

    /// Produce a specification for a request
    ///
    /// # Errors
    /// - [`GenerationError::NoPriorSpecification`] for a modify with no prior specification
    /// - [`GenerationError::UnclassifiedRequest`] for a blank request with no prior specification
    /// - [`GenerationError::InternalFailure`] if a template kind is not registered
    #[instrument(skip_all, fields(request = %request.text))]
    pub fn generate(
        &self,
        request: &GenerationRequest,
        prior: Option<&Specification>,
        preferences: Option<&StylePreferences>,
    ) -> Result<Specification, GenerationError> {
        let kind = match request.intent {
            Some(kind) => kind,
            None => classify(&request.text, prior.is_some())?,
        };
        debug!(?kind, "request classified");

        let spec = match (kind, prior) {
            (RequestKind::Create, _) => self.create(&request.text, preferences)?,
            (RequestKind::Modify, Some(prior)) => self.modify(&request.text, prior, preferences)?,
            (RequestKind::Modify, None) => return Err(GenerationError::NoPriorSpecification),
        };

        info!(
            components = spec.components.len(),
            version = spec.version(),
            "specification generated"
        );
        Ok(spec)
    }

    fn create(
        &self,
        text: &str,
        preferences: Option<&StylePreferences>,
    ) -> Result<Specification, GenerationError> {
        let mut components: Vec<ComponentNode> =
            topics_in(text).into_iter().map(template).collect();

        if components.is_empty() {
            components = vec![container(), call_to_action()];
        } else if wants_call_to_action(text) {
            components.push(call_to_action());
        }

        let mut spec = Specification::new()
            .with_name(spec_name(text))
            .with_description(text.trim())
            .with_layout(LayoutHints {
                arrangement: Arrangement::Stack,
                spacing: Some("md".to_string()),
                max_width: Some(1200),
            });

        for node in components {
            spec.components.push(self.admit(node, preferences)?);
        }
        Ok(spec)
    }

    fn modify(
        &self,
        text: &str,
        prior: &Specification,
        preferences: Option<&StylePreferences>,
    ) -> Result<Specification, GenerationError> {
        let mut spec = prior.revise();

        for edit in modifications(text) {
            match edit {
                Modification::Patch { index, patch } => {
                    if !spec.apply_patch(index, &patch) {
                        debug!(index, "patch target out of range, skipped");
                    }
                }
                Modification::Append(node) => {
                    spec.components.push(self.admit(node, preferences)?);
                }
                Modification::Remove(kind) => {
                    let removed = spec.remove_kind(kind);
                    debug!(kind, removed, "components removed");
                }
            }
        }
        Ok(spec)
    }

    /// Check a template against the registry and apply style preferences
    fn admit(
        &self,
        mut node: ComponentNode,
        preferences: Option<&StylePreferences>,
    ) -> Result<ComponentNode, GenerationError> {
        if !self.registry.contains(&node.kind) {
            return Err(GenerationError::InternalFailure(format!(
                "template kind '{}' is not registered",
                node.kind
            )));
        }

        if let Some(preferences) = preferences {
            for (key, value) in preferences.as_properties() {
                if self.registry.accepts(&node.kind, &key, &value) {
                    node.properties.insert(key, value);
                }
            }
        }
        Ok(node)
    }
}

fn spec_name(text: &str) -> String {
    let text = text.trim();
    if text.chars().count() <= MAX_NAME_LEN {
        return text.to_string();
    }
    let cut: String = text.chars().take(MAX_NAME_LEN).collect();
    format!("{}...", cut.trim_end())
}
