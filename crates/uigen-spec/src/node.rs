//! Component nodes

use crate::value::{PropValue, Properties};
use crate::SpecError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One UI element instance
///
/// # Invariants
/// - `kind` is non-empty
/// - `properties` is always present (possibly empty)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(try_from = "RawNode")]
pub struct ComponentNode {
    /// Component family, drawn from the component registry
    pub kind: String,
    /// Open property bag
    #[serde(default)]
    pub properties: Properties,
    /// Informational only; never read by pipeline logic
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<NodeMetadata>,
}

/// Wire shape of a node before its invariants are checked
#[derive(Deserialize)]
struct RawNode {
    kind: String,
    #[serde(default)]
    properties: Properties,
    #[serde(default)]
    metadata: Option<NodeMetadata>,
}

impl TryFrom<RawNode> for ComponentNode {
    type Error = SpecError;

    fn try_from(raw: RawNode) -> Result<Self, Self::Error> {
        let node = Self {
            kind: raw.kind,
            properties: raw.properties,
            metadata: raw.metadata,
        };
        node.validate()?;
        Ok(node)
    }
}

/// Rationale attached to a node by whoever produced it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NodeMetadata {
    /// Why this kind was chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
    /// Other kinds that were considered
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

impl ComponentNode {
    /// Create a node with no properties
    ///
    /// # Errors
    /// Returns [`SpecError::EmptyKind`] if `kind` is empty or whitespace
    pub fn new(kind: impl Into<String>) -> Result<Self, SpecError> {
        let kind = kind.into();
        if kind.trim().is_empty() {
            return Err(SpecError::EmptyKind);
        }
        Ok(Self {
            kind,
            properties: Properties::new(),
            metadata: None,
        })
    }

    /// With a full property map
    #[inline]
    #[must_use]
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// With a single property
    #[inline]
    #[must_use]
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// With rationale metadata
    #[inline]
    #[must_use]
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.metadata
            .get_or_insert_with(NodeMetadata::default)
            .rationale = Some(rationale.into());
        self
    }

    /// Look up a property
    #[inline]
    #[must_use]
    pub fn prop(&self, key: &str) -> Option<&PropValue> {
        self.properties.get(key)
    }

    /// Text property, if present and a string
    #[inline]
    #[must_use]
    pub fn text(&self, key: &str) -> Option<&str> {
        self.prop(key).and_then(PropValue::as_str)
    }

    /// True when the property is missing or blank text
    #[must_use]
    pub fn lacks_text(&self, key: &str) -> bool {
        match self.prop(key) {
            None => true,
            Some(value) => value.is_blank_text(),
        }
    }

    /// Merge a partial property map, overwriting existing keys
    pub fn merge(&mut self, patch: &Properties) {
        for (key, value) in patch {
            self.properties.insert(key.clone(), value.clone());
        }
    }

    /// Check the node invariants
    ///
    /// # Errors
    /// Returns [`SpecError::EmptyKind`] when the kind is blank
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.kind.trim().is_empty() {
            return Err(SpecError::EmptyKind);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;

    #[test]
    fn empty_kind_rejected() {
        assert!(matches!(ComponentNode::new(""), Err(SpecError::EmptyKind)));
        assert!(matches!(ComponentNode::new("  "), Err(SpecError::EmptyKind)));
    }

    #[test]
    fn empty_kind_rejected_on_load() {
        for json in [r#"{"kind":""}"#, r#"{"kind":"   ","properties":{}}"#] {
            let err = serde_json::from_str::<ComponentNode>(json).unwrap_err();
            assert!(err.to_string().contains("must not be empty"), "{err}");
        }
    }

    #[test]
    fn merge_overwrites_shallowly() {
        let mut node = ComponentNode::new("Card")
            .unwrap()
            .with_prop("title", "Old")
            .with_prop("style", props! { "gap" => "sm", "pad" => "lg" });

        node.merge(&props! { "title" => "New", "style" => props! { "gap" => "md" } });

        assert_eq!(node.text("title"), Some("New"));
        // nested maps are replaced, not deep-merged
        let style = node.prop("style").and_then(PropValue::as_map).unwrap();
        assert_eq!(style.len(), 1);
    }

    #[test]
    fn lacks_text_handles_missing_and_blank() {
        let node = ComponentNode::new("Button")
            .unwrap()
            .with_prop("label", " ")
            .with_prop("icon", "search");
        assert!(node.lacks_text("label"));
        assert!(node.lacks_text("ariaLabel"));
        assert!(!node.lacks_text("icon"));
    }

    #[test]
    fn metadata_is_optional_in_json() {
        let node: ComponentNode = serde_json::from_str(r#"{"kind":"Image"}"#).unwrap();
        assert!(node.properties.is_empty());
        assert!(node.metadata.is_none());
    }
}
