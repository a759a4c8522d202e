//! The UI specification
//!
//! A [`Specification`] is the value threaded through every pipeline stage.
//! `Clone` is a deep copy: nodes, property maps and nested values are all
//! owned, so a clone shares no mutable sub-structure with its source.

use crate::hash::ContentHash;
use crate::node::ComponentNode;
use crate::value::Properties;
use crate::SpecError;
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use ulid::Ulid;

/// Opaque specification identifier (ULID, reissued on every revision)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpecId(pub Ulid);

impl SpecId {
    /// Generate a fresh id
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self(Ulid::new())
    }
}

impl Default for SpecId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SpecId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl JsonSchema for SpecId {
    fn schema_name() -> String {
        "SpecId".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        String::json_schema(gen)
    }
}

/// How components are arranged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Arrangement {
    /// Vertical stack
    #[default]
    Stack,
    /// Responsive grid
    Grid,
    /// Side-by-side columns
    Columns,
}

impl Arrangement {
    /// Stable lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Stack => "stack",
            Self::Grid => "grid",
            Self::Columns => "columns",
        }
    }
}

/// Optional layout hints
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LayoutHints {
    /// Arrangement kind
    pub arrangement: Arrangement,
    /// Spacing token (`sm`, `md`, `lg`, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spacing: Option<String>,
    /// Maximum content width in pixels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_width: Option<u32>,
}

/// Revision bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SpecMetadata {
    /// Starts at 1, incremented on every revision
    pub version: u32,
    /// Id of the specification this one was revised from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_from: Option<SpecId>,
}

impl Default for SpecMetadata {
    fn default() -> Self {
        Self {
            version: 1,
            revised_from: None,
        }
    }
}

/// The full UI being built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Specification {
    /// Reissued on every revision
    pub id: SpecId,
    /// Human-readable name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Components in rendering order
    #[serde(default)]
    pub components: Vec<ComponentNode>,
    /// Layout hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<LayoutHints>,
    /// Version counter
    #[serde(default)]
    pub metadata: SpecMetadata,
}

/// The parts of a specification that define its content
#[derive(Serialize)]
struct ContentView<'a> {
    name: &'a Option<String>,
    description: &'a Option<String>,
    components: &'a [ComponentNode],
    layout: &'a Option<LayoutHints>,
}

impl Specification {
    /// Create an empty version-1 specification
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: SpecId::new(),
            name: None,
            description: None,
            components: Vec::new(),
            layout: None,
            metadata: SpecMetadata::default(),
        }
    }

    /// With name
    #[inline]
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// With description
    #[inline]
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// With layout hints
    #[inline]
    #[must_use]
    pub fn with_layout(mut self, layout: LayoutHints) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Append a component
    #[inline]
    #[must_use]
    pub fn with_component(mut self, node: ComponentNode) -> Self {
        self.components.push(node);
        self
    }

    /// Current version
    #[inline]
    #[must_use]
    pub fn version(&self) -> u32 {
        self.metadata.version
    }

    /// Deep copy with version + 1 and a fresh id
    ///
    /// Every stage that materially changes a specification goes through
    /// this, so the original stays untouched.
    #[must_use]
    pub fn revise(&self) -> Self {
        let mut next = self.clone();
        next.id = SpecId::new();
        next.metadata.version = self.metadata.version.saturating_add(1);
        next.metadata.revised_from = Some(self.id);
        next
    }

    /// Merge a partial property map into the component at `index`
    ///
    /// Keys in `patch` overwrite existing keys. An out-of-range index is a
    /// no-op; the return value tells whether the patch landed.
    pub fn apply_patch(&mut self, index: usize, patch: &Properties) -> bool {
        match self.components.get_mut(index) {
            Some(node) => {
                node.merge(patch);
                true
            }
            None => false,
        }
    }

    /// Remove every component of `kind`, returning how many were removed
    pub fn remove_kind(&mut self, kind: &str) -> usize {
        let before = self.components.len();
        self.components.retain(|node| node.kind != kind);
        before - self.components.len()
    }

    /// Iterate over components of one kind with their positions
    pub fn components_of<'a>(
        &'a self,
        kind: &'a str,
    ) -> impl Iterator<Item = (usize, &'a ComponentNode)> + 'a {
        self.components
            .iter()
            .enumerate()
            .filter(move |(_, node)| node.kind == kind)
    }

    /// True if any component has this kind
    #[inline]
    #[must_use]
    pub fn contains_kind(&self, kind: &str) -> bool {
        self.components.iter().any(|node| node.kind == kind)
    }

    /// Fingerprint of the content (id and version excluded)
    #[must_use]
    pub fn fingerprint(&self) -> ContentHash {
        let view = ContentView {
            name: &self.name,
            description: &self.description,
            components: &self.components,
            layout: &self.layout,
        };
        ContentHash::compute_serializable(&view).unwrap_or_default()
    }

    /// Check every node invariant
    ///
    /// # Errors
    /// Returns the first violated invariant, with the node position
    pub fn validate(&self) -> Result<(), SpecError> {
        if self.metadata.version == 0 {
            return Err(SpecError::ZeroVersion);
        }
        for (index, node) in self.components.iter().enumerate() {
            node.validate()
                .map_err(|e| SpecError::InvalidComponent { index, reason: e.to_string() })?;
        }
        Ok(())
    }
}

impl Default for Specification {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::props;
    use crate::value::PropValue;
    use proptest::prelude::*;

    fn sample() -> Specification {
        Specification::new()
            .with_name("Sample")
            .with_component(
                ComponentNode::new("Card")
                    .unwrap()
                    .with_prop("title", "Hello")
                    .with_prop("tags", vec![PropValue::from("a")]),
            )
            .with_component(ComponentNode::new("Button").unwrap().with_prop("label", "Go"))
    }

    #[test]
    fn new_starts_at_version_one() {
        let spec = Specification::new();
        assert_eq!(spec.version(), 1);
        assert!(spec.metadata.revised_from.is_none());
    }

    #[test]
    fn revise_bumps_version_and_id() {
        let spec = sample();
        let next = spec.revise();
        assert_eq!(next.version(), 2);
        assert_ne!(next.id, spec.id);
        assert_eq!(next.metadata.revised_from, Some(spec.id));
        assert_eq!(next.components, spec.components);
        assert_eq!(next.fingerprint(), spec.fingerprint());
    }

    #[test]
    fn apply_patch_out_of_range_is_noop() {
        let mut spec = sample();
        let before = spec.clone();
        assert!(!spec.apply_patch(7, &props! { "title" => "x" }));
        assert_eq!(spec, before);
    }

    #[test]
    fn apply_patch_merges_into_component() {
        let mut spec = sample();
        assert!(spec.apply_patch(1, &props! { "size" => "lg" }));
        assert_eq!(spec.components[1].text("size"), Some("lg"));
        assert_eq!(spec.components[1].text("label"), Some("Go"));
    }

    #[test]
    fn remove_kind_counts_removed() {
        let mut spec = sample();
        assert_eq!(spec.remove_kind("Card"), 1);
        assert_eq!(spec.components.len(), 1);
        assert_eq!(spec.remove_kind("Card"), 0);
    }

    #[test]
    fn fingerprint_ignores_identity() {
        let a = sample();
        let mut b = a.clone();
        b.id = SpecId::new();
        assert_eq!(a.fingerprint(), b.fingerprint());
        b.components[0].properties.insert("title".into(), "Other".into());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn validate_reports_blank_kind() {
        let mut spec = sample();
        spec.components[1].kind = String::new();
        assert!(matches!(
            spec.validate(),
            Err(SpecError::InvalidComponent { index: 1, .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_clone_is_structurally_independent(title in "[a-z]{1,12}", size in "[a-z]{1,4}") {
            let original = sample();
            let snapshot = original.clone();
            prop_assert_eq!(&original, &snapshot);

            let mut copy = original.clone();
            copy.apply_patch(0, &props! { "title" => title.as_str() });
            if let Some(PropValue::List(tags)) = copy.components[0].properties.get_mut("tags") {
                tags.push(PropValue::from(size.as_str()));
            }
            copy.components.push(ComponentNode::new("Image").unwrap());

            prop_assert_eq!(&original, &snapshot);
        }
    }
}
