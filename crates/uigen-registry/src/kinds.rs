//! Component kind registry
//!
//! Provides [`ComponentRegistry`], the read-only catalog of component kinds
//! the pipeline may emit. Generation consults it so it never invents kinds;
//! validation uses [`ComponentRegistry::conformance`] to flag properties a
//! kind does not declare.

use indexmap::IndexMap;
use uigen_spec::{ComponentNode, PropValue};

/// Allowed shape of a property value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropShape {
    /// Text
    Text,
    /// Number
    Number,
    /// Boolean flag
    Flag,
    /// List of anything
    List,
    /// Nested map
    Map,
    /// Anything goes
    Any,
    /// Text drawn from a closed set
    OneOf(Vec<String>),
}

impl PropShape {
    /// Closed text set from string slices
    #[must_use]
    pub fn one_of(values: &[&str]) -> Self {
        Self::OneOf(values.iter().map(|v| (*v).to_string()).collect())
    }

    /// The allowed-shape predicate
    #[must_use]
    pub fn accepts(&self, value: &PropValue) -> bool {
        match (self, value) {
            (Self::Any, _)
            | (Self::Text, PropValue::Text(_))
            | (Self::Number, PropValue::Number(_))
            | (Self::Flag, PropValue::Flag(_))
            | (Self::List, PropValue::List(_))
            | (Self::Map, PropValue::Map(_)) => true,
            (Self::OneOf(allowed), PropValue::Text(s)) => allowed.iter().any(|a| a == s),
            _ => false,
        }
    }

    /// Human-readable description
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            Self::Text => "text".to_string(),
            Self::Number => "number".to_string(),
            Self::Flag => "flag".to_string(),
            Self::List => "list".to_string(),
            Self::Map => "map".to_string(),
            Self::Any => "any".to_string(),
            Self::OneOf(allowed) => format!("one of [{}]", allowed.join(", ")),
        }
    }
}

/// Declared properties of one component kind
#[derive(Debug, Clone)]
pub struct KindSchema {
    kind: String,
    properties: IndexMap<String, PropShape>,
}

impl KindSchema {
    /// Schema with the properties every kind shares
    #[must_use]
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            properties: IndexMap::new(),
        }
        .prop("variant", PropShape::Text)
        .prop("size", PropShape::one_of(&["xs", "sm", "md", "lg", "xl"]))
        .prop("theme", PropShape::one_of(&["light", "dark"]))
        .prop("color", PropShape::Text)
        .prop("background", PropShape::Text)
        .prop("ariaLabel", PropShape::Text)
    }

    /// Declare a property
    #[inline]
    #[must_use]
    pub fn prop(mut self, name: impl Into<String>, shape: PropShape) -> Self {
        self.properties.insert(name.into(), shape);
        self
    }

    /// Kind identifier
    #[inline]
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Declared property names in declaration order
    pub fn property_names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    /// Shape of a declared property
    #[inline]
    #[must_use]
    pub fn shape(&self, property: &str) -> Option<&PropShape> {
        self.properties.get(property)
    }

    /// True if `property` is declared and `value` has the allowed shape
    #[must_use]
    pub fn accepts(&self, property: &str, value: &PropValue) -> bool {
        self.shape(property).is_some_and(|shape| shape.accepts(value))
    }
}

/// A node that does not conform to its kind's schema
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaIssue {
    /// Kind is not registered
    #[error("unknown component kind '{0}'")]
    UnknownKind(String),

    /// Property is not declared by the kind
    #[error("'{kind}' does not declare property '{property}'")]
    UnknownProperty { kind: String, property: String },

    /// Property value has the wrong shape
    #[error("property '{property}' expects {expected}, got {actual}")]
    WrongShape {
        property: String,
        expected: String,
        actual: &'static str,
    },
}

/// Catalog of component kinds
#[derive(Debug, Clone, Default)]
pub struct ComponentRegistry {
    kinds: IndexMap<String, KindSchema>,
}

impl ComponentRegistry {
    /// Create empty registry
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in kinds
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();

        registry.register(
            KindSchema::new("Container")
                .prop("layout", PropShape::one_of(&["stack", "grid", "columns"]))
                .prop("padding", PropShape::Text)
                .prop("heading", PropShape::Text)
                .prop("children", PropShape::List),
        );
        registry.register(
            KindSchema::new("Button")
                .prop("label", PropShape::Text)
                .prop("icon", PropShape::Text)
                .prop("href", PropShape::Text)
                .prop("disabled", PropShape::Flag),
        );
        registry.register(
            KindSchema::new("Card")
                .prop("title", PropShape::Text)
                .prop("description", PropShape::Text)
                .prop("image", PropShape::Text)
                .prop("imageAlt", PropShape::Text)
                .prop("action", PropShape::Text),
        );
        registry.register(
            KindSchema::new("PricingTable")
                .prop("title", PropShape::Text)
                .prop("subtitle", PropShape::Text)
                .prop("tiers", PropShape::List)
                .prop("showBillingToggle", PropShape::Flag)
                .prop("currency", PropShape::Text),
        );
        registry.register(
            KindSchema::new("Dashboard")
                .prop("title", PropShape::Text)
                .prop("widgets", PropShape::List)
                .prop("columns", PropShape::Number),
        );
        registry.register(
            KindSchema::new("Chart")
                .prop("title", PropShape::Text)
                .prop("chartType", PropShape::one_of(&["line", "bar", "pie", "area"]))
                .prop("data", PropShape::List)
                .prop("description", PropShape::Text),
        );
        registry.register(
            KindSchema::new("Form")
                .prop("title", PropShape::Text)
                .prop("fields", PropShape::List)
                .prop("submitLabel", PropShape::Text),
        );
        registry.register(
            KindSchema::new("Modal")
                .prop("title", PropShape::Text)
                .prop("content", PropShape::Text)
                .prop("closable", PropShape::Flag)
                .prop("actions", PropShape::List)
                .prop("initialFocus", PropShape::Text),
        );
        registry.register(
            KindSchema::new("Testimonial")
                .prop("quote", PropShape::Text)
                .prop("author", PropShape::Text)
                .prop("role", PropShape::Text)
                .prop("rating", PropShape::Number)
                .prop("avatar", PropShape::Text)
                .prop("avatarAlt", PropShape::Text),
        );
        registry.register(
            KindSchema::new("Navigation")
                .prop("brand", PropShape::Text)
                .prop("items", PropShape::List)
                .prop("sticky", PropShape::Flag),
        );
        registry.register(
            KindSchema::new("Image")
                .prop("src", PropShape::Text)
                .prop("alt", PropShape::Text)
                .prop("caption", PropShape::Text)
                .prop("width", PropShape::Number)
                .prop("height", PropShape::Number)
                .prop("decorative", PropShape::Flag),
        );

        registry
    }

    /// Register (or replace) a kind
    pub fn register(&mut self, schema: KindSchema) {
        self.kinds.insert(schema.kind.clone(), schema);
    }

    /// Check if kind exists
    #[inline]
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Schema for a kind
    #[inline]
    #[must_use]
    pub fn get(&self, kind: &str) -> Option<&KindSchema> {
        self.kinds.get(kind)
    }

    /// True if `kind` declares `property` and `value` has the allowed shape
    #[must_use]
    pub fn accepts(&self, kind: &str, property: &str, value: &PropValue) -> bool {
        self.get(kind)
            .is_some_and(|schema| schema.accepts(property, value))
    }

    /// Registered kind names in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.kinds.keys().map(String::as_str)
    }

    /// Number of registered kinds
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Check if registry is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Schema check for one node
    #[must_use]
    pub fn conformance(&self, node: &ComponentNode) -> Vec<SchemaIssue> {
        let Some(schema) = self.get(&node.kind) else {
            return vec![SchemaIssue::UnknownKind(node.kind.clone())];
        };

        node.properties
            .iter()
            .filter_map(|(name, value)| match schema.shape(name) {
                None => Some(SchemaIssue::UnknownProperty {
                    kind: node.kind.clone(),
                    property: name.clone(),
                }),
                Some(shape) if !shape.accepts(value) => Some(SchemaIssue::WrongShape {
                    property: name.clone(),
                    expected: shape.describe(),
                    actual: value.type_name(),
                }),
                Some(_) => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_template_kinds() {
        let registry = ComponentRegistry::builtin();
        for kind in [
            "Container",
            "Button",
            "Card",
            "PricingTable",
            "Dashboard",
            "Chart",
            "Form",
            "Modal",
            "Testimonial",
            "Navigation",
            "Image",
        ] {
            assert!(registry.contains(kind), "missing {kind}");
        }
        assert_eq!(registry.len(), 11);
        assert!(!registry.contains("Carousel"));
    }

    #[test]
    fn shape_predicates() {
        assert!(PropShape::Text.accepts(&PropValue::from("x")));
        assert!(!PropShape::Text.accepts(&PropValue::Flag(true)));
        assert!(PropShape::Any.accepts(&PropValue::from(3)));
        let sizes = PropShape::one_of(&["sm", "lg"]);
        assert!(sizes.accepts(&PropValue::from("lg")));
        assert!(!sizes.accepts(&PropValue::from("huge")));
    }

    #[test]
    fn common_properties_declared_everywhere() {
        let registry = ComponentRegistry::builtin();
        for kind in registry.kinds() {
            let schema = registry.get(kind).unwrap();
            assert!(schema.shape("variant").is_some());
            assert!(schema.shape("ariaLabel").is_some());
        }
    }

    #[test]
    fn conformance_reports_each_problem() {
        let registry = ComponentRegistry::builtin();
        let node = ComponentNode::new("Button")
            .unwrap()
            .with_prop("label", "Go")
            .with_prop("sparkle", true)
            .with_prop("size", "huge");

        let issues = registry.conformance(&node);
        assert_eq!(issues.len(), 2);
        assert!(matches!(&issues[0], SchemaIssue::UnknownProperty { property, .. } if property == "sparkle"));
        assert!(matches!(&issues[1], SchemaIssue::WrongShape { property, .. } if property == "size"));
    }

    #[test]
    fn conformance_unknown_kind() {
        let registry = ComponentRegistry::builtin();
        let node = ComponentNode::new("Carousel").unwrap();
        assert_eq!(
            registry.conformance(&node),
            vec![SchemaIssue::UnknownKind("Carousel".into())]
        );
    }

    #[test]
    fn register_custom_kind() {
        let mut registry = ComponentRegistry::new();
        assert!(registry.is_empty());
        registry.register(KindSchema::new("Carousel").prop("slides", PropShape::List));
        assert!(registry.accepts("Carousel", "slides", &PropValue::List(vec![])));
        assert!(!registry.accepts("Carousel", "slides", &PropValue::from("x")));
        assert!(!registry.accepts("Missing", "slides", &PropValue::List(vec![])));
    }
}
