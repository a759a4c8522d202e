//! Construction expressions
//!
//! A target-neutral description of how to construct one component:
//! its kind plus one literal per property. Renderers turn these into
//! concrete syntax.

use crate::error::ExportError;
use uigen_spec::{ComponentNode, PropValue};

/// Rendered property value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    /// String literal, already quoted and escaped
    Quoted(String),
    /// Boolean flag
    Flag(bool),
    /// Number written as-is
    Bare(String),
    /// Lists and maps as compact JSON
    Structured(String),
}

/// One `name = literal` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// Property name
    pub name: String,
    /// Rendered value
    pub value: Literal,
}

/// How to construct one component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConstructionExpr {
    /// Component identifier
    pub kind: String,
    /// Attributes in property order
    pub attributes: Vec<Attribute>,
}

impl ConstructionExpr {
    /// Build the expression for the node at position `index`
    ///
    /// # Errors
    /// - `InvalidKindIdentifier` if the kind is not `[A-Z][A-Za-z0-9]*`
    /// - `InvalidPropertyName` if a property is not `[A-Za-z_][A-Za-z0-9_]*`
    /// - `Serialization` if a value cannot be encoded
    pub fn from_node(index: usize, node: &ComponentNode) -> Result<Self, ExportError> {
        if !is_component_identifier(&node.kind) {
            return Err(ExportError::InvalidKindIdentifier {
                index,
                kind: node.kind.clone(),
            });
        }

        let attributes = node
            .properties
            .iter()
            .map(|(name, value)| {
                if !is_attribute_name(name) {
                    return Err(ExportError::InvalidPropertyName {
                        index,
                        property: name.clone(),
                    });
                }
                Ok(Attribute {
                    name: name.clone(),
                    value: literal(value)?,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            kind: node.kind.clone(),
            attributes,
        })
    }
}

/// Render a property value as a literal
///
/// # Errors
/// Returns error if JSON encoding fails
pub fn literal(value: &PropValue) -> Result<Literal, ExportError> {
    Ok(match value {
        PropValue::Text(s) => Literal::Quoted(serde_json::to_string(s)?),
        PropValue::Flag(b) => Literal::Flag(*b),
        PropValue::Number(n) => Literal::Bare(n.to_string()),
        PropValue::List(_) | PropValue::Map(_) => Literal::Structured(serde_json::to_string(value)?),
    })
}

fn is_component_identifier(kind: &str) -> bool {
    let mut chars = kind.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_alphanumeric())
}

fn is_attribute_name(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use uigen_spec::props;

    #[test]
    fn literal_per_variant() {
        assert_eq!(
            literal(&PropValue::from("Say \"hi\"")).unwrap(),
            Literal::Quoted(r#""Say \"hi\"""#.into())
        );
        assert_eq!(literal(&PropValue::Flag(true)).unwrap(), Literal::Flag(true));
        assert_eq!(literal(&PropValue::from(42)).unwrap(), Literal::Bare("42".into()));
        assert_eq!(
            literal(&PropValue::from(props! { "a" => 1 })).unwrap(),
            Literal::Structured(r#"{"a":1}"#.into())
        );
    }

    #[test]
    fn expression_keeps_property_order() {
        let node = ComponentNode::new("Card")
            .unwrap()
            .with_prop("title", "Hi")
            .with_prop("elevated", true);
        let expr = ConstructionExpr::from_node(0, &node).unwrap();
        let names: Vec<_> = expr.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["title", "elevated"]);
    }

    #[test]
    fn rejects_bad_identifiers() {
        let node = ComponentNode::new("pricing table").unwrap();
        assert!(matches!(
            ConstructionExpr::from_node(3, &node),
            Err(ExportError::InvalidKindIdentifier { index: 3, .. })
        ));

        let node = ComponentNode::new("Card").unwrap().with_prop("data-x", "1");
        assert!(matches!(
            ConstructionExpr::from_node(0, &node),
            Err(ExportError::InvalidPropertyName { .. })
        ));
    }
}
