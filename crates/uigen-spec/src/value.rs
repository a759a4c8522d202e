//! Property values
//!
//! Component properties form an open schema: any property name may carry any
//! JSON-like value. [`PropValue`] is the closed set of shapes such a value can
//! take, so rule checks can match on it exhaustively.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Number;

/// Insertion-ordered property map
///
/// Ordering is preserved so that iteration (and therefore export output) is
/// stable for identical input.
pub type Properties = IndexMap<String, PropValue>;

/// A single property value
///
/// Serialized untagged, so a `PropValue` reads and writes as plain JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum PropValue {
    /// Boolean flag
    Flag(bool),
    /// Integer or floating point number
    Number(Number),
    /// Text
    Text(String),
    /// Ordered sequence of values
    List(Vec<PropValue>),
    /// Nested mapping
    Map(Properties),
}

impl PropValue {
    /// Floating point value; `None` for NaN and infinities
    #[must_use]
    pub fn float(value: f64) -> Option<Self> {
        Number::from_f64(value).map(Self::Number)
    }

    /// Borrow as text
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Borrow as boolean
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Flag(b) => Some(*b),
            _ => None,
        }
    }

    /// Integer value, if this is an integral number
    #[inline]
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    /// Borrow as list
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[PropValue]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Borrow as map
    #[inline]
    #[must_use]
    pub fn as_map(&self) -> Option<&Properties> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// True for text that is empty or whitespace only
    #[must_use]
    pub fn is_blank_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.trim().is_empty())
    }

    /// Short name of the variant, used in diagnostics
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Flag(_) => "flag",
            Self::Number(_) => "number",
            Self::Text(_) => "text",
            Self::List(_) => "list",
            Self::Map(_) => "map",
        }
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for PropValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl From<u32> for PropValue {
    fn from(value: u32) -> Self {
        Self::Number(value.into())
    }
}

impl From<Vec<PropValue>> for PropValue {
    fn from(value: Vec<PropValue>) -> Self {
        Self::List(value)
    }
}

impl From<Properties> for PropValue {
    fn from(value: Properties) -> Self {
        Self::Map(value)
    }
}

/// Build a [`Properties`] map from `key => value` pairs
///
/// ```rust,ignore
/// let props = props! { "title" => "Plans", "columns" => 3 };
/// ```
#[macro_export]
macro_rules! props {
    () => { $crate::Properties::new() };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Properties::new();
        $( map.insert(::std::string::String::from($key), $crate::PropValue::from($value)); )+
        map
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_json_round_trip() {
        let json = r#"{"title":"Plans","featured":true,"columns":3,"tags":["a","b"],"style":{"gap":"md"}}"#;
        let props: Properties = serde_json::from_str(json).unwrap();

        assert_eq!(props["title"], PropValue::from("Plans"));
        assert_eq!(props["featured"], PropValue::Flag(true));
        assert_eq!(props["columns"].as_i64(), Some(3));
        assert_eq!(props["tags"].as_list().map(<[PropValue]>::len), Some(2));
        assert!(props["style"].as_map().is_some());

        let back = serde_json::to_string(&props).unwrap();
        assert_eq!(back, json);
    }

    #[test]
    fn float_rejects_nan() {
        assert!(PropValue::float(f64::NAN).is_none());
        assert!(PropValue::float(1.5).is_some());
    }

    #[test]
    fn blank_text_detection() {
        assert!(PropValue::from("  ").is_blank_text());
        assert!(!PropValue::from("Buy").is_blank_text());
        assert!(!PropValue::Flag(false).is_blank_text());
    }

    #[test]
    fn props_macro_keeps_insertion_order() {
        let props = props! { "b" => 1, "a" => "x", "c" => true };
        let keys: Vec<_> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }
}
