//! Request classification and topic extraction
//!
//! Matching is plain lower-cased substring search against fixed tables.

use crate::error::GenerationError;
use serde::{Deserialize, Serialize};

const MODIFY_TRIGGERS: &[&str] = &[
    "change", "update", "add to", "remove", "bigger", "smaller", "larger", "replace", "modify",
    "make it", "more modern", "add button", "add cta", "add testimonial", "add a",
];

const CREATE_TRIGGERS: &[&str] = &[
    "create", "build", "generate", "design", "make a", "new", "landing", "page",
];

const CTA_TRIGGERS: &[&str] = &["landing", "hero", "cta"];

/// Create or modify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Build a new specification
    Create,
    /// Revise the prior specification
    Modify,
}

/// Classify a request
///
/// Modify wording wins only when there is something to modify; otherwise
/// create wording, or the absence of prior state, selects create; anything
/// left over modifies the prior specification.
///
/// # Errors
/// Returns [`GenerationError::UnclassifiedRequest`] for a blank request with
/// no prior specification
pub fn classify(text: &str, has_prior: bool) -> Result<RequestKind, GenerationError> {
    let text = text.to_lowercase();

    if text.trim().is_empty() {
        return if has_prior {
            Ok(RequestKind::Modify)
        } else {
            Err(GenerationError::UnclassifiedRequest)
        };
    }

    if has_prior && contains_any(&text, MODIFY_TRIGGERS) {
        Ok(RequestKind::Modify)
    } else if contains_any(&text, CREATE_TRIGGERS) || !has_prior {
        Ok(RequestKind::Create)
    } else {
        Ok(RequestKind::Modify)
    }
}

/// A component family the request asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Pricing table
    Pricing,
    /// Dashboard
    Dashboard,
    /// Chart
    Chart,
    /// Form
    Form,
    /// Modal dialog
    Modal,
    /// Testimonial
    Testimonial,
    /// Navigation bar
    Navigation,
    /// Icon-only control
    IconControl,
    /// Image
    Image,
    /// Feature card
    Card,
}

impl Topic {
    /// Every topic in matching order
    pub const ALL: [Topic; 10] = [
        Topic::Pricing,
        Topic::Dashboard,
        Topic::Chart,
        Topic::Form,
        Topic::Modal,
        Topic::Testimonial,
        Topic::Navigation,
        Topic::IconControl,
        Topic::Image,
        Topic::Card,
    ];

    /// Keywords that select this topic
    #[must_use]
    pub fn keywords(&self) -> &'static [&'static str] {
        match self {
            Self::Pricing => &["pricing", "price", "plans"],
            Self::Dashboard => &["dashboard", "analytics", "admin"],
            Self::Chart => &["chart", "graph"],
            Self::Form => &["form", "contact", "signup", "sign up"],
            Self::Modal => &["modal", "dialog", "popup"],
            Self::Testimonial => &["testimonial", "review"],
            Self::Navigation => &["navigation", "navbar", "menu"],
            Self::IconControl => &["icon button", "toolbar"],
            Self::Image => &["gallery", "image", "photo"],
            Self::Card => &["card", "feature"],
        }
    }

    /// Component kind this topic produces
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pricing => "PricingTable",
            Self::Dashboard => "Dashboard",
            Self::Chart => "Chart",
            Self::Form => "Form",
            Self::Modal => "Modal",
            Self::Testimonial => "Testimonial",
            Self::Navigation => "Navigation",
            Self::IconControl => "Button",
            Self::Image => "Image",
            Self::Card => "Card",
        }
    }

    /// True if the (lower-cased) text mentions this topic
    #[must_use]
    pub fn matches(&self, text: &str) -> bool {
        contains_any(text, self.keywords())
    }
}

/// Topics mentioned by a request, in matching order
#[must_use]
pub fn topics_in(text: &str) -> Vec<Topic> {
    let text = text.to_lowercase();
    Topic::ALL.into_iter().filter(|t| t.matches(&text)).collect()
}

/// True if the request asks for a call to action
#[must_use]
pub fn wants_call_to_action(text: &str) -> bool {
    contains_any(&text.to_lowercase(), CTA_TRIGGERS)
}

pub(crate) fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_prior_always_creates() {
        assert_eq!(classify("make it bigger", false).unwrap(), RequestKind::Create);
        assert_eq!(classify("asdf", false).unwrap(), RequestKind::Create);
    }

    #[test]
    fn modify_wording_with_prior() {
        assert_eq!(classify("Make it bigger", true).unwrap(), RequestKind::Modify);
        assert_eq!(classify("Add a testimonial", true).unwrap(), RequestKind::Modify);
    }

    #[test]
    fn create_wording_with_prior() {
        assert_eq!(classify("Create a dashboard", true).unwrap(), RequestKind::Create);
    }

    #[test]
    fn ambiguous_with_prior_defaults_to_modify() {
        assert_eq!(classify("something darker", true).unwrap(), RequestKind::Modify);
    }

    #[test]
    fn blank_request() {
        assert_eq!(classify("   ", false), Err(GenerationError::UnclassifiedRequest));
        assert_eq!(classify("", true).unwrap(), RequestKind::Modify);
    }

    #[test]
    fn topics_are_ordered_and_combined() {
        let topics = topics_in("A dashboard with a chart and a pricing table");
        assert_eq!(topics, vec![Topic::Pricing, Topic::Dashboard, Topic::Chart]);
        assert!(topics_in("asdf").is_empty());
    }

    #[test]
    fn icon_control_topic() {
        assert_eq!(topics_in("Create an icon button"), vec![Topic::IconControl]);
    }

    #[test]
    fn call_to_action_wording() {
        assert!(wants_call_to_action("A landing page"));
        assert!(wants_call_to_action("hero with CTA"));
        assert!(!wants_call_to_action("a pricing page"));
    }
}
