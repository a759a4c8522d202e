//! Component templates
//!
//! Each topic maps to one component with representative defaults. Templates
//! are written to pass both critique (no error-severity issues) and
//! validation (no critical violations), except the icon-only control which
//! deliberately carries no accessible name.

use super::classify::Topic;
use uigen_spec::{props, ComponentNode, PropValue, Properties};

fn node(kind: &str, properties: Properties, rationale: &str) -> ComponentNode {
    ComponentNode {
        kind: kind.to_string(),
        properties,
        metadata: None,
    }
    .with_rationale(rationale)
}

fn tier(name: &str, price: i64, features: &[&str], featured: bool, cta: &str) -> PropValue {
    PropValue::from(props! {
        "name" => name,
        "price" => price,
        "period" => "month",
        "features" => features.iter().map(|f| PropValue::from(*f)).collect::<Vec<_>>(),
        "featured" => featured,
        "ctaLabel" => cta,
    })
}

fn field(name: &str, label: &str, kind: &str) -> PropValue {
    let mut field = props! {
        "name" => name,
        "label" => label,
        "type" => kind,
        "required" => true,
    };
    if kind == "email" {
        field.insert("autocomplete".into(), "email".into());
    }
    PropValue::from(field)
}

/// Template for a topic
#[must_use]
pub fn template(topic: Topic) -> ComponentNode {
    match topic {
        Topic::Pricing => pricing_table(),
        Topic::Dashboard => node(
            "Dashboard",
            props! {
                "title" => "Overview",
                "columns" => 3,
                "widgets" => vec![
                    PropValue::from(props! { "title" => "Revenue", "value" => "$12,400" }),
                    PropValue::from(props! { "title" => "Active users", "value" => "1,284" }),
                    PropValue::from(props! { "title" => "Churn", "value" => "2.1%" }),
                ],
            },
            "dashboard requested",
        ),
        Topic::Chart => node(
            "Chart",
            props! {
                "title" => "Monthly revenue",
                "chartType" => "line",
                "data" => vec![
                    PropValue::from(props! { "label" => "Jan", "value" => 4200 }),
                    PropValue::from(props! { "label" => "Feb", "value" => 5100 }),
                    PropValue::from(props! { "label" => "Mar", "value" => 6300 }),
                ],
                "description" => "Line chart of monthly revenue, rising from 4,200 in January to 6,300 in March.",
            },
            "chart requested",
        ),
        Topic::Form => node(
            "Form",
            props! {
                "title" => "Contact us",
                "fields" => vec![
                    field("name", "Name", "text"),
                    field("email", "Email", "email"),
                    field("message", "Message", "textarea"),
                ],
                "submitLabel" => "Send message",
            },
            "form requested",
        ),
        Topic::Modal => node(
            "Modal",
            props! {
                "title" => "Confirm action",
                "content" => "Are you sure you want to continue?",
                "closable" => true,
                "actions" => vec![PropValue::from("Cancel"), PropValue::from("Confirm")],
            },
            "modal requested",
        ),
        Topic::Testimonial => testimonial(),
        Topic::Navigation => node(
            "Navigation",
            props! {
                "brand" => "Acme",
                "items" => vec![
                    PropValue::from(props! { "label" => "Product", "href" => "#product" }),
                    PropValue::from(props! { "label" => "Pricing", "href" => "#pricing" }),
                    PropValue::from(props! { "label" => "Contact", "href" => "#contact" }),
                ],
                "sticky" => true,
            },
            "navigation requested",
        ),
        Topic::IconControl => node(
            "Button",
            props! {
                "icon" => "settings",
                "variant" => "ghost",
                "size" => "md",
            },
            "icon-only control requested",
        ),
        Topic::Image => node(
            "Image",
            props! {
                "src" => "/images/hero-photo.jpg",
                "alt" => "Team collaborating around a laptop",
                "width" => 1200,
                "height" => 630,
            },
            "image requested",
        ),
        Topic::Card => node(
            "Card",
            props! {
                "title" => "Fast setup",
                "description" => "Get going in minutes with sensible defaults.",
                "variant" => "elevated",
            },
            "card requested",
        ),
    }
}

/// Three-tier pricing table with the middle tier featured
#[must_use]
pub fn pricing_table() -> ComponentNode {
    node(
        "PricingTable",
        props! {
            "title" => "Choose your plan",
            "tiers" => vec![
                tier("Starter", 9, &["1 project", "Email support"], false, "Start free trial"),
                tier("Pro", 29, &["10 projects", "Priority support", "Analytics"], true, "Upgrade to Pro"),
                tier("Enterprise", 99, &["Unlimited projects", "Dedicated manager", "SSO"], false, "Contact sales"),
            ],
            "showBillingToggle" => true,
            "currency" => "USD",
        },
        "pricing requested",
    )
}

/// Testimonial quote
#[must_use]
pub fn testimonial() -> ComponentNode {
    node(
        "Testimonial",
        props! {
            "quote" => "This tool cut our design time in half.",
            "author" => "Jordan Lee",
            "role" => "Head of Product",
            "rating" => 5,
        },
        "testimonial requested",
    )
}

/// Primary call to action
#[must_use]
pub fn call_to_action() -> ComponentNode {
    node(
        "Button",
        props! {
            "label" => "Get started",
            "variant" => "primary",
            "size" => "lg",
            "href" => "#signup",
        },
        "primary call to action",
    )
}

/// Generic layout container used when nothing else matched
#[must_use]
pub fn container() -> ComponentNode {
    node(
        "Container",
        props! {
            "layout" => "stack",
            "padding" => "lg",
            "heading" => "Welcome",
        },
        "no specific component matched the request",
    )
}
