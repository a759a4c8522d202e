//! Design rules
//!
//! Each rule is a pure check over one component's properties. Built-in rules
//! are plain functions wrapped in [`FnRule`](crate::rulebook::FnRule).

use crate::rulebook::{FnRule, Rule, RuleBook};
use uigen_spec::{
    props, ComponentNode, DesignIssue, Improvement, IssueCategory, PropValue, Properties, Severity,
};

/// Longest button label before it reads as a sentence
pub const MAX_LABEL_LEN: usize = 24;
/// Most pricing tiers a table can show without overwhelming
pub const MAX_TIERS: usize = 5;
/// Most fields a form can ask for in one step
pub const MAX_FORM_FIELDS: usize = 8;
/// Most widgets a dashboard can show at once
pub const MAX_WIDGETS: usize = 6;

/// What rules report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DesignFindings {
    /// Issues found
    pub issues: Vec<DesignIssue>,
    /// Patches proposed
    pub improvements: Vec<Improvement>,
}

impl DesignFindings {
    /// Record an issue
    pub fn issue(&mut self, issue: DesignIssue) {
        self.issues.push(issue);
    }

    /// Propose a patch for a component
    pub fn improve(&mut self, component: usize, patch: Properties, reason: impl Into<String>) {
        self.improvements.push(Improvement {
            component,
            patch,
            reason: reason.into(),
        });
    }
}

/// Built-in rules, keyed by kind
#[must_use]
pub fn builtin() -> RuleBook<dyn Rule<DesignFindings>> {
    RuleBook::new()
        .with("Card", FnRule::boxed("card-title", card_title))
        .with("PricingTable", FnRule::boxed("pricing-tiers", pricing_tiers))
        .with("Button", FnRule::boxed("button-content", button_content))
        .with("Chart", FnRule::boxed("chart-content", chart_content))
        .with("Form", FnRule::boxed("form-length", form_length))
        .with("Form", FnRule::boxed("form-submit", form_submit))
        .with("Dashboard", FnRule::boxed("dashboard-density", dashboard_density))
        .with("Testimonial", FnRule::boxed("testimonial-attribution", testimonial_attribution))
}

fn list_len(node: &ComponentNode, key: &str) -> usize {
    node.prop(key).and_then(PropValue::as_list).map_or(0, <[PropValue]>::len)
}

fn card_title(index: usize, node: &ComponentNode, findings: &mut DesignFindings) {
    if node.lacks_text("title") {
        findings.issue(
            DesignIssue::new(IssueCategory::Content, Severity::Suggestion, "Card has no title")
                .with_fix("Add a short title that names the card's content")
                .at(index),
        );
        findings.improve(index, props! { "title" => "Key feature" }, "cards scan better with a title");
    }
}

fn is_featured(tier: &PropValue) -> bool {
    tier.as_map()
        .and_then(|t| t.get("featured"))
        .and_then(PropValue::as_bool)
        .unwrap_or(false)
}

fn pricing_tiers(index: usize, node: &ComponentNode, findings: &mut DesignFindings) {
    let tiers = node.prop("tiers").and_then(PropValue::as_list).unwrap_or_default();

    if tiers.is_empty() {
        findings.issue(
            DesignIssue::new(IssueCategory::Content, Severity::Error, "Pricing table has no tiers")
                .with_fix("Add at least one pricing tier")
                .at(index),
        );
        return;
    }

    if tiers.len() > MAX_TIERS {
        findings.issue(
            DesignIssue::new(
                IssueCategory::Layout,
                Severity::Warning,
                format!("Pricing table shows {} tiers", tiers.len()),
            )
            .with_fix(format!("Show at most {MAX_TIERS} tiers"))
            .at(index),
        );
    }

    if !tiers.iter().any(is_featured) {
        findings.issue(
            DesignIssue::new(
                IssueCategory::Hierarchy,
                Severity::Suggestion,
                "No pricing tier is highlighted",
            )
            .with_fix("Mark the recommended tier as featured")
            .at(index),
        );

        let middle = tiers.len() / 2;
        let rewritten: Vec<PropValue> = tiers
            .iter()
            .enumerate()
            .map(|(i, tier)| match tier {
                PropValue::Map(map) if i == middle => {
                    let mut map = map.clone();
                    map.insert("featured".into(), PropValue::Flag(true));
                    PropValue::Map(map)
                }
                other => other.clone(),
            })
            .collect();
        findings.improve(
            index,
            props! { "tiers" => rewritten },
            "a featured tier guides the choice",
        );
    }
}

fn button_content(index: usize, node: &ComponentNode, findings: &mut DesignFindings) {
    if node.lacks_text("label") && node.lacks_text("icon") {
        findings.issue(
            DesignIssue::new(
                IssueCategory::Content,
                Severity::Error,
                "Button has neither a label nor an icon",
            )
            .with_fix("Give the button a label")
            .at(index),
        );
        return;
    }

    if let Some(label) = node.text("label") {
        if label.chars().count() > MAX_LABEL_LEN {
            findings.issue(
                DesignIssue::new(
                    IssueCategory::Content,
                    Severity::Suggestion,
                    format!("Button label is {} characters long", label.chars().count()),
                )
                .with_fix(format!("Keep labels under {MAX_LABEL_LEN} characters"))
                .at(index),
            );
        }
    }
}

fn chart_content(index: usize, node: &ComponentNode, findings: &mut DesignFindings) {
    if node.lacks_text("title") {
        findings.issue(
            DesignIssue::new(IssueCategory::Content, Severity::Suggestion, "Chart has no title")
                .with_fix("Add a title that says what is measured")
                .at(index),
        );
    }
    if list_len(node, "data") == 0 {
        findings.issue(
            DesignIssue::new(IssueCategory::Content, Severity::Warning, "Chart has no data")
                .with_fix("Provide data points or remove the chart")
                .at(index),
        );
    }
}

fn form_length(index: usize, node: &ComponentNode, findings: &mut DesignFindings) {
    let fields = list_len(node, "fields");
    if fields > MAX_FORM_FIELDS {
        findings.issue(
            DesignIssue::new(
                IssueCategory::Layout,
                Severity::Warning,
                format!("Form asks for {fields} fields"),
            )
            .with_fix("Split the form into steps or drop optional fields")
            .at(index),
        );
    }
}

fn form_submit(index: usize, node: &ComponentNode, findings: &mut DesignFindings) {
    if node.lacks_text("submitLabel") {
        findings.issue(
            DesignIssue::new(
                IssueCategory::Conversion,
                Severity::Suggestion,
                "Form has no submit label",
            )
            .with_fix("Name the submit button after what it does")
            .at(index),
        );
        findings.improve(index, props! { "submitLabel" => "Submit" }, "forms need an explicit submit action");
    }
}

fn dashboard_density(index: usize, node: &ComponentNode, findings: &mut DesignFindings) {
    let widgets = list_len(node, "widgets");
    if widgets > MAX_WIDGETS {
        findings.issue(
            DesignIssue::new(
                IssueCategory::Layout,
                Severity::Warning,
                format!("Dashboard shows {widgets} widgets"),
            )
            .with_fix(format!("Keep the first screen to {MAX_WIDGETS} widgets"))
            .at(index),
        );
    }
}

fn testimonial_attribution(index: usize, node: &ComponentNode, findings: &mut DesignFindings) {
    if node.lacks_text("author") {
        findings.issue(
            DesignIssue::new(
                IssueCategory::Content,
                Severity::Warning,
                "Testimonial has no author",
            )
            .with_fix("Attribute the quote to a named person")
            .at(index),
        );
    }
    if node.lacks_text("avatar") {
        findings.issue(
            DesignIssue::new(
                IssueCategory::Content,
                Severity::Suggestion,
                "Testimonial has no avatar",
            )
            .with_fix("Add a photo of the author")
            .at(index),
        );
    }
}
