//! Accessibility rule catalog
//!
//! | rule | impact | kinds |
//! |---|---|---|
//! | `button-name` | critical | icon-only `Button` |
//! | `image-alt` | critical | `Image`, `Card` image, `Testimonial` avatar |
//! | `modal-close` | critical | `Modal` |
//! | `form-label` | serious | `Form` fields |
//! | `modal-name` | serious | `Modal` |
//! | `chart-description` | serious | `Chart` |
//! | `nav-label` | serious | icon-only `Navigation` items |
//! | `touch-target` | moderate | `Button` of size `xs` |
//! | `region-heading` | moderate | `PricingTable` |
//! | `input-autocomplete` | minor | `Form` email fields |
//!
//! Every violation that has a mechanical remedy also proposes a fix patch.
//! Rules touching list-valued properties emit one combined patch per
//! component so fixes never overwrite each other.

use crate::rulebook::{FnRule, Rule, RuleBook};
use uigen_spec::{
    props, AccessibilityWarning, ComponentNode, Impact, Improvement, PropValue, Properties,
    Violation,
};

const VAGUE_LABELS: &[&str] = &["click here", "here", "more", "read more", "learn more", "link"];

/// What rules report
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessibilityFindings {
    /// Violations found
    pub violations: Vec<Violation>,
    /// Warnings found
    pub warnings: Vec<AccessibilityWarning>,
    /// Heuristic fix patches
    pub fixes: Vec<Improvement>,
}

impl AccessibilityFindings {
    /// Record a violation
    pub fn violation(
        &mut self,
        rule_id: &str,
        impact: Impact,
        index: usize,
        description: impl Into<String>,
        fix: impl Into<String>,
    ) {
        self.violations.push(Violation {
            rule_id: rule_id.to_string(),
            impact,
            description: description.into(),
            fix: fix.into(),
            component: Some(index),
            guidance: None,
        });
    }

    /// Record a warning
    pub fn warn(
        &mut self,
        rule_id: &str,
        index: usize,
        description: impl Into<String>,
        recommendation: impl Into<String>,
    ) {
        self.warnings.push(AccessibilityWarning {
            rule_id: rule_id.to_string(),
            description: description.into(),
            recommendation: recommendation.into(),
            component: Some(index),
        });
    }

    /// Propose a fix patch
    pub fn fix(&mut self, component: usize, patch: Properties, reason: impl Into<String>) {
        self.fixes.push(Improvement {
            component,
            patch,
            reason: reason.into(),
        });
    }
}

/// Built-in catalog, keyed by kind
#[must_use]
pub fn builtin() -> RuleBook<dyn Rule<AccessibilityFindings>> {
    RuleBook::new()
        .with("Button", FnRule::boxed("button-name", button_name))
        .with("Button", FnRule::boxed("touch-target", touch_target))
        .with("Button", FnRule::boxed("link-purpose", link_purpose))
        .with("Image", FnRule::boxed("image-alt", image_alt))
        .with("Card", FnRule::boxed("image-alt", card_image_alt))
        .with("Testimonial", FnRule::boxed("image-alt", avatar_alt))
        .with("Form", FnRule::boxed("form-label", form_fields))
        .with("Modal", FnRule::boxed("modal-name", modal_name))
        .with("Modal", FnRule::boxed("modal-close", modal_close))
        .with("Chart", FnRule::boxed("chart-description", chart_description))
        .with("Navigation", FnRule::boxed("nav-label", nav_labels))
        .with("PricingTable", FnRule::boxed("region-heading", region_heading))
}

/// `arrow-right` → `Arrow right`
#[must_use]
pub fn humanize(identifier: &str) -> String {
    let words: Vec<&str> = identifier
        .split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .collect();
    let joined = words.join(" ").to_lowercase();
    let mut chars = joined.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Alt text guessed from an image path: `/img/team-photo.jpg` → `Team photo`
#[must_use]
pub fn alt_from_src(src: &str) -> String {
    let file = src.rsplit('/').next().unwrap_or(src);
    let stem = file.split('.').next().unwrap_or(file);
    let alt = humanize(stem);
    if alt.is_empty() {
        "Image".to_string()
    } else {
        alt
    }
}

fn button_name(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    let Some(icon) = node.text("icon").filter(|i| !i.trim().is_empty()) else {
        return;
    };
    if node.lacks_text("label") && node.lacks_text("ariaLabel") {
        findings.violation(
            "button-name",
            Impact::Critical,
            index,
            format!("Icon-only button '{icon}' has no accessible name"),
            "Add an ariaLabel describing the action",
        );
        findings.fix(index, props! { "ariaLabel" => humanize(icon) }, "accessible name from icon");
    }
}

fn touch_target(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    if node.text("size") == Some("xs") {
        findings.violation(
            "touch-target",
            Impact::Moderate,
            index,
            "Extra-small button is below the minimum touch target",
            "Use size sm or larger",
        );
        findings.fix(index, props! { "size" => "sm" }, "minimum touch target");
    }
}

fn link_purpose(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    if let Some(label) = node.text("label") {
        let normalized = label.trim().to_lowercase();
        if VAGUE_LABELS.contains(&normalized.as_str()) {
            findings.warn(
                "link-purpose",
                index,
                format!("Button label '{label}' does not describe its purpose"),
                "Say where the button leads or what it does",
            );
        }
    }
}

fn missing_alt(node: &ComponentNode, key: &str) -> bool {
    node.prop(key).is_none()
}

fn image_alt(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    let decorative = node.prop("decorative").and_then(PropValue::as_bool) == Some(true);
    if decorative || !missing_alt(node, "alt") {
        return;
    }
    findings.violation(
        "image-alt",
        Impact::Critical,
        index,
        "Image has no alt text",
        "Describe the image in alt, or mark it decorative",
    );
    let alt = node.text("src").map_or_else(|| "Image".to_string(), alt_from_src);
    findings.fix(index, props! { "alt" => alt }, "alt text from file name");
}

fn card_image_alt(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    let Some(src) = node.text("image") else {
        return;
    };
    if missing_alt(node, "imageAlt") {
        findings.violation(
            "image-alt",
            Impact::Critical,
            index,
            "Card image has no alt text",
            "Add imageAlt describing the picture",
        );
        findings.fix(index, props! { "imageAlt" => alt_from_src(src) }, "alt text from file name");
    }
}

fn avatar_alt(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    if node.text("avatar").is_none() || !missing_alt(node, "avatarAlt") {
        return;
    }
    findings.violation(
        "image-alt",
        Impact::Critical,
        index,
        "Testimonial avatar has no alt text",
        "Add avatarAlt naming the person",
    );
    let alt = node
        .text("author")
        .map_or_else(|| "Customer photo".to_string(), |author| format!("Photo of {author}"));
    findings.fix(index, props! { "avatarAlt" => alt }, "alt text from author");
}

fn form_fields(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    let Some(fields) = node.prop("fields").and_then(PropValue::as_list) else {
        return;
    };

    let mut changed = false;
    let mut fixed = Vec::with_capacity(fields.len());

    for (position, field) in fields.iter().enumerate() {
        let PropValue::Map(map) = field else {
            fixed.push(field.clone());
            continue;
        };
        let mut map = map.clone();
        let name = map
            .get("name")
            .and_then(PropValue::as_str)
            .map_or_else(|| format!("field {}", position + 1), str::to_string);

        let unlabeled = map.get("label").map_or(true, PropValue::is_blank_text);
        if unlabeled {
            findings.violation(
                "form-label",
                Impact::Serious,
                index,
                format!("Form field '{name}' has no label"),
                "Give every field a visible label",
            );
            map.insert("label".into(), humanize(&name).into());
            changed = true;
        }

        let is_email = map.get("type").and_then(PropValue::as_str) == Some("email");
        if is_email && !map.contains_key("autocomplete") {
            findings.violation(
                "input-autocomplete",
                Impact::Minor,
                index,
                format!("Email field '{name}' does not declare autocomplete"),
                "Set autocomplete to \"email\"",
            );
            map.insert("autocomplete".into(), "email".into());
            changed = true;
        }

        fixed.push(PropValue::Map(map));
    }

    if changed {
        findings.fix(index, props! { "fields" => fixed }, "labels and input purpose for fields");
    }
}

fn modal_name(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    if node.lacks_text("title") && node.lacks_text("ariaLabel") {
        findings.violation(
            "modal-name",
            Impact::Serious,
            index,
            "Dialog has no accessible name",
            "Give the dialog a title or ariaLabel",
        );
        findings.fix(index, props! { "ariaLabel" => "Dialog" }, "synthesized dialog label");
    }
}

fn modal_close(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    if node.prop("closable").and_then(PropValue::as_bool) != Some(true) {
        findings.violation(
            "modal-close",
            Impact::Critical,
            index,
            "Dialog cannot be closed",
            "Make the dialog closable with a close button and Escape",
        );
        findings.fix(index, props! { "closable" => true }, "dialogs must be dismissible");
    }
}

fn chart_description(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    if node.lacks_text("description") {
        findings.violation(
            "chart-description",
            Impact::Serious,
            index,
            "Chart has no text description",
            "Summarize what the chart shows in description",
        );
        let chart_type = node.text("chartType").unwrap_or("data");
        let subject = node.text("title").unwrap_or("the data");
        findings.fix(
            index,
            props! { "description" => format!("{} chart of {subject}", humanize(chart_type)) },
            "description from title",
        );
    }
}

fn nav_labels(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    let Some(items) = node.prop("items").and_then(PropValue::as_list) else {
        return;
    };

    let mut changed = false;
    let fixed: Vec<PropValue> = items
        .iter()
        .map(|item| {
            let PropValue::Map(map) = item else {
                return item.clone();
            };
            let icon = map.get("icon").and_then(PropValue::as_str);
            let unnamed = map.get("label").map_or(true, PropValue::is_blank_text)
                && map.get("ariaLabel").map_or(true, PropValue::is_blank_text);
            match icon {
                Some(icon) if unnamed => {
                    findings.violation(
                        "nav-label",
                        Impact::Serious,
                        index,
                        format!("Navigation item with icon '{icon}' has no label"),
                        "Give icon-only navigation items an ariaLabel",
                    );
                    changed = true;
                    let mut map = map.clone();
                    map.insert("ariaLabel".into(), humanize(icon).into());
                    PropValue::Map(map)
                }
                _ => item.clone(),
            }
        })
        .collect();

    if changed {
        findings.fix(index, props! { "items" => fixed }, "labels for icon-only navigation items");
    }
}

fn region_heading(index: usize, node: &ComponentNode, findings: &mut AccessibilityFindings) {
    if node.lacks_text("title") {
        findings.violation(
            "region-heading",
            Impact::Moderate,
            index,
            "Pricing section has no heading",
            "Add a title so screen-reader users can find the section",
        );
        findings.fix(index, props! { "title" => "Pricing" }, "section heading");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(node: &ComponentNode) -> AccessibilityFindings {
        let book = builtin();
        let mut findings = AccessibilityFindings::default();
        for rule in book.rules_for(&node.kind) {
            rule.check(0, node, &mut findings);
        }
        findings
    }

    fn rule_ids(findings: &AccessibilityFindings) -> Vec<&str> {
        findings.violations.iter().map(|v| v.rule_id.as_str()).collect()
    }

    #[test]
    fn humanize_identifiers() {
        assert_eq!(humanize("arrow-right"), "Arrow right");
        assert_eq!(humanize("settings"), "Settings");
        assert_eq!(humanize("first_name"), "First name");
        assert_eq!(humanize(""), "");
    }

    #[test]
    fn alt_from_paths() {
        assert_eq!(alt_from_src("/images/team-photo.jpg"), "Team photo");
        assert_eq!(alt_from_src("hero.png"), "Hero");
        assert_eq!(alt_from_src("/"), "Image");
    }

    #[test]
    fn icon_only_button() {
        let node = ComponentNode::new("Button").unwrap().with_prop("icon", "settings");
        let findings = run(&node);
        assert_eq!(rule_ids(&findings), vec!["button-name"]);
        assert_eq!(findings.violations[0].impact, Impact::Critical);
        assert_eq!(findings.fixes[0].patch["ariaLabel"].as_str(), Some("Settings"));
    }

    #[test]
    fn labelled_icon_button_passes() {
        let node = ComponentNode::new("Button")
            .unwrap()
            .with_prop("icon", "settings")
            .with_prop("ariaLabel", "Open settings");
        assert!(run(&node).violations.is_empty());
    }

    #[test]
    fn tiny_button_and_vague_label() {
        let node = ComponentNode::new("Button")
            .unwrap()
            .with_prop("label", "Click here")
            .with_prop("size", "xs");
        let findings = run(&node);
        assert_eq!(rule_ids(&findings), vec!["touch-target"]);
        assert_eq!(findings.warnings[0].rule_id, "link-purpose");
    }

    #[test]
    fn form_fields_get_one_combined_fix() {
        let node = ComponentNode::new("Form").unwrap().with_prop(
            "fields",
            vec![
                PropValue::from(props! { "name" => "full_name", "type" => "text" }),
                PropValue::from(props! { "name" => "email", "type" => "email" }),
            ],
        );
        let findings = run(&node);
        assert_eq!(rule_ids(&findings), vec!["form-label", "form-label", "input-autocomplete"]);
        assert_eq!(findings.fixes.len(), 1);

        let fields = findings.fixes[0].patch["fields"].as_list().unwrap();
        let first = fields[0].as_map().unwrap();
        let second = fields[1].as_map().unwrap();
        assert_eq!(first["label"].as_str(), Some("Full name"));
        assert_eq!(second["label"].as_str(), Some("Email"));
        assert_eq!(second["autocomplete"].as_str(), Some("email"));
    }

    #[test]
    fn bare_modal() {
        let findings = run(&ComponentNode::new("Modal").unwrap());
        assert_eq!(rule_ids(&findings), vec!["modal-name", "modal-close"]);
        assert_eq!(findings.fixes.len(), 2);
    }

    #[test]
    fn image_alt_rules() {
        let image = ComponentNode::new("Image").unwrap().with_prop("src", "/a/sunset-beach.jpg");
        let findings = run(&image);
        assert_eq!(findings.fixes[0].patch["alt"].as_str(), Some("Sunset beach"));

        let decorative = image.clone().with_prop("decorative", true);
        assert!(run(&decorative).violations.is_empty());

        let empty_alt = image.with_prop("alt", "");
        assert!(run(&empty_alt).violations.is_empty());
    }

    #[test]
    fn card_and_avatar_alt() {
        let card = ComponentNode::new("Card").unwrap().with_prop("image", "feature.png");
        assert_eq!(rule_ids(&run(&card)), vec!["image-alt"]);

        let testimonial = ComponentNode::new("Testimonial")
            .unwrap()
            .with_prop("author", "Sam")
            .with_prop("avatar", "sam.jpg");
        let findings = run(&testimonial);
        assert_eq!(findings.fixes[0].patch["avatarAlt"].as_str(), Some("Photo of Sam"));
    }

    #[test]
    fn chart_without_description() {
        let node = ComponentNode::new("Chart")
            .unwrap()
            .with_prop("title", "signups")
            .with_prop("chartType", "bar");
        let findings = run(&node);
        assert_eq!(findings.violations[0].impact, Impact::Serious);
        assert_eq!(findings.fixes[0].patch["description"].as_str(), Some("Bar chart of signups"));
    }

    #[test]
    fn icon_only_nav_items() {
        let node = ComponentNode::new("Navigation").unwrap().with_prop(
            "items",
            vec![
                PropValue::from(props! { "label" => "Home", "icon" => "home" }),
                PropValue::from(props! { "icon" => "user-circle" }),
            ],
        );
        let findings = run(&node);
        assert_eq!(rule_ids(&findings), vec!["nav-label"]);
        let items = findings.fixes[0].patch["items"].as_list().unwrap();
        assert_eq!(items[1].as_map().unwrap()["ariaLabel"].as_str(), Some("User circle"));
    }

    #[test]
    fn pricing_without_heading() {
        let findings = run(&ComponentNode::new("PricingTable").unwrap());
        assert_eq!(findings.violations[0].impact, Impact::Moderate);
    }
}
