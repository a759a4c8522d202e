//! Accessibility validation stage
//!
//! The pipeline's only hard gate: a single critical violation fails the
//! report and blocks export. Serious, moderate and minor violations lower the
//! score but never block.
//!
//! Fixes are heuristic. The fixed specification is not re-validated, so a
//! fix is not guaranteed to clear the violation that triggered it.

mod rules;

pub use rules::{alt_from_src, humanize, AccessibilityFindings};

use crate::rulebook::{Rule, RuleBook};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uigen_registry::{Capability, ComponentRegistry, ProviderSet};
use uigen_spec::{AccessibilityReport, Impact, Improvement, Specification};

const WARNING_PENALTY: u32 = 2;

/// Validation output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Pass/fail, score, violations, warnings
    pub report: AccessibilityReport,
    /// Input with every fix applied (a revision if any were)
    pub fixed_spec: Specification,
    /// `!report.passed`
    pub blocking: bool,
}

/// The validation stage
#[derive(Debug)]
pub struct Validator {
    rules: RuleBook<dyn Rule<AccessibilityFindings>>,
    registry: Arc<ComponentRegistry>,
}

impl Validator {
    /// Validator with the fixed rule catalog
    #[must_use]
    pub fn new(registry: Arc<ComponentRegistry>) -> Self {
        Self {
            rules: rules::builtin(),
            registry,
        }
    }

    /// Validate a specification
    #[instrument(skip_all, fields(spec = %spec.id, components = spec.components.len()))]
    pub fn validate(&self, spec: &Specification) -> ValidationResult {
        let mut findings = AccessibilityFindings::default();

        for (index, node) in spec.components.iter().enumerate() {
            for issue in self.registry.conformance(node) {
                findings.warn(
                    "schema-conformance",
                    index,
                    issue.to_string(),
                    "Use only the properties and value shapes the component declares",
                );
            }

            if node.prop("color").is_some() || node.prop("background").is_some() {
                findings.warn(
                    "color-contrast",
                    index,
                    format!("{} sets custom colours whose contrast cannot be checked statically", node.kind),
                    "Verify a contrast ratio of at least 4.5:1 for text",
                );
            }

            for rule in self.rules.rules_for(&node.kind) {
                let before = findings.violations.len();
                rule.check(index, node, &mut findings);
                if findings.violations.len() > before {
                    debug!(rule = rule.name(), index, "rule reported violations");
                }
            }
        }

        let critical = findings
            .violations
            .iter()
            .filter(|v| v.impact == Impact::Critical)
            .count();
        let passed = critical == 0;
        let score = score(&findings);
        let fixed_spec = apply_fixes(spec, &findings.fixes);

        let report = AccessibilityReport {
            passed,
            score,
            violations: findings.violations,
            warnings: findings.warnings,
        };

        if passed {
            info!(score, violations = report.violations.len(), "validation passed");
        } else {
            warn!(score, critical, "validation failed");
        }

        ValidationResult {
            report,
            fixed_spec,
            blocking: !passed,
        }
    }
}

fn score(findings: &AccessibilityFindings) -> u8 {
    let violations: u32 = findings.violations.iter().map(|v| v.impact.penalty()).sum();
    let warnings = u32::try_from(findings.warnings.len())
        .unwrap_or(u32::MAX)
        .saturating_mul(WARNING_PENALTY);
    let score = 100u32.saturating_sub(violations.saturating_add(warnings));
    u8::try_from(score).unwrap_or(0)
}

fn apply_fixes(spec: &Specification, fixes: &[Improvement]) -> Specification {
    if fixes.is_empty() {
        return spec.clone();
    }
    let mut fixed = spec.revise();
    for fix in fixes {
        fixed.apply_patch(fix.component, &fix.patch);
    }
    fixed
}

/// Fill `guidance` on every violation from the guideline provider
///
/// Never touches scores or the pass/fail outcome.
pub async fn annotate(report: &mut AccessibilityReport, providers: &ProviderSet) {
    for violation in &mut report.violations {
        violation.guidance = providers
            .lookup(Capability::AccessibilityGuidelines, &violation.rule_id)
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use uigen_spec::ComponentNode;

    fn validator() -> Validator {
        Validator::new(Arc::new(ComponentRegistry::builtin()))
    }

    fn icon_button() -> ComponentNode {
        ComponentNode::new("Button").unwrap().with_prop("icon", "settings")
    }

    #[test]
    fn clean_spec_passes() {
        let spec = Specification::new().with_component(
            ComponentNode::new("Button").unwrap().with_prop("label", "Get started"),
        );
        let result = validator().validate(&spec);
        assert!(result.report.passed);
        assert!(!result.blocking);
        assert_eq!(result.report.score, 100);
        assert_eq!(result.fixed_spec, spec);
    }

    #[test]
    fn critical_violation_blocks() {
        let spec = Specification::new().with_component(icon_button());
        let result = validator().validate(&spec);
        assert!(!result.report.passed);
        assert!(result.blocking);
        assert_eq!(result.report.score, 75);
        assert_eq!(result.fixed_spec.version(), 2);
        assert_eq!(result.fixed_spec.components[0].text("ariaLabel"), Some("Settings"));
    }

    #[test]
    fn serious_violations_do_not_block() {
        let spec = Specification::new().with_component(
            ComponentNode::new("Chart").unwrap().with_prop("title", "Signups"),
        );
        let result = validator().validate(&spec);
        assert!(result.report.passed);
        assert_eq!(result.report.score, 85);
    }

    #[test]
    fn warnings_cost_two_points() {
        let spec = Specification::new().with_component(
            ComponentNode::new("Button")
                .unwrap()
                .with_prop("label", "Go")
                .with_prop("tooltip", "x")
                .with_prop("color", "#ff0000"),
        );
        let report = validator().validate(&spec).report;
        let ids: Vec<_> = report.warnings.iter().map(|w| w.rule_id.as_str()).collect();
        assert_eq!(ids, vec!["schema-conformance", "color-contrast"]);
        assert_eq!(report.score, 96);
    }

    #[test]
    fn fixes_are_not_revalidated() {
        let spec = Specification::new().with_component(icon_button());
        let first = validator().validate(&spec);
        let second = validator().validate(&first.fixed_spec);
        assert!(second.report.passed);
        assert!(!first.report.passed);
    }

    #[tokio::test]
    async fn annotate_fills_guidance_only() {
        let spec = Specification::new().with_component(icon_button());
        let mut report = validator().validate(&spec).report;
        annotate(&mut report, &ProviderSet::builtin()).await;
        assert!(report.violations[0].guidance.as_deref().unwrap().contains("WCAG"));
        assert!(!report.passed);
    }

    proptest! {
        #[test]
        fn prop_passed_iff_no_critical(icons in 0usize..4, labelled in 0usize..4, modals in 0usize..3, charts in 0usize..3) {
            let mut spec = Specification::new();
            for _ in 0..icons {
                spec.components.push(icon_button());
            }
            for _ in 0..labelled {
                spec.components.push(ComponentNode::new("Button").unwrap().with_prop("label", "Buy"));
            }
            for _ in 0..modals {
                spec.components.push(ComponentNode::new("Modal").unwrap());
            }
            for _ in 0..charts {
                spec.components.push(ComponentNode::new("Chart").unwrap());
            }

            let report = validator().validate(&spec).report;
            prop_assert_eq!(report.passed, report.count(Impact::Critical) == 0);
            prop_assert!(report.score <= 100);
            prop_assert_eq!(report.passed, icons == 0 && modals == 0);
        }
    }
}
