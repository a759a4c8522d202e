//! Design critique stage
//!
//! Scores a specification on visual-design grounds. Findings never stop the
//! pipeline; error-severity issues mark the critique as blocking, which the
//! orchestrator records as advisory.
//!
//! # Scoring
//! Start at 100, subtract 20/10/5 per error/warning/suggestion, floor at 0,
//! then add 5 (capped at 100) when 1 to 3 improvements are pending.

mod rules;

pub use rules::{
    builtin as builtin_rules, DesignFindings, MAX_FORM_FIELDS, MAX_LABEL_LEN, MAX_TIERS,
    MAX_WIDGETS,
};

use crate::rulebook::{Rule, RuleBook};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};
use uigen_registry::{Capability, ProviderSet};
use uigen_spec::{
    DesignFeedback, DesignIssue, Improvement, IssueCategory, Severity, Specification,
};

/// Most components before a page reads as cluttered
pub const MAX_COMPONENTS: usize = 10;
/// Most distinct button sizes or card variants on one page
pub const MAX_DISTINCT_STYLES: usize = 2;

const IMPROVEMENT_BONUS: u32 = 5;

/// Critique output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CritiqueResult {
    /// Score, issues and proposed patches
    pub feedback: DesignFeedback,
    /// Input with every improvement applied (a revision if any were)
    pub improved_spec: Specification,
    /// True iff any issue is an error
    pub blocking: bool,
}

/// The critique stage
#[derive(Debug)]
pub struct Critic {
    rules: RuleBook<dyn Rule<DesignFindings>>,
}

impl Critic {
    /// Critic with the built-in rules
    #[must_use]
    pub fn new() -> Self {
        Self {
            rules: builtin_rules(),
        }
    }

    /// Critic with a custom rule table
    #[must_use]
    pub fn with_rules(rules: RuleBook<dyn Rule<DesignFindings>>) -> Self {
        Self { rules }
    }

    /// Add a rule for a kind
    #[must_use]
    pub fn with_rule(mut self, kind: impl Into<String>, rule: Box<dyn Rule<DesignFindings>>) -> Self {
        self.rules.register(kind, rule);
        self
    }

    /// Critique a specification
    #[instrument(skip_all, fields(spec = %spec.id, components = spec.components.len()))]
    pub fn critique(&self, spec: &Specification) -> CritiqueResult {
        let mut findings = DesignFindings::default();

        for (index, node) in spec.components.iter().enumerate() {
            for rule in self.rules.rules_for(&node.kind) {
                let before = findings.issues.len();
                rule.check(index, node, &mut findings);
                if findings.issues.len() > before {
                    debug!(rule = rule.name(), index, "rule reported issues");
                }
            }
        }

        check_page(spec, &mut findings);
        check_consistency(spec, &mut findings);

        let score = score(&findings.issues, &findings.improvements);
        let improved_spec = apply_improvements(spec, &findings.improvements);
        let feedback = DesignFeedback {
            score,
            issues: findings.issues,
            improvements: findings.improvements,
        };
        let blocking = feedback.has_errors();

        info!(
            score,
            issues = feedback.issues.len(),
            improvements = feedback.improvements.len(),
            blocking,
            "critique complete"
        );

        CritiqueResult {
            feedback,
            improved_spec,
            blocking,
        }
    }
}

impl Default for Critic {
    fn default() -> Self {
        Self::new()
    }
}

fn check_page(spec: &Specification, findings: &mut DesignFindings) {
    let count = spec.components.len();
    if count > MAX_COMPONENTS {
        findings.issue(
            DesignIssue::new(
                IssueCategory::Layout,
                Severity::Warning,
                format!("Page has {count} components"),
            )
            .with_fix(format!("Keep a page to {MAX_COMPONENTS} components or fewer")),
        );
    }

    if !spec.contains_kind("Button") && !spec.contains_kind("Form") {
        findings.issue(
            DesignIssue::new(
                IssueCategory::Conversion,
                Severity::Suggestion,
                "Page has no primary call to action",
            )
            .with_fix("Add a button or form that leads to the next step"),
        );
    }
}

fn distinct(spec: &Specification, kind: &str, property: &str) -> BTreeSet<String> {
    spec.components_of(kind)
        .filter_map(|(_, node)| node.text(property))
        .map(str::to_string)
        .collect()
}

fn check_consistency(spec: &Specification, findings: &mut DesignFindings) {
    for (kind, property) in [("Button", "size"), ("Card", "variant")] {
        let values = distinct(spec, kind, property);
        if values.len() > MAX_DISTINCT_STYLES {
            let listed: Vec<&str> = values.iter().map(String::as_str).collect();
            findings.issue(
                DesignIssue::new(
                    IssueCategory::Consistency,
                    Severity::Warning,
                    format!(
                        "{kind} components use {} different {property} values ({})",
                        values.len(),
                        listed.join(", ")
                    ),
                )
                .with_fix(format!("Use at most {MAX_DISTINCT_STYLES} {property} values across {kind} components")),
            );
        }
    }
}

/// Design score for a set of findings
#[must_use]
pub fn score(issues: &[DesignIssue], improvements: &[Improvement]) -> u8 {
    let penalty: u32 = issues.iter().map(|i| i.severity.penalty()).sum();
    let mut score = 100u32.saturating_sub(penalty);
    if (1..=3).contains(&improvements.len()) {
        score = (score + IMPROVEMENT_BONUS).min(100);
    }
    u8::try_from(score).unwrap_or(100)
}

fn apply_improvements(spec: &Specification, improvements: &[Improvement]) -> Specification {
    if improvements.is_empty() {
        return spec.clone();
    }
    let mut improved = spec.revise();
    for improvement in improvements {
        improved.apply_patch(improvement.component, &improvement.patch);
    }
    improved
}

fn capability_for(category: IssueCategory) -> Capability {
    match category {
        IssueCategory::Consistency | IssueCategory::Hierarchy => Capability::DesignTokens,
        IssueCategory::Layout => Capability::LayoutRules,
        IssueCategory::Content | IssueCategory::Conversion => Capability::UxHeuristics,
    }
}

/// Fill `guidance` on every issue from the capability providers
///
/// Never touches scores or severities.
pub async fn annotate(feedback: &mut DesignFeedback, providers: &ProviderSet) {
    for issue in &mut feedback.issues {
        let capability = capability_for(issue.category);
        issue.guidance = providers.lookup(capability, issue.category.as_str()).await;
    }
}
