//! Human-readable run summaries

use std::fmt::Write as _;
use uigen_core::PipelineResult;
use uigen_export::render_tree;

/// One-screen summary of a run
pub(crate) fn summarize(result: &PipelineResult) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "state: {:?}  success: {}  ({} ms)",
        result.state, result.success, result.duration_ms
    );

    if let Some(spec) = &result.specification {
        let _ = writeln!(
            out,
            "specification: {:?} v{} ({} component(s))",
            spec.name.as_deref().unwrap_or("Untitled"),
            spec.version(),
            spec.components.len()
        );
    }
    if let Some(feedback) = &result.feedback {
        let _ = writeln!(
            out,
            "critique: score {}, {} issue(s), {} improvement(s)",
            feedback.score,
            feedback.issues.len(),
            feedback.improvements.len()
        );
    }
    if let Some(report) = &result.report {
        let _ = writeln!(
            out,
            "validation: {}, score {}, {} violation(s), {} warning(s)",
            if report.passed { "passed" } else { "FAILED" },
            report.score,
            report.violations.len(),
            report.warnings.len()
        );
        for v in &report.violations {
            let _ = writeln!(out, "  - {:?} {}: {}", v.impact, v.rule_id, v.description);
        }
    }
    if let Some(export) = &result.export {
        let _ = writeln!(
            out,
            "export: {} file(s), fingerprint {}",
            export.files.len(),
            export.fingerprint.short()
        );
    }
    for err in &result.errors {
        let _ = writeln!(out, "error: {err}");
    }
    if let Some(spec) = &result.specification {
        out.push('\n');
        out.push_str(&render_tree(spec));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use uigen_test_utils::setup_test_orchestrator;

    #[tokio::test]
    async fn summary_lists_every_stage() {
        let result = setup_test_orchestrator()
            .process_request("Create a pricing page")
            .await;
        let text = summarize(&result);
        assert!(text.starts_with("state: Done  success: true"));
        assert!(text.contains("validation: passed"));
        assert!(text.contains("export: 2 file(s)"));
        assert!(text.contains("PricingTable #0"));
    }

    #[tokio::test]
    async fn summary_shows_blocking_violation() {
        let result = setup_test_orchestrator()
            .process_request("Create an icon button")
            .await;
        let text = summarize(&result);
        assert!(text.contains("validation: FAILED"));
        assert!(text.contains("Critical button-name"));
        assert!(text.contains("error: [validation:accessibility_blocking]"));
    }
}
