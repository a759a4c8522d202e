//! Testing utilities for the uigen workspace
//!
//! Shared fixtures and assertions.

#![allow(missing_docs)]

use uigen_core::{ErrorCode, Orchestrator, PipelineConfig, PipelineResult, StageError};
use uigen_spec::{ComponentNode, LayoutHints, Specification};

pub fn setup_test_orchestrator() -> Orchestrator {
    Orchestrator::new(PipelineConfig::new())
}

pub fn setup_auto_apply_orchestrator() -> Orchestrator {
    let config = PipelineConfig::new()
        .with_auto_apply_improvements(true)
        .with_auto_apply_fixes(true);
    Orchestrator::new(config)
}

pub fn node(kind: &str) -> ComponentNode {
    ComponentNode::new(kind).unwrap()
}

pub fn labelled_button(label: &str) -> ComponentNode {
    node("Button").with_prop("label", label)
}

pub fn icon_only_button(icon: &str) -> ComponentNode {
    node("Button").with_prop("icon", icon)
}

/// Two components, no findings that block anything
pub fn sample_spec() -> Specification {
    Specification::new()
        .with_name("Sample")
        .with_description("Sample page")
        .with_layout(LayoutHints::default())
        .with_component(
            node("Card")
                .with_prop("title", "Fast setup")
                .with_prop("description", "Running in minutes"),
        )
        .with_component(labelled_button("Get started"))
}

/// One icon-only button: a single critical violation
pub fn inaccessible_spec() -> Specification {
    Specification::new()
        .with_name("Toolbar")
        .with_component(icon_only_button("settings"))
}

pub fn error_codes(result: &PipelineResult) -> Vec<ErrorCode> {
    result.errors.iter().map(|e| e.code).collect()
}

pub fn assert_error(result: &PipelineResult, code: ErrorCode) -> &StageError {
    result
        .error(code)
        .unwrap_or_else(|| panic!("expected {:?} in {:?}", code, error_codes(result)))
}
