//! Error types for the pipeline
//!
//! Two layers:
//! - typed errors returned by stage functions and the public API
//!   ([`GenerationError`], [`PipelineError`], [`ConfigError`])
//! - [`StageError`], the record the orchestrator keeps in a
//!   [`PipelineResult`](crate::PipelineResult) for every failure it observes

use serde::{Deserialize, Serialize};
use std::fmt;
use uigen_spec::{DesignIssue, Violation};

/// Generation failures (always fatal)
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GenerationError {
    /// Modify requested without a specification to modify
    #[error("no prior specification to modify")]
    NoPriorSpecification,

    /// Request could not be classified and there is nothing to default to
    #[error("request could not be classified as create or modify")]
    UnclassifiedRequest,

    /// Generation itself went wrong
    #[error("generation failed: {0}")]
    InternalFailure(String),
}

/// Errors from the orchestrator's public surface
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// `modify_ui` called before any successful run
    #[error("no current specification; run a create request first")]
    NoCurrentSpecification,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),

    /// TOML could not be parsed
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Value out of range
    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Orchestrator itself
    Orchestrator,
    /// Generation
    Generation,
    /// Design critique
    Critique,
    /// Accessibility validation
    Validation,
    /// Export
    Export,
}

impl Stage {
    /// Stable lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Orchestrator => "orchestrator",
            Self::Generation => "generation",
            Self::Critique => "critique",
            Self::Validation => "validation",
            Self::Export => "export",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable error code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// Modify without prior specification
    NoPriorSpecification,
    /// Unclassifiable request
    UnclassifiedRequest,
    /// Unexpected failure inside a stage
    InternalFailure,
    /// Critique found error-severity issues (non-fatal)
    CritiqueBlocking,
    /// Validation found critical violations (fatal)
    AccessibilityBlocking,
    /// Export failed (non-fatal)
    ExportFailure,
    /// Run was cancelled before a stage started
    Cancelled,
}

impl ErrorCode {
    /// Stable code string
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NoPriorSpecification => "no_prior_specification",
            Self::UnclassifiedRequest => "unclassified_request",
            Self::InternalFailure => "internal_failure",
            Self::CritiqueBlocking => "critique_blocking",
            Self::AccessibilityBlocking => "accessibility_blocking",
            Self::ExportFailure => "export_failure",
            Self::Cancelled => "cancelled",
        }
    }
}

/// A recorded pipeline error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageError {
    /// Stage that produced the error
    pub stage: Stage,
    /// Machine-readable code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
}

impl StageError {
    /// Create a stage error
    #[must_use]
    pub fn new(stage: Stage, code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            stage,
            code,
            message: message.into(),
        }
    }

    /// Record a generation failure
    #[must_use]
    pub fn generation(err: &GenerationError) -> Self {
        let code = match err {
            GenerationError::NoPriorSpecification => ErrorCode::NoPriorSpecification,
            GenerationError::UnclassifiedRequest => ErrorCode::UnclassifiedRequest,
            GenerationError::InternalFailure(_) => ErrorCode::InternalFailure,
        };
        Self::new(Stage::Generation, code, err.to_string())
    }

    /// Record a blocking critique
    #[must_use]
    pub fn critique_blocking(issues: &[DesignIssue]) -> Self {
        let messages: Vec<&str> = issues.iter().map(|i| i.message.as_str()).collect();
        Self::new(
            Stage::Critique,
            ErrorCode::CritiqueBlocking,
            format!("{} design error(s): {}", issues.len(), messages.join("; ")),
        )
    }

    /// Record blocking accessibility violations
    #[must_use]
    pub fn accessibility_blocking<'a>(violations: impl IntoIterator<Item = &'a Violation>) -> Self {
        let rules: Vec<&str> = violations.into_iter().map(|v| v.rule_id.as_str()).collect();
        Self::new(
            Stage::Validation,
            ErrorCode::AccessibilityBlocking,
            format!("{} critical violation(s): {}", rules.len(), rules.join(", ")),
        )
    }

    /// Record a panic caught at a stage boundary
    #[must_use]
    pub fn internal(stage: Stage, detail: impl fmt::Display) -> Self {
        Self::new(
            stage,
            ErrorCode::InternalFailure,
            format!("{stage} stage failed unexpectedly: {detail}"),
        )
    }

    /// True if the error halts the pipeline
    #[inline]
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self.code {
            ErrorCode::CritiqueBlocking | ErrorCode::ExportFailure => false,
            ErrorCode::InternalFailure => !matches!(self.stage, Stage::Critique | Stage::Export),
            _ => true,
        }
    }
}

impl fmt::Display for StageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}] {}", self.stage, self.code.as_str(), self.message)
    }
}
