//! Side artifacts produced by the stages
//!
//! - [`DesignFeedback`] from critique
//! - [`AccessibilityReport`] from validation
//! - [`ExportPackage`] from export

use crate::hash::ContentHash;
use crate::value::Properties;
use serde::{Deserialize, Serialize};

/// Severity of a design issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Blocks the critique
    Error,
    /// Should be addressed
    Warning,
    /// Nice to have
    Suggestion,
}

impl Severity {
    /// Points subtracted from the design score
    #[inline]
    #[must_use]
    pub fn penalty(&self) -> u32 {
        match self {
            Self::Error => 20,
            Self::Warning => 10,
            Self::Suggestion => 5,
        }
    }
}

/// Area of visual design an issue belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// Copy and labels
    Content,
    /// Visual emphasis and ordering
    Hierarchy,
    /// Density and arrangement
    Layout,
    /// Cross-component uniformity
    Consistency,
    /// Calls to action
    Conversion,
}

impl IssueCategory {
    /// Stable lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Hierarchy => "hierarchy",
            Self::Layout => "layout",
            Self::Consistency => "consistency",
            Self::Conversion => "conversion",
        }
    }
}

/// One design finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DesignIssue {
    /// Category
    pub category: IssueCategory,
    /// Severity
    pub severity: Severity,
    /// What is wrong
    pub message: String,
    /// How to fix it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<String>,
    /// Component position, if the issue is local to one component
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<usize>,
    /// Narrative from a capability provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

impl DesignIssue {
    /// Create an issue
    #[must_use]
    pub fn new(category: IssueCategory, severity: Severity, message: impl Into<String>) -> Self {
        Self {
            category,
            severity,
            message: message.into(),
            suggested_fix: None,
            component: None,
            guidance: None,
        }
    }

    /// With suggested fix
    #[inline]
    #[must_use]
    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.suggested_fix = Some(fix.into());
        self
    }

    /// Attached to a component position
    #[inline]
    #[must_use]
    pub fn at(mut self, index: usize) -> Self {
        self.component = Some(index);
        self
    }
}

/// Proposed partial-property patch for one component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Improvement {
    /// Component position
    pub component: usize,
    /// Properties to merge
    pub patch: Properties,
    /// Why
    pub reason: String,
}

/// Critique output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignFeedback {
    /// 0..=100
    pub score: u8,
    /// Findings
    pub issues: Vec<DesignIssue>,
    /// Proposed patches
    pub improvements: Vec<Improvement>,
}

impl DesignFeedback {
    /// Number of issues at a severity
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.issues.iter().filter(|i| i.severity == severity).count()
    }

    /// True if any issue is an error
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.count(Severity::Error) > 0
    }
}

/// Impact of an accessibility violation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    /// Fails validation on its own
    Critical,
    /// Severe barrier
    Serious,
    /// Noticeable barrier
    Moderate,
    /// Annoyance
    Minor,
}

impl Impact {
    /// Points subtracted from the accessibility score
    #[inline]
    #[must_use]
    pub fn penalty(&self) -> u32 {
        match self {
            Self::Critical => 25,
            Self::Serious => 15,
            Self::Moderate => 10,
            Self::Minor => 5,
        }
    }
}

/// One accessibility violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Rule identifier (`button-name`, `image-alt`, ...)
    pub rule_id: String,
    /// Impact
    pub impact: Impact,
    /// What is wrong
    pub description: String,
    /// How to fix it
    pub fix: String,
    /// Component position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<usize>,
    /// Narrative from a capability provider
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guidance: Option<String>,
}

/// Non-blocking accessibility finding
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityWarning {
    /// Rule identifier
    pub rule_id: String,
    /// What was noticed
    pub description: String,
    /// What to do about it
    pub recommendation: String,
    /// Component position
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<usize>,
}

/// Validation output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessibilityReport {
    /// True iff there are no critical violations
    pub passed: bool,
    /// 0..=100
    pub score: u8,
    /// Violations
    pub violations: Vec<Violation>,
    /// Warnings (never block)
    pub warnings: Vec<AccessibilityWarning>,
}

impl AccessibilityReport {
    /// Number of violations at an impact
    #[must_use]
    pub fn count(&self, impact: Impact) -> usize {
        self.violations.iter().filter(|v| v.impact == impact).count()
    }

    /// Critical violations only
    pub fn critical(&self) -> impl Iterator<Item = &Violation> {
        self.violations
            .iter()
            .filter(|v| v.impact == Impact::Critical)
    }
}

/// Export target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Component source (JSX)
    #[default]
    Jsx,
    /// JSON Schema plus specification document
    Schema,
    /// ASCII tree view
    Tree,
    /// Everything above
    All,
}

impl ExportFormat {
    /// Stable lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Jsx => "jsx",
            Self::Schema => "schema",
            Self::Tree => "tree",
            Self::All => "all",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jsx" | "react" => Ok(Self::Jsx),
            "schema" | "json" => Ok(Self::Schema),
            "tree" => Ok(Self::Tree),
            "all" => Ok(Self::All),
            other => Err(format!("unknown export format: {other}")),
        }
    }
}

/// What an exported file contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileKind {
    /// Component source
    Source,
    /// Stylesheet
    Stylesheet,
    /// JSON document
    Schema,
    /// Packaging manifest
    Manifest,
    /// Plain text
    Text,
}

/// One exported file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFile {
    /// Relative path
    pub name: String,
    /// File contents
    pub content: String,
    /// Content type
    pub kind: FileKind,
}

impl ExportFile {
    /// Create a file entry
    #[must_use]
    pub fn new(name: impl Into<String>, content: impl Into<String>, kind: FileKind) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            kind,
        }
    }
}

/// Export output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportPackage {
    /// Format requested
    pub format: ExportFormat,
    /// Generated files in a stable order
    pub files: Vec<ExportFile>,
    /// How to use the files
    pub instructions: String,
    /// Blake3 over every file name and content
    pub fingerprint: ContentHash,
}

impl ExportPackage {
    /// Find a file by name
    #[must_use]
    pub fn file(&self, name: &str) -> Option<&ExportFile> {
        self.files.iter().find(|f| f.name == name)
    }
}
