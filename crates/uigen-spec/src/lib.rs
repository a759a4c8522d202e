//! uigen Specification Model
//!
//! Pure data shared by every pipeline stage.
//!
//! # Core Concepts
//!
//! - [`Specification`]: ordered component tree describing one generated UI
//! - [`ComponentNode`]: one UI element with an open property bag
//! - [`PropValue`]: the closed set of shapes a property value can take
//! - [`DesignFeedback`], [`AccessibilityReport`], [`ExportPackage`]: stage outputs
//! - [`PipelineMessage`] / [`MessageLog`]: append-only inter-stage events
//!
//! # Example
//!
//! ```rust,ignore
//! use uigen_spec::{props, ComponentNode, Specification};
//!
//! let mut spec = Specification::new()
//!     .with_component(ComponentNode::new("Card")?.with_prop("title", "Plans"));
//!
//! let revised = spec.revise();
//! assert_eq!(revised.version(), 2);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod artifacts;
mod hash;
mod message;
mod node;
mod specification;
mod value;

pub use artifacts::{
    AccessibilityReport, AccessibilityWarning, DesignFeedback, DesignIssue, ExportFile,
    ExportFormat, ExportPackage, FileKind, Impact, Improvement, IssueCategory, Severity,
    Violation,
};
pub use hash::{ContentHash, HashError};
pub use message::{MessageId, MessageLog, PipelineMessage, Role};
pub use node::{ComponentNode, NodeMetadata};
pub use specification::{Arrangement, LayoutHints, SpecId, SpecMetadata, Specification};
pub use value::{PropValue, Properties};

/// Specification invariant violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpecError {
    /// Component kind is empty
    #[error("component kind must not be empty")]
    EmptyKind,

    /// A component breaks an invariant
    #[error("component {index} is invalid: {reason}")]
    InvalidComponent { index: usize, reason: String },

    /// Version counter is zero
    #[error("specification version must start at 1")]
    ZeroVersion,
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
