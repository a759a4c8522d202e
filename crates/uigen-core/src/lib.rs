//! uigen Core - the UI generation pipeline
//!
//! Turns a short natural-language request into a validated, exportable UI
//! specification:
//! - Classifies the request and builds a specification from templates
//! - Critiques the design and proposes property patches
//! - Validates accessibility (the only hard gate)
//! - Exports the result deterministically
//! - Keeps conversation state across requests
//!
//! # Example
//!
//! ```rust,ignore
//! use uigen_core::{Orchestrator, PipelineConfig};
//!
//! # async fn example() {
//! let mut orchestrator = Orchestrator::new(PipelineConfig::new());
//!
//! let result = orchestrator.process_request("Create a pricing page").await;
//! assert!(result.success);
//!
//! let revised = orchestrator.process_request("make it more modern").await;
//! println!("version {}", revised.specification.unwrap().version());
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod context;
pub mod critique;
pub mod error;
pub mod generation;
pub mod orchestrator;
pub mod rulebook;
pub mod state;
pub mod validation;

pub use config::{PipelineConfig, StylePreferences};
pub use context::{ConversationContext, ConversationId};
pub use critique::{Critic, CritiqueResult};
pub use error::{ConfigError, ErrorCode, GenerationError, PipelineError, Stage, StageError};
pub use generation::{GenerationRequest, Generator, RequestKind, Topic};
pub use orchestrator::{Orchestrator, PipelineResult};
pub use rulebook::{FnRule, Rule, RuleBook};
pub use state::{allowed_transitions, validate_transition, IllegalTransition, PipelineState};
pub use validation::{ValidationResult, Validator};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving the pipeline
    pub use crate::{
        ErrorCode, Orchestrator, PipelineConfig, PipelineResult, PipelineState, StageError,
        StylePreferences,
    };
    pub use uigen_export::{ExportOptions, FileLayout, Packaging};
    pub use uigen_spec::{ExportFormat, Specification};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
