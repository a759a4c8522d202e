//! uigen registries
//!
//! External collaborators of the pipeline, constructed once and passed into
//! the stages that need them:
//!
//! - [`ComponentRegistry`]: which component kinds exist and what properties they take
//! - [`ProviderSet`]: optional knowledge sources that add narrative guidance

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod kinds;
mod providers;

pub use kinds::{ComponentRegistry, KindSchema, PropShape, SchemaIssue};
pub use providers::{Capability, CapabilityProvider, ProviderError, ProviderSet, StaticProvider};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
