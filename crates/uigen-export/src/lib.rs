//! uigen export
//!
//! Deterministic serialization of a [`Specification`](uigen_spec::Specification)
//! into an [`ExportPackage`](uigen_spec::ExportPackage):
//!
//! - JSX component source (single file or one file per component)
//! - JSON Schema plus the specification document
//! - ASCII tree view
//!
//! Each component is first lowered to a [`ConstructionExpr`], a
//! target-neutral list of literals, and then rendered.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod exporter;
mod expr;
mod jsx;
mod options;
mod schema;
mod tree;

pub use error::ExportError;
pub use exporter::export;
pub use expr::{literal, Attribute, ConstructionExpr, Literal};
pub use options::{ExportOptions, FileLayout, Packaging};
pub use tree::render_tree;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
