//! Export options
//!
//! Options shape the output only; they never change component content.

use serde::{Deserialize, Serialize};
use uigen_spec::ExportFormat;

/// How component source is split into files
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FileLayout {
    /// One `App.jsx`
    #[default]
    SingleFile,
    /// One file per component plus an `App.jsx` that composes them
    PerComponent,
}

/// Packaging convention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Packaging {
    /// Bare files
    #[default]
    Plain,
    /// Adds `package.json` and an `index.js` entry point
    Npm,
}

/// Export options
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Output format
    pub format: ExportFormat,
    /// Source file layout
    pub layout: FileLayout,
    /// Emit `styles.css` next to the source
    pub include_stylesheet: bool,
    /// Packaging convention
    pub packaging: Packaging,
}

impl ExportOptions {
    /// Default options
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With format
    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: ExportFormat) -> Self {
        self.format = format;
        self
    }

    /// With file layout
    #[inline]
    #[must_use]
    pub fn with_layout(mut self, layout: FileLayout) -> Self {
        self.layout = layout;
        self
    }

    /// With or without stylesheet
    #[inline]
    #[must_use]
    pub fn with_stylesheet(mut self, include: bool) -> Self {
        self.include_stylesheet = include;
        self
    }

    /// With packaging
    #[inline]
    #[must_use]
    pub fn with_packaging(mut self, packaging: Packaging) -> Self {
        self.packaging = packaging;
        self
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jsx,
            layout: FileLayout::SingleFile,
            include_stylesheet: true,
            packaging: Packaging::Plain,
        }
    }
}
