//! Pipeline configuration
//!
//! Every field has a default, so an empty TOML document is a valid config:
//!
//! ```toml
//! critique_enabled = true
//! export_enabled = true
//! auto_apply_improvements = false
//! auto_apply_fixes = false
//! provider_timeout_ms = 250
//!
//! [export]
//! format = "all"
//! layout = "per_component"
//!
//! [preferences]
//! theme = "dark"
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use uigen_export::ExportOptions;
use uigen_spec::{Properties, PropValue};

/// User style preferences applied to created components
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePreferences {
    /// Visual variant (`modern`, `minimal`, ...)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
    /// Size token
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    /// Colour theme (`light` or `dark`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

impl StylePreferences {
    /// No preferences
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With variant
    #[inline]
    #[must_use]
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// With size
    #[inline]
    #[must_use]
    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.size = Some(size.into());
        self
    }

    /// With theme
    #[inline]
    #[must_use]
    pub fn with_theme(mut self, theme: impl Into<String>) -> Self {
        self.theme = Some(theme.into());
        self
    }

    /// Preferences as a property patch
    #[must_use]
    pub fn as_properties(&self) -> Properties {
        [
            ("variant", &self.variant),
            ("size", &self.size),
            ("theme", &self.theme),
        ]
        .into_iter()
        .filter_map(|(key, value)| {
            value
                .as_ref()
                .map(|v| (key.to_string(), PropValue::from(v.as_str())))
        })
        .collect()
    }

    /// True if nothing is set
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.variant.is_none() && self.size.is_none() && self.theme.is_none()
    }
}

/// Orchestrator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Run the design critique stage
    pub critique_enabled: bool,
    /// Run the export stage
    pub export_enabled: bool,
    /// Adopt the critique's improved specification
    pub auto_apply_improvements: bool,
    /// Adopt the validator's fixed specification
    pub auto_apply_fixes: bool,
    /// Upper bound on capability-provider lookups per stage
    pub provider_timeout_ms: u64,
    /// Export shape
    pub export: ExportOptions,
    /// Initial style preferences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferences: Option<StylePreferences>,
}

impl PipelineConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With critique on or off
    #[inline]
    #[must_use]
    pub fn with_critique(mut self, enabled: bool) -> Self {
        self.critique_enabled = enabled;
        self
    }

    /// With export on or off
    #[inline]
    #[must_use]
    pub fn with_export(mut self, enabled: bool) -> Self {
        self.export_enabled = enabled;
        self
    }

    /// With auto-applied critique improvements
    #[inline]
    #[must_use]
    pub fn with_auto_apply_improvements(mut self, enabled: bool) -> Self {
        self.auto_apply_improvements = enabled;
        self
    }

    /// With auto-applied accessibility fixes
    #[inline]
    #[must_use]
    pub fn with_auto_apply_fixes(mut self, enabled: bool) -> Self {
        self.auto_apply_fixes = enabled;
        self
    }

    /// With provider timeout
    #[inline]
    #[must_use]
    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
        self
    }

    /// With export options
    #[inline]
    #[must_use]
    pub fn with_export_options(mut self, options: ExportOptions) -> Self {
        self.export = options;
        self
    }

    /// With initial preferences
    #[inline]
    #[must_use]
    pub fn with_preferences(mut self, preferences: StylePreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Provider timeout as a duration
    #[inline]
    #[must_use]
    pub fn provider_timeout(&self) -> Duration {
        Duration::from_millis(self.provider_timeout_ms)
    }

    /// Parse from TOML text
    ///
    /// # Errors
    /// Returns error if the text is not valid TOML for this shape, or a value
    /// is out of range
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.provider_timeout_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "provider_timeout_ms",
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            critique_enabled: true,
            export_enabled: true,
            auto_apply_improvements: false,
            auto_apply_fixes: false,
            provider_timeout_ms: 250,
            export: ExportOptions::default(),
            preferences: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use uigen_export::FileLayout;
    use uigen_spec::ExportFormat;

    #[test]
    fn defaults() {
        let config = PipelineConfig::default();
        assert!(config.critique_enabled);
        assert!(config.export_enabled);
        assert!(!config.auto_apply_improvements);
        assert!(!config.auto_apply_fixes);
        assert_eq!(config.provider_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(PipelineConfig::from_toml_str("").unwrap(), PipelineConfig::default());
    }

    #[test]
    fn partial_toml() {
        let config = PipelineConfig::from_toml_str(
            r#"
            critique_enabled = false
            auto_apply_fixes = true

            [export]
            format = "all"
            layout = "per_component"

            [preferences]
            theme = "dark"
            "#,
        )
        .unwrap();

        assert!(!config.critique_enabled);
        assert!(config.auto_apply_fixes);
        assert_eq!(config.export.format, ExportFormat::All);
        assert_eq!(config.export.layout, FileLayout::PerComponent);
        assert!(config.export.include_stylesheet);
        assert_eq!(config.preferences.unwrap().theme.as_deref(), Some("dark"));
    }

    #[test]
    fn zero_timeout_rejected() {
        let err = PipelineConfig::from_toml_str("provider_timeout_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "provider_timeout_ms", .. }));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "export_enabled = false").unwrap();
        let config = PipelineConfig::load(file.path()).unwrap();
        assert!(!config.export_enabled);
    }

    #[test]
    fn preferences_as_patch() {
        let prefs = StylePreferences::new().with_theme("dark").with_size("lg");
        let patch = prefs.as_properties();
        assert_eq!(patch.len(), 2);
        assert_eq!(patch["theme"].as_str(), Some("dark"));
        assert!(StylePreferences::new().is_empty());
    }
}
