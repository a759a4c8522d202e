//! Capability providers
//!
//! Read-only knowledge sources the stages may consult for narrative text.
//! Providers never decide outcomes: a missing provider, a failed lookup or a
//! timeout simply yields no guidance.

use async_trait::async_trait;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;

/// Kind of knowledge a provider serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Colour, spacing and size scales
    DesignTokens,
    /// Arrangement and density rules
    LayoutRules,
    /// Accessibility guideline text, keyed by rule id
    AccessibilityGuidelines,
    /// Usability heuristics, keyed by issue category
    UxHeuristics,
}

impl Capability {
    /// Stable lowercase name
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DesignTokens => "design_tokens",
            Self::LayoutRules => "layout_rules",
            Self::AccessibilityGuidelines => "accessibility_guidelines",
            Self::UxHeuristics => "ux_heuristics",
        }
    }
}

/// Provider errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    /// Provider could not be reached
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Provider answered with something unusable
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),
}

/// A knowledge source
#[async_trait]
pub trait CapabilityProvider: Send + Sync + Debug {
    /// Which capability this provider serves
    fn capability(&self) -> Capability;

    /// Look up narrative text for a topic
    ///
    /// # Errors
    /// Returns error if the provider cannot answer; callers treat this the
    /// same as "no guidance".
    async fn lookup(&self, topic: &str) -> Result<Option<String>, ProviderError>;
}

/// In-process provider backed by a fixed table
#[derive(Debug, Clone)]
pub struct StaticProvider {
    capability: Capability,
    entries: HashMap<String, String>,
}

impl StaticProvider {
    /// Empty provider for a capability
    #[must_use]
    pub fn new(capability: Capability) -> Self {
        Self {
            capability,
            entries: HashMap::new(),
        }
    }

    /// With an entry
    #[inline]
    #[must_use]
    pub fn with_entry(mut self, topic: impl Into<String>, text: impl Into<String>) -> Self {
        self.entries.insert(topic.into(), text.into());
        self
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if provider has no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[async_trait]
impl CapabilityProvider for StaticProvider {
    fn capability(&self) -> Capability {
        self.capability
    }

    async fn lookup(&self, topic: &str) -> Result<Option<String>, ProviderError> {
        Ok(self.entries.get(topic).cloned())
    }
}

/// At most one provider per capability
#[derive(Debug, Clone, Default)]
pub struct ProviderSet {
    providers: HashMap<Capability, Arc<dyn CapabilityProvider>>,
}

impl ProviderSet {
    /// No providers
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in static providers for all four capabilities
    #[must_use]
    pub fn builtin() -> Self {
        let mut set = Self::new();
        set.install(Arc::new(builtin_guidelines()));
        set.install(Arc::new(builtin_heuristics()));
        set.install(Arc::new(
            StaticProvider::new(Capability::DesignTokens)
                .with_entry(
                    "consistency",
                    "Stick to one step of the size scale (xs, sm, md, lg, xl) per component family.",
                )
                .with_entry(
                    "hierarchy",
                    "Reserve the primary variant for the single most important action.",
                ),
        ));
        set.install(Arc::new(
            StaticProvider::new(Capability::LayoutRules)
                .with_entry(
                    "layout",
                    "Group related content and keep a page to about seven top-level sections.",
                ),
        ));
        set
    }

    /// Install (or replace) the provider for its capability
    pub fn install(&mut self, provider: Arc<dyn CapabilityProvider>) {
        self.providers.insert(provider.capability(), provider);
    }

    /// Provider for a capability
    #[must_use]
    pub fn get(&self, capability: Capability) -> Option<Arc<dyn CapabilityProvider>> {
        self.providers.get(&capability).cloned()
    }

    /// Number of installed providers
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Check if no provider is installed
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Look up a topic, folding every failure into `None`
    pub async fn lookup(&self, capability: Capability, topic: &str) -> Option<String> {
        let provider = self.providers.get(&capability)?;
        match provider.lookup(topic).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(capability = capability.as_str(), topic, "provider lookup failed: {}", e);
                None
            }
        }
    }
}

fn builtin_guidelines() -> StaticProvider {
    StaticProvider::new(Capability::AccessibilityGuidelines)
        .with_entry(
            "button-name",
            "WCAG 4.1.2 Name, Role, Value: every control needs a programmatic name.",
        )
        .with_entry(
            "form-label",
            "WCAG 3.3.2 Labels or Instructions: inputs need a visible, associated label.",
        )
        .with_entry(
            "modal-name",
            "WCAG 4.1.2 Name, Role, Value: dialogs need an accessible name.",
        )
        .with_entry(
            "modal-close",
            "WCAG 2.1.2 No Keyboard Trap: users must be able to leave a dialog with the keyboard.",
        )
        .with_entry(
            "image-alt",
            "WCAG 1.1.1 Non-text Content: images need a text alternative.",
        )
        .with_entry(
            "chart-description",
            "WCAG 1.1.1 Non-text Content: charts need a textual summary of the data.",
        )
        .with_entry(
            "nav-label",
            "WCAG 2.4.4 Link Purpose: icon links need text that says where they go.",
        )
        .with_entry(
            "touch-target",
            "WCAG 2.5.8 Target Size: interactive targets should be at least 24 by 24 CSS pixels.",
        )
        .with_entry(
            "region-heading",
            "WCAG 2.4.6 Headings and Labels: sections should be introduced by a heading.",
        )
        .with_entry(
            "input-autocomplete",
            "WCAG 1.3.5 Identify Input Purpose: personal-data fields should declare autocomplete.",
        )
}

fn builtin_heuristics() -> StaticProvider {
    StaticProvider::new(Capability::UxHeuristics)
        .with_entry(
            "content",
            "Match between system and the real world: use the words your users use.",
        )
        .with_entry(
            "hierarchy",
            "Aesthetic and minimalist design: every extra element competes with the relevant ones.",
        )
        .with_entry(
            "conversion",
            "Visibility of system status: make the next step obvious with one clear call to action.",
        )
        .with_entry(
            "layout",
            "Recognition rather than recall: keep related controls close together.",
        )
        .with_entry(
            "consistency",
            "Consistency and standards: the same thing should look the same everywhere.",
        )
}
