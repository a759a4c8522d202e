//! Export errors

/// Errors during export (egress)
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// Component kind cannot be used as a component identifier
    #[error("component {index}: kind '{kind}' is not a valid component identifier")]
    InvalidKindIdentifier { index: usize, kind: String },

    /// Property name cannot be used as an attribute name
    #[error("component {index}: property '{property}' is not a valid attribute name")]
    InvalidPropertyName { index: usize, property: String },

    /// JSON serialization failed
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExportError {
    /// Component position the error refers to, if any
    #[must_use]
    pub fn component(&self) -> Option<usize> {
        match self {
            Self::InvalidKindIdentifier { index, .. } | Self::InvalidPropertyName { index, .. } => {
                Some(*index)
            }
            Self::Serialization(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_position() {
        let err = ExportError::InvalidKindIdentifier {
            index: 2,
            kind: "my widget".into(),
        };
        assert!(err.to_string().contains("component 2"));
        assert_eq!(err.component(), Some(2));
    }
}
