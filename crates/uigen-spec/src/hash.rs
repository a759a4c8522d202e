//! Content fingerprints
//!
//! [`ContentHash`] is a Blake3 digest over a specification's content or an
//! export package's files. Ids and timestamps never feed into it.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Blake3 fingerprint, serialized as lowercase hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentHash([u8; 32]);

impl ContentHash {
    #[must_use]
    pub const fn new(digest: [u8; 32]) -> Self {
        Self(digest)
    }

    /// Fingerprint of the JSON encoding of `value`
    ///
    /// # Errors
    /// Returns [`HashError::Serialization`] if `value` cannot be encoded
    pub fn compute_serializable<T>(value: &T) -> Result<Self, HashError>
    where
        T: serde::Serialize,
    {
        let json = serde_json::to_vec(value)?;
        Ok(Self::new(*blake3::hash(&json).as_bytes()))
    }

    /// First 16 hex chars, for logs and summaries
    #[must_use]
    pub fn short(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl Display for ContentHash {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl FromStr for ContentHash {
    type Err = HashError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        let digest: [u8; 32] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| HashError::InvalidLength(bytes.len()))?;
        Ok(Self(digest))
    }
}

impl serde::Serialize for ContentHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for ContentHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("fingerprint must be 32 bytes, got {0}")]
    InvalidLength(usize),

    #[error("fingerprint is not hex: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("cannot encode value for fingerprinting: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn equal_values_share_a_fingerprint() {
        let a = ContentHash::compute_serializable(&("PricingTable", 3)).unwrap();
        let b = ContentHash::compute_serializable(&("PricingTable", 3)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, ContentHash::compute_serializable(&("Dashboard", 3)).unwrap());
    }

    #[test]
    fn json_form_is_full_hex() {
        let hash = ContentHash::compute_serializable(&"uigen").unwrap();
        let json = serde_json::to_string(&hash).unwrap();
        assert_eq!(json, format!("\"{hash}\""));
        assert_eq!(json.len(), 64 + 2);
        assert!(json[1..].starts_with(&hash.short()));

        let back: ContentHash = serde_json::from_str(&json).unwrap();
        assert_eq!(back, hash);
    }

    #[test]
    fn truncated_fingerprint_is_rejected() {
        let err = "abcd".parse::<ContentHash>().unwrap_err();
        assert!(matches!(err, HashError::InvalidLength(2)));
        assert!(serde_json::from_str::<ContentHash>("\"zz\"").is_err());
    }
}
