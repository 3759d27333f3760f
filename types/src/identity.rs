//! Caller identities and license numbers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The ledger identity of a transaction sender.
///
/// Identifiers are opaque: authorization is equality against the configured
/// registry owner (or a granted reporter), never format inspection. Any
/// non-empty string the ledger hands us is a usable identity.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CallerId(String);

impl CallerId {
    /// Create a caller identity from a raw ledger principal string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw identity string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identity and return the underlying string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CallerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for CallerId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for CallerId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// An officer's license number.
///
/// The type carries any string; admissibility (non-empty, within the
/// configured length cap) is checked at the operation boundary so that a bad
/// license surfaces as a typed error rather than a constructor panic.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LicenseNumber(String);

impl LicenseNumber {
    /// Create a license number from a raw string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Return the raw license string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the license string in bytes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the license string is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for LicenseNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for LicenseNumber {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for LicenseNumber {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
