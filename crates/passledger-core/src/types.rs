use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// Opaque, globally unique participant identity.
///
/// Account identifiers are supplied by the caller context of every
/// operation, never minted by the registry. The registry treats them as
/// opaque tokens; the only constraints are non-emptiness and the absence
/// of whitespace, so they survive use in URLs, headers, and storage keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Create an account id, validating the token.
    pub fn new(id: impl Into<String>) -> Result<Self, CoreError> {
        let id = id.into();
        if id.is_empty() {
            return Err(CoreError::InvalidAccountId("empty account id".into()));
        }
        if id.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidAccountId(format!(
                "account id must not contain whitespace: {:?}",
                id
            )));
        }
        Ok(Self(id))
    }

    /// Get the identifier string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Fixed-size content hash identifying an identity document.
///
/// Fingerprints are computed by the caller, never by the registry. The
/// canonical text form is `0x`-prefixed lowercase hex of the 32 digest
/// bytes; parsing also accepts the bare 64-character form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentFingerprint([u8; 32]);

impl DocumentFingerprint {
    /// Wrap a raw 32-byte digest.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Parse from hex, with or without a `0x` prefix.
    pub fn from_hex(s: &str) -> Result<Self, CoreError> {
        let digits = s.strip_prefix("0x").unwrap_or(s);
        if digits.len() != 64 {
            return Err(CoreError::InvalidFingerprint(format!(
                "expected 64 hex digits, got {}",
                digits.len()
            )));
        }
        let raw = hex::decode(digits)
            .map_err(|e| CoreError::InvalidFingerprint(e.to_string()))?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }

    /// The raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Canonical `0x`-prefixed lowercase hex form.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }
}

impl fmt::Display for DocumentFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// Serialized as the canonical hex string so fingerprints stay readable in
// JSON bodies and are usable as JSON map keys.
impl Serialize for DocumentFingerprint {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentFingerprint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct HexVisitor;

        impl serde::de::Visitor<'_> for HexVisitor {
            type Value = DocumentFingerprint;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a 0x-prefixed 64-digit hex string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                DocumentFingerprint::from_hex(v).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(HexVisitor)
    }
}

/// Explicit caller context threaded into every registry operation.
///
/// The original execution environment supplied "who is calling" as
/// ambient context; modeling it as a value makes the dependency visible
/// and testable without a hosting engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallContext {
    /// The identity invoking the operation.
    pub caller: AccountId,
}

impl CallContext {
    /// Build a context for the given caller.
    pub fn new(caller: AccountId) -> Self {
        Self { caller }
    }
}
