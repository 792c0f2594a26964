//! # Identifier Newtypes
//!
//! Domain-primitive newtypes for identifiers throughout JPCSConnect.
//!
//! ## Two identifier families
//!
//! - **Store-assigned document ids** ([`DocId`] and its typed wrappers):
//!   opaque strings minted by the document store on insert. The format is
//!   a base-36 millisecond clock reading followed by base-36 random
//!   entropy, so ids are unique for the process lifetime and insertion
//!   order does not leak through a guessable sequence.
//!
//! - **Human-facing keys** ([`StudentId`], [`ProviderUid`]): validated at
//!   construction. A [`StudentId`] is the value encoded in the student's
//!   QR pass and matched verbatim at check-in.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ValidationError;

/// Helper macro to implement `Deserialize` for string newtypes that must
/// validate their contents. Deserializes as a plain `String`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time — not silently accepted.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// Helper macro for typed wrappers around [`DocId`]. Each collection gets
/// its own id type so ids cannot cross collections by accident.
macro_rules! doc_id_newtype {
    ($(#[$meta:meta])* $ty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $ty(DocId);

        impl $ty {
            /// Mint a fresh identifier.
            pub fn generate() -> Self {
                Self(DocId::generate())
            }

            /// Wrap an existing document id.
            pub fn from_doc_id(id: DocId) -> Self {
                Self(id)
            }

            /// Access the underlying document id.
            pub fn as_doc_id(&self) -> &DocId {
                &self.0
            }

            /// Access the raw string form.
            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl From<DocId> for $ty {
            fn from(id: DocId) -> Self {
                Self(id)
            }
        }

        impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Store-assigned identifiers
// ---------------------------------------------------------------------------

/// An opaque document identifier assigned by the store on insert.
///
/// Format: base-36 UTC milliseconds since the epoch, then 48 bits of
/// base-36 random entropy. Unique across the process lifetime; the random
/// suffix keeps ids from being a guessable insertion counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocId(String);

impl DocId {
    /// Mint a fresh document id from the current clock and fresh entropy.
    pub fn generate() -> Self {
        let millis = chrono::Utc::now().timestamp_millis().unsigned_abs() as u128;
        // Low 48 bits of a v4 UUID are plenty of entropy for one process.
        let entropy = Uuid::new_v4().as_u128() & 0xffff_ffff_ffff;
        Self(format!("{}{}", to_base36(millis), to_base36(entropy)))
    }

    /// Wrap an existing raw id (e.g. read back from storage).
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Access the raw string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DocId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

/// Encode an unsigned value in lowercase base 36.
fn to_base36(mut n: u128) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut buf = Vec::new();
    while n > 0 {
        buf.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    buf.reverse();
    // Only ASCII digits and lowercase letters are pushed above.
    String::from_utf8(buf).unwrap_or_default()
}

doc_id_newtype! {
    /// Identifier for an event document.
    EventId
}

doc_id_newtype! {
    /// Identifier for a registration document.
    RegistrationId
}

doc_id_newtype! {
    /// Identifier for an attendance document.
    AttendanceId
}

doc_id_newtype! {
    /// Identifier for an announcement document.
    AnnouncementId
}

doc_id_newtype! {
    /// Identifier for a custom badge document.
    BadgeId
}

// ---------------------------------------------------------------------------
// Human-facing keys (validated at construction)
// ---------------------------------------------------------------------------

/// A student's human-facing id — the value their QR pass encodes.
///
/// # Validation
///
/// - Leading/trailing whitespace is trimmed before storage.
/// - Must be non-empty after trimming.
/// - Must be at most 64 characters and contain no control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct StudentId(String);

impl_validating_deserialize!(StudentId);

impl StudentId {
    /// Create a student id, validating format.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidStudentId`] if the value is empty
    /// after trimming, too long, or contains control characters.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty()
            || trimmed.chars().count() > 64
            || trimmed.chars().any(char::is_control)
        {
            return Err(ValidationError::InvalidStudentId(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Access the id string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for StudentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The identity provider's opaque uid for a signed-in user.
///
/// No internal structure is assumed beyond being non-empty; the provider
/// owns the format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ProviderUid(String);

impl_validating_deserialize!(ProviderUid);

impl ProviderUid {
    /// Create a provider uid.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidProviderUid`] if the value is
    /// empty after trimming.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if raw.trim().is_empty() {
            return Err(ValidationError::InvalidProviderUid(raw));
        }
        Ok(Self(raw))
    }

    /// Access the uid string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProviderUid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
