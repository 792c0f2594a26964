//! # Error Hierarchy
//!
//! Structured error types shared across the workspace, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! Subsystem-specific errors (store, ledger, check-in) live with their
//! subsystems; this module holds only the errors the foundational types
//! themselves can produce.

use thiserror::Error;

/// Domain-primitive validation failures.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A student id was empty, overlong, or contained control characters.
    #[error("invalid student id: {0:?}")]
    InvalidStudentId(String),

    /// A provider uid was empty.
    #[error("invalid provider uid: {0:?}")]
    InvalidProviderUid(String),

    /// A required field was missing or empty.
    #[error("missing required field: {field}")]
    MissingField {
        /// The field name as stored.
        field: &'static str,
    },
}

/// Identity-provider failures.
///
/// The sign-in protocol itself belongs to the external provider; these
/// variants cover what callers of the [`crate::IdentityProvider`] seam
/// can observe.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// A guarded operation was attempted without a signed-in identity.
    #[error("authentication required")]
    Required,

    /// The user dismissed the interactive sign-in flow.
    #[error("sign-in cancelled by user")]
    Cancelled,

    /// The provider could not be reached or returned a failure.
    #[error("identity provider unavailable: {0}")]
    ProviderUnavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ValidationError::InvalidStudentId("  ".to_string());
        assert_eq!(format!("{err}"), "invalid student id: \"  \"");
    }

    #[test]
    fn auth_error_display() {
        assert_eq!(format!("{}", AuthError::Required), "authentication required");
    }
}
