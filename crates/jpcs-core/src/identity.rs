//! # Identity Provider Seam
//!
//! The external identity provider (Google sign-in in production) is an
//! external collaborator: it issues a verified identity and display
//! profile, and everything else about its protocol stays behind the
//! [`IdentityProvider`] trait.
//!
//! Implementations must be `Send + Sync` so they can be shared across
//! async tasks behind an `Arc`. The trait is object-safe so front ends
//! can select the provider at runtime.

use serde::{Deserialize, Serialize};

use crate::error::AuthError;
use crate::ids::ProviderUid;

/// A verified identity issued by the external provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: ProviderUid,
    pub display_name: String,
    pub email: String,
    pub photo_url: String,
}

/// The identity-provider contract.
///
/// Sign-in is interactive (a popup in the browser incarnation); there is
/// no timeout beyond what the provider itself imposes.
pub trait IdentityProvider: Send + Sync {
    /// Run the interactive sign-in flow and return the verified identity.
    ///
    /// # Errors
    ///
    /// [`AuthError::Cancelled`] when the user dismisses the flow,
    /// [`AuthError::ProviderUnavailable`] when the provider cannot be
    /// reached.
    fn sign_in_interactive(&self) -> Result<Identity, AuthError>;

    /// The currently signed-in identity, if any.
    fn current_identity(&self) -> Option<Identity>;

    /// Sign out; subsequent [`Self::current_identity`] calls return `None`.
    fn sign_out(&self);
}

/// Require a signed-in identity, for guarded operations.
///
/// # Errors
///
/// Returns [`AuthError::Required`] when no identity is present.
pub fn require_identity(provider: &dyn IdentityProvider) -> Result<Identity, AuthError> {
    provider.current_identity().ok_or(AuthError::Required)
}

/// Deterministic in-process provider for tests and the CLI.
#[derive(Debug, Default)]
pub struct MockIdentityProvider {
    identity: std::sync::Mutex<Option<Identity>>,
}

impl MockIdentityProvider {
    /// A provider with nobody signed in.
    pub fn signed_out() -> Self {
        Self::default()
    }

    /// A provider pre-seeded with a signed-in identity.
    pub fn signed_in(identity: Identity) -> Self {
        Self {
            identity: std::sync::Mutex::new(Some(identity)),
        }
    }
}

impl IdentityProvider for MockIdentityProvider {
    fn sign_in_interactive(&self) -> Result<Identity, AuthError> {
        self.current_identity().ok_or(AuthError::Cancelled)
    }

    fn current_identity(&self) -> Option<Identity> {
        self.identity.lock().ok().and_then(|guard| guard.clone())
    }

    fn sign_out(&self) {
        if let Ok(mut guard) = self.identity.lock() {
            *guard = None;
        }
    }
}
