//! Access credentials for the roster spreadsheet.
//!
//! Token acquisition happens elsewhere; this module only holds the result.
//! A [`CredentialSlot`] is shared between whoever signs in and out and the
//! sheet reader, which checks it before every request.

use crate::SheetError;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// An OAuth bearer token
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wrap a token; blank tokens are rejected
    pub fn bearer(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token.trim().to_string()))
        }
    }

    pub fn token(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Shared, replaceable credential
#[derive(Clone, Debug, Default)]
pub struct CredentialSlot {
    inner: Arc<RwLock<Option<Credential>>>,
}

impl CredentialSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(credential: Credential) -> Self {
        let slot = Self::new();
        slot.set(credential);
        slot
    }

    /// Sign in
    pub fn set(&self, credential: Credential) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(credential);
    }

    /// Sign out
    pub fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    pub fn get(&self) -> Option<Credential> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn is_signed_in(&self) -> bool {
        self.get().is_some()
    }

    /// Current credential, or [`SheetError::Unauthenticated`]
    pub fn require(&self) -> Result<Credential, SheetError> {
        self.get().ok_or(SheetError::Unauthenticated)
    }
}
