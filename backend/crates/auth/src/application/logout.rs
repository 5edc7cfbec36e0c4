//! Logout Use Case
//!
//! Revokes the session at the store when possible, then clears both
//! cookies regardless of the outcome.

use std::sync::Arc;

use crate::domain::credential_store::CredentialStore;
use crate::domain::entity::{CookiePair, CookieWrites};

/// Logout use case
pub struct LogoutUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> LogoutUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Always clears both cookies; a store outage must not keep the browser
    /// in a stale authenticated state.
    pub async fn execute(&self, cookies: &CookiePair) -> CookieWrites {
        match cookies.session.as_deref() {
            Some(session_id) => match self.store.revoke_session(session_id).await {
                Ok(()) => tracing::info!("User signed out"),
                Err(e) => {
                    tracing::warn!(error = %e, "Session revocation failed, clearing cookies anyway");
                }
            },
            None => tracing::debug!("Sign-out without session cookie, nothing to revoke"),
        }

        CookieWrites::clear_all()
    }
}
