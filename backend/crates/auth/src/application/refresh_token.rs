//! Refresh Token Use Case
//!
//! Mints a new token from the session cookie. "Cannot refresh" is never
//! "session invalid": a failure here leaves every cookie untouched.

use std::sync::Arc;

use crate::domain::credential_store::CredentialStore;
use crate::domain::entity::{CookieKind, CookiePair, CookieWrites, SignedToken};

/// Refresh output
#[derive(Debug, Default)]
pub struct RefreshTokenOutput {
    pub token: Option<SignedToken>,
    pub writes: CookieWrites,
}

/// Refresh token use case
pub struct RefreshTokenUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> RefreshTokenUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Only the session cookie can mint a token; a lone token cookie cannot
    /// renew itself.
    pub async fn execute(&self, cookies: &CookiePair) -> RefreshTokenOutput {
        let Some(session_id) = cookies.session.as_deref() else {
            tracing::debug!("No session cookie, token not refreshed");
            return RefreshTokenOutput::default();
        };

        match self.store.issue_token(session_id).await {
            Ok(token) => {
                let mut writes = CookieWrites::new();
                writes.set(CookieKind::Token, token.as_str());
                tracing::debug!("Token refreshed");
                RefreshTokenOutput {
                    token: Some(token),
                    writes,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, keeping current cookies");
                RefreshTokenOutput::default()
            }
        }
    }
}
