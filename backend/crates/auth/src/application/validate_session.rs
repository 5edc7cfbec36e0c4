//! Validate Session Use Case
//!
//! Reconciles the Cookie Pair with the credential store on every call:
//! fail closed on the session, fail open on the token.
//!
//! Only the store's verdict ends a session. An outage is returned as an
//! error and leaves both cookies where they are.

use std::sync::Arc;

use crate::application::refresh_token::RefreshTokenUseCase;
use crate::domain::credential_store::CredentialStore;
use crate::domain::entity::{AuthUser, CookiePair, CookieWrites, SessionRecord, SignedToken};
use crate::error::{AuthError, AuthResult};

/// A session the store vouched for during this request
#[derive(Debug, Clone)]
pub struct ValidatedSession {
    pub user: AuthUser,
    pub session: SessionRecord,
    /// Freshly minted token, or the one the browser sent if refresh failed
    pub token: Option<SignedToken>,
}

/// Validate output
#[derive(Debug, Default)]
pub struct ValidateSessionOutput {
    pub session: Option<ValidatedSession>,
    pub writes: CookieWrites,
}

impl ValidateSessionOutput {
    fn invalidated() -> Self {
        Self {
            session: None,
            writes: CookieWrites::clear_all(),
        }
    }
}

/// Validate session use case
pub struct ValidateSessionUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> ValidateSessionUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, cookies: &CookiePair) -> AuthResult<ValidateSessionOutput> {
        if cookies.is_empty() {
            return Ok(ValidateSessionOutput::default());
        }

        let view = match self.store.validate_session(cookies).await {
            Ok(view) if view.session.is_expired() => {
                tracing::debug!(user_id = %view.user.id, "Store returned an expired session");
                return Ok(ValidateSessionOutput::invalidated());
            }
            Ok(view) => view,
            Err(AuthError::SessionInvalid) => {
                tracing::debug!(state = ?cookies.state(), "Session rejected by store");
                return Ok(ValidateSessionOutput::invalidated());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Session check failed, cookies kept");
                return Err(e);
            }
        };

        let refresh = RefreshTokenUseCase::new(self.store.clone())
            .execute(cookies)
            .await;

        // Fresh token if one was minted, else whatever the browser holds
        let jar = cookies.apply(&refresh.writes);

        Ok(ValidateSessionOutput {
            session: Some(ValidatedSession {
                user: view.user,
                session: view.session,
                token: jar.token.and_then(SignedToken::new),
            }),
            writes: refresh.writes,
        })
    }
}
