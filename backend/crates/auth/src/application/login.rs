//! Login Use Case
//!
//! Exchanges email + password for a Cookie Pair.

use std::sync::Arc;

use crate::domain::credential_store::CredentialStore;
use crate::domain::entity::{AuthUser, CookieKind, CookieWrites, SessionGrant};
use crate::domain::value_object::Credentials;
use crate::error::AuthResult;

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub user: AuthUser,
    /// Session cookie always, token cookie when one could be minted
    pub writes: CookieWrites,
}

/// Login use case
pub struct LoginUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> LoginUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Validate input, sign in at the store, then mint the first token.
    ///
    /// Any store failure during sign-in returns an error and no cookie
    /// writes. Malformed input is rejected before a request is made.
    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let credentials = Credentials::new(input.email, input.password)?;

        let grant = self.store.create_session(&credentials).await?;

        tracing::info!(user_id = %grant.user.id, "User signed in");

        Ok(establish_session(self.store.as_ref(), grant).await)
    }
}

/// Turn a fresh grant into cookie writes.
///
/// The session is already established at this point, so a token issuance
/// failure is tolerated: the session cookie is written alone and the next
/// session check mints the token.
pub(crate) async fn establish_session<S>(store: &S, grant: SessionGrant) -> LoginOutput
where
    S: CredentialStore,
{
    let mut writes = CookieWrites::new();
    writes.set(CookieKind::Session, grant.session_id.as_str());

    match store.issue_token(&grant.session_id).await {
        Ok(token) => writes.set(CookieKind::Token, token.into_inner()),
        Err(e) => {
            tracing::warn!(
                error = %e,
                user_id = %grant.user.id,
                "Token issuance failed after sign-in, session cookie set alone"
            );
        }
    }

    LoginOutput {
        user: grant.user,
        writes,
    }
}
