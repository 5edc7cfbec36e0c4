//! Credential Store Boundary
//!
//! The external system of record for users, sessions and token issuance.
//! Implementations are constructed once at startup and handed to every use
//! case; there is no global client.
//!
//! Every call is single-shot. Implementations must not retry: the caller
//! decides whether a failure fails open or closed.

use crate::domain::entity::{CookiePair, SessionGrant, SessionView, SignedToken};
use crate::domain::value_object::Credentials;
use crate::error::AuthResult;

/// Credential store trait
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Sign in with email and password.
    ///
    /// `InvalidCredentials` for rejected credentials, `UpstreamUnavailable`
    /// for anything else that went wrong.
    async fn create_session(&self, credentials: &Credentials) -> AuthResult<SessionGrant>;

    /// Create an account; the store signs the new user in immediately.
    async fn register(&self, credentials: &Credentials) -> AuthResult<SessionGrant>;

    /// Check the session the cookies describe.
    ///
    /// Both cookies are forwarded as-is. `SessionInvalid` when the store does
    /// not recognise them.
    async fn validate_session(&self, cookies: &CookiePair) -> AuthResult<SessionView>;

    /// Mint a fresh token for a session.
    ///
    /// `TokenRefreshFailed` when no token could be obtained.
    async fn issue_token(&self, session_id: &str) -> AuthResult<SignedToken>;

    /// Invalidate a session.
    async fn revoke_session(&self, session_id: &str) -> AuthResult<()>;
}
