//! Register Use Case
//!
//! Creates an account. The credential store signs new accounts in, so the
//! result is a Cookie Pair exactly as for login.

use std::sync::Arc;

use crate::application::login::{LoginInput, LoginOutput, establish_session};
use crate::domain::credential_store::CredentialStore;
use crate::domain::value_object::Credentials;
use crate::error::AuthResult;

/// Register use case
pub struct RegisterUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
}

impl<S> RegisterUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        let credentials = Credentials::new(input.email, input.password)?;

        let grant = self.store.register(&credentials).await?;

        tracing::info!(user_id = %grant.user.id, "Account created");

        Ok(establish_session(self.store.as_ref(), grant).await)
    }
}
