//! Credential Store HTTP Client
//!
//! Speaks the credential store's REST protocol. The store identifies a
//! session by its own cookie, so every session-scoped call carries that
//! cookie in a `Cookie` request header.

use std::time::Duration;

use platform::cookie::{cookie_header, extract_set_cookie};
use reqwest::{StatusCode, header};
use serde::{Deserialize, Serialize};

use crate::domain::credential_store::CredentialStore;
use crate::domain::entity::{
    AuthUser, CookiePair, SessionGrant, SessionRecord, SessionView, SignedToken,
};
use crate::domain::value_object::Credentials;
use crate::error::{AuthError, AuthResult};

/// Credential store endpoints
#[derive(Debug, Clone)]
pub struct CredentialStoreConfig {
    pub base_url: String,
    /// Cookie the store uses to identify its sessions
    pub session_cookie_name: String,
    pub sign_in_path: String,
    pub sign_up_path: String,
    pub session_path: String,
    pub token_path: String,
    pub sign_out_path: String,
    pub timeout: Duration,
}

impl Default for CredentialStoreConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8787".to_string(),
            session_cookie_name: "better_auth_session".to_string(),
            sign_in_path: "/api/auth/sign-in/email".to_string(),
            sign_up_path: "/api/auth/sign-up/email".to_string(),
            session_path: "/session".to_string(),
            token_path: "/api/auth/token".to_string(),
            sign_out_path: "/api/auth/sign-out".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl CredentialStoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Serialize)]
struct SignInBody<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
struct SignUpBody<'a> {
    name: &'a str,
    email: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct GrantBody {
    user: AuthUser,
}

#[derive(Deserialize)]
struct SessionBody {
    #[serde(default)]
    user: Option<AuthUser>,
    #[serde(default)]
    session: Option<SessionRecord>,
}

#[derive(Deserialize)]
struct TokenBody {
    #[serde(default)]
    token: Option<String>,
}

#[derive(Deserialize)]
struct StoreErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// reqwest-backed [`CredentialStore`]
#[derive(Clone)]
pub struct HttpCredentialStore {
    config: CredentialStoreConfig,
    http: reqwest::Client,
}

impl HttpCredentialStore {
    pub fn new(config: CredentialStoreConfig) -> AuthResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::Internal(format!("HTTP client setup failed: {e}")))?;

        Ok(Self { config, http })
    }

    /// Use a custom HTTP client (for connection pool reuse or testing)
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    pub fn config(&self) -> &CredentialStoreConfig {
        &self.config
    }

    fn session_cookie(&self, session_id: &str) -> String {
        cookie_header(&self.config.session_cookie_name, session_id)
    }

    /// Pull the session id and user out of a sign-in/sign-up response
    async fn read_grant(&self, response: reqwest::Response) -> AuthResult<SessionGrant> {
        let session_id = extract_set_cookie(response.headers(), &self.config.session_cookie_name)
            .ok_or_else(|| {
                AuthError::UpstreamUnavailable(
                    "credential store did not set a session cookie".to_string(),
                )
            })?;

        let body: GrantBody = response.json().await?;

        Ok(SessionGrant {
            session_id,
            user: body.user,
        })
    }
}

impl CredentialStore for HttpCredentialStore {
    async fn create_session(&self, credentials: &Credentials) -> AuthResult<SessionGrant> {
        let response = self
            .http
            .post(self.config.url(&self.config.sign_in_path))
            .json(&SignInBody {
                email: credentials.email.as_str(),
                password: credentials.password.expose(),
            })
            .send()
            .await?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST
                | StatusCode::UNAUTHORIZED
                | StatusCode::FORBIDDEN
                | StatusCode::UNPROCESSABLE_ENTITY
        ) {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(AuthError::UpstreamUnavailable(format!(
                "sign-in returned {status}"
            )));
        }

        self.read_grant(response).await
    }

    async fn register(&self, credentials: &Credentials) -> AuthResult<SessionGrant> {
        let response = self
            .http
            .post(self.config.url(&self.config.sign_up_path))
            .json(&SignUpBody {
                name: "",
                email: credentials.email.as_str(),
                password: credentials.password.expose(),
            })
            .send()
            .await?;

        let status = response.status();
        if matches!(
            status,
            StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY
        ) {
            let message = response
                .json::<StoreErrorBody>()
                .await
                .ok()
                .and_then(|body| body.message)
                .unwrap_or_else(|| "Registration was rejected".to_string());
            return Err(AuthError::Validation(message));
        }
        if !status.is_success() {
            return Err(AuthError::UpstreamUnavailable(format!(
                "sign-up returned {status}"
            )));
        }

        self.read_grant(response).await
    }

    async fn validate_session(&self, cookies: &CookiePair) -> AuthResult<SessionView> {
        let mut request = self.http.get(self.config.url(&self.config.session_path));
        if let Some(session_id) = cookies.session.as_deref() {
            request = request.header(header::COOKIE, self.session_cookie(session_id));
        }
        if let Some(token) = cookies.token.as_deref() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(AuthError::SessionInvalid);
        }

        // The store answers `null` for an unknown session
        let body: Option<SessionBody> = response.json().await?;
        match body {
            Some(SessionBody {
                user: Some(user),
                session: Some(session),
            }) => Ok(SessionView { user, session }),
            _ => Err(AuthError::SessionInvalid),
        }
    }

    async fn issue_token(&self, session_id: &str) -> AuthResult<SignedToken> {
        let response = self
            .http
            .get(self.config.url(&self.config.token_path))
            .header(header::COOKIE, self.session_cookie(session_id))
            .send()
            .await
            .map_err(|e| {
                tracing::debug!(error = %e, "Token request failed");
                AuthError::TokenRefreshFailed
            })?;

        if !response.status().is_success() {
            tracing::debug!(status = %response.status(), "Token request rejected");
            return Err(AuthError::TokenRefreshFailed);
        }

        let body: TokenBody = response
            .json()
            .await
            .map_err(|_| AuthError::TokenRefreshFailed)?;

        body.token
            .and_then(SignedToken::new)
            .ok_or(AuthError::TokenRefreshFailed)
    }

    async fn revoke_session(&self, session_id: &str) -> AuthResult<()> {
        let response = self
            .http
            .post(self.config.url(&self.config.sign_out_path))
            .header(header::COOKIE, self.session_cookie(session_id))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::UpstreamUnavailable(format!(
                "sign-out returned {status}"
            )));
        }

        Ok(())
    }
}
