//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshTokenUseCase, RegisterUseCase,
    ValidateSessionUseCase,
};
use crate::domain::credential_store::CredentialStore;
use crate::error::{AuthError, AuthResult};
use crate::infra::resource_api::ResourceApiClient;
use crate::presentation::cookies::{read_cookie_pair, render_writes};
use crate::presentation::extract::JsonBody;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, LogoutResponse, RefreshResponse, RegisterRequest,
    SessionResponse,
};

/// Shared state for auth handlers
pub struct AuthAppState<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<S> Clone for AuthAppState<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<S>(
    State(state): State<AuthAppState<S>>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.store.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let set_cookies = render_writes(&state.config, &output.writes)?;

    Ok((
        StatusCode::OK,
        set_cookies,
        Json(LoginResponse {
            success: true,
            user: output.user,
        }),
    ))
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<S>(
    State(state): State<AuthAppState<S>>,
    JsonBody(req): JsonBody<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.store.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let set_cookies = render_writes(&state.config, &output.writes)?;

    Ok((
        StatusCode::OK,
        set_cookies,
        Json(LoginResponse {
            success: true,
            user: output.user,
        }),
    ))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<S>(
    State(state): State<AuthAppState<S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let cookies = read_cookie_pair(&headers, &state.config);

    let writes = LogoutUseCase::new(state.store.clone())
        .execute(&cookies)
        .await;

    let set_cookies = render_writes(&state.config, &writes)?;

    Ok((StatusCode::OK, set_cookies, Json(LogoutResponse { success: true })))
}

// ============================================================================
// Session
// ============================================================================

/// GET /api/auth/session
///
/// "No session" is a normal answer here, not an error. An unreachable
/// store is a 502 and leaves the cookies alone.
pub async fn session<S>(
    State(state): State<AuthAppState<S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let cookies = read_cookie_pair(&headers, &state.config);

    let output = ValidateSessionUseCase::new(state.store.clone())
        .execute(&cookies)
        .await?;

    let set_cookies = render_writes(&state.config, &output.writes)?;

    let body = match output.session {
        Some(validated) => SessionResponse {
            user: Some(validated.user),
            session: Some(validated.session),
        },
        None => SessionResponse::default(),
    };

    Ok((StatusCode::OK, set_cookies, Json(body)))
}

// ============================================================================
// Refresh
// ============================================================================

/// POST /api/auth/refresh
pub async fn refresh<S>(
    State(state): State<AuthAppState<S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let cookies = read_cookie_pair(&headers, &state.config);

    let output = RefreshTokenUseCase::new(state.store.clone())
        .execute(&cookies)
        .await;

    let set_cookies = render_writes(&state.config, &output.writes)?;

    Ok((
        StatusCode::OK,
        set_cookies,
        Json(RefreshResponse {
            refreshed: output.token.is_some(),
        }),
    ))
}

// ============================================================================
// Resource API proxy
// ============================================================================

/// Shared state for the todo proxy
pub struct ResourceProxyState<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub auth: AuthAppState<S>,
    pub resource: Arc<ResourceApiClient>,
}

impl<S> Clone for ResourceProxyState<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            auth: self.auth.clone(),
            resource: self.resource.clone(),
        }
    }
}

/// Validate the session, then forward as the session's user.
///
/// Cookie writes from validation ride on every response, including the
/// 401 that follows a failed check. A store outage is a 502 with no writes.
async fn forward<S>(
    state: &ResourceProxyState<S>,
    headers: &HeaderMap,
    method: Method,
    path: String,
    body: Option<Value>,
) -> AuthResult<Response>
where
    S: CredentialStore + Send + Sync + 'static,
{
    let config = &state.auth.config;
    let cookies = read_cookie_pair(headers, config);

    let output = ValidateSessionUseCase::new(state.auth.store.clone())
        .execute(&cookies)
        .await?;

    let set_cookies = render_writes(config, &output.writes)?;

    let Some(validated) = output.session else {
        return Ok((set_cookies, AuthError::SessionInvalid).into_response());
    };

    match state
        .resource
        .forward(method, &path, &validated.user.id, body)
        .await
    {
        Ok(upstream) => Ok(match upstream.body {
            Some(body) => (upstream.status, set_cookies, Json(body)).into_response(),
            None => (upstream.status, set_cookies).into_response(),
        }),
        Err(e) => Ok((set_cookies, e).into_response()),
    }
}

fn todo_path(id: &str) -> String {
    format!("/api/todos/{}", urlencoding::encode(id))
}

/// GET /api/todos
pub async fn list_todos<S>(
    State(state): State<ResourceProxyState<S>>,
    headers: HeaderMap,
) -> AuthResult<Response>
where
    S: CredentialStore + Send + Sync + 'static,
{
    forward(&state, &headers, Method::GET, "/api/todos".to_string(), None).await
}

/// POST /api/todos
pub async fn create_todo<S>(
    State(state): State<ResourceProxyState<S>>,
    headers: HeaderMap,
    JsonBody(body): JsonBody<Value>,
) -> AuthResult<Response>
where
    S: CredentialStore + Send + Sync + 'static,
{
    forward(
        &state,
        &headers,
        Method::POST,
        "/api/todos".to_string(),
        Some(body),
    )
    .await
}

/// GET /api/todos/{id}
pub async fn get_todo<S>(
    State(state): State<ResourceProxyState<S>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> AuthResult<Response>
where
    S: CredentialStore + Send + Sync + 'static,
{
    forward(&state, &headers, Method::GET, todo_path(&id), None).await
}

/// PUT /api/todos/{id}
pub async fn update_todo<S>(
    State(state): State<ResourceProxyState<S>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    JsonBody(body): JsonBody<Value>,
) -> AuthResult<Response>
where
    S: CredentialStore + Send + Sync + 'static,
{
    forward(&state, &headers, Method::PUT, todo_path(&id), Some(body)).await
}

/// DELETE /api/todos/{id}
pub async fn delete_todo<S>(
    State(state): State<ResourceProxyState<S>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> AuthResult<Response>
where
    S: CredentialStore + Send + Sync + 'static,
{
    forward(&state, &headers, Method::DELETE, todo_path(&id), None).await
}
