//! Resource API Client
//!
//! Forwards todo calls to the downstream resource API on behalf of a user
//! whose session was already validated. The user is asserted through the
//! `X-User-ID` header; the API trusts this service, not the browser.

use std::time::Duration;

use axum::http::{Method, StatusCode};
use serde_json::Value;

use crate::error::{AuthError, AuthResult};

/// Header carrying the asserted user identity
pub const USER_ID_HEADER: &str = "X-User-ID";

#[derive(Debug, Clone)]
pub struct ResourceApiConfig {
    pub base_url: String,
    /// Service credential sent as `Authorization: Bearer`
    pub api_token: Option<String>,
    pub timeout: Duration,
}

impl Default for ResourceApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8787".to_string(),
            api_token: None,
            timeout: Duration::from_secs(10),
        }
    }
}

/// Status and JSON body relayed from the resource API
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

#[derive(Clone)]
pub struct ResourceApiClient {
    config: ResourceApiConfig,
    http: reqwest::Client,
}

impl ResourceApiClient {
    pub fn new(config: ResourceApiConfig) -> AuthResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AuthError::Internal(format!("HTTP client setup failed: {e}")))?;

        Ok(Self { config, http })
    }

    /// Send one request to `{base_url}{path}` as `user_id`.
    ///
    /// Non-2xx answers are relayed, not turned into errors. Only transport
    /// failures and unreadable bodies are `UpstreamUnavailable`.
    pub async fn forward(
        &self,
        method: Method,
        path: &str,
        user_id: &str,
        body: Option<Value>,
    ) -> AuthResult<ResourceResponse> {
        let url = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);

        let mut request = self
            .http
            .request(method.clone(), url)
            .header(USER_ID_HEADER, user_id);
        if let Some(token) = self.config.api_token.as_deref() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = body.as_ref() {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        let body = if bytes.is_empty() {
            None
        } else {
            Some(serde_json::from_slice(&bytes).map_err(|e| {
                AuthError::UpstreamUnavailable(format!("resource API sent invalid JSON: {e}"))
            })?)
        };

        tracing::debug!(%method, path, status = %status, "Resource API call forwarded");

        Ok(ResourceResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::Path,
        http::HeaderMap,
        response::IntoResponse,
        routing::get,
    };
    use serde_json::json;

    fn identity(headers: &HeaderMap) -> Value {
        json!({
            "userId": headers.get(USER_ID_HEADER).and_then(|v| v.to_str().ok()),
            "auth": headers.get("authorization").and_then(|v| v.to_str().ok()),
        })
    }

    async fn list(headers: HeaderMap) -> Json<Value> {
        Json(json!([{ "id": 1, "owner": identity(&headers) }]))
    }

    async fn create(headers: HeaderMap, Json(body): Json<Value>) -> impl IntoResponse {
        (
            StatusCode::CREATED,
            Json(json!({ "title": body["title"], "owner": identity(&headers) })),
        )
    }

    async fn remove(Path(id): Path<u32>) -> StatusCode {
        if id == 404 {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::NO_CONTENT
        }
    }

    async fn spawn(api_token: Option<&str>) -> ResourceApiClient {
        let app = Router::new()
            .route("/api/todos", get(list).post(create))
            .route("/api/todos/{id}", axum::routing::delete(remove));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        ResourceApiClient::new(ResourceApiConfig {
            base_url: format!("http://{addr}"),
            api_token: api_token.map(str::to_string),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_identity_and_service_token_forwarded() {
        let client = spawn(Some("svc-token")).await;

        let response = client
            .forward(Method::GET, "/api/todos", "usr_1", None)
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::OK);
        let owner = &response.body.unwrap()[0]["owner"];
        assert_eq!(owner["userId"], "usr_1");
        assert_eq!(owner["auth"], "Bearer svc-token");
    }

    #[tokio::test]
    async fn test_body_forwarded() {
        let client = spawn(None).await;

        let response = client
            .forward(
                Method::POST,
                "/api/todos",
                "usr_1",
                Some(json!({ "title": "milk" })),
            )
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::CREATED);
        let body = response.body.unwrap();
        assert_eq!(body["title"], "milk");
        assert_eq!(body["owner"]["auth"], Value::Null);
    }

    #[tokio::test]
    async fn test_status_relayed_without_body() {
        let client = spawn(None).await;

        let deleted = client
            .forward(Method::DELETE, "/api/todos/7", "usr_1", None)
            .await
            .unwrap();
        assert_eq!(deleted.status, StatusCode::NO_CONTENT);
        assert!(deleted.body.is_none());

        let missing = client
            .forward(Method::DELETE, "/api/todos/404", "usr_1", None)
            .await
            .unwrap();
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
    }
}
