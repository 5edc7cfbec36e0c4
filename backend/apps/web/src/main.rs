//! Web Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod pages;

use std::net::SocketAddr;
use std::sync::Arc;

use auth::middleware::inbound_gate;
use auth::{HttpCredentialStore, InboundGate, ResourceApiClient, auth_router, todos_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware::from_fn_with_state,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ServerConfig;

use kernel::error::app_error::AppError;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "web=info,auth=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    tracing::info!(
        credential_store = %config.credential_store_url,
        resource_api = %config.resource_api_url,
        cookie_profile = ?config.cookie_profile,
        "Configuration loaded"
    );

    let app = build_app(&config)?
        .layer(TraceLayer::new_for_http())
        .layer(cors(&config));

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

/// Pages and API routes behind the inbound gate
fn build_app(config: &ServerConfig) -> anyhow::Result<Router> {
    let auth_config = Arc::new(config.auth_config());
    let store = Arc::new(HttpCredentialStore::new(config.credential_store_config())?);
    let resource = Arc::new(ResourceApiClient::new(config.resource_api_config())?);
    let gate = InboundGate::new(auth_config.clone());

    Ok(Router::new()
        .merge(pages::router(store.clone(), auth_config.clone()))
        .nest("/api/auth", auth_router(store.clone(), auth_config.clone()))
        .nest("/api", todos_router(store, auth_config, resource))
        .fallback(not_found)
        .layer(from_fn_with_state(gate, inbound_gate)))
}

async fn not_found() -> AppError {
    AppError::not_found("Page not found")
}

fn cors(config: &ServerConfig) -> CorsLayer {
    let allowed_origins: Vec<http::HeaderValue> = config
        .frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use tower::ServiceExt;

    /// App wired to a credential store that is not listening
    async fn offline_app() -> Router {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let dead = format!("http://{}", listener.local_addr().unwrap());
        drop(listener);

        let config = ServerConfig::from_lookup(|key| match key {
            "CREDENTIAL_STORE_URL" => Some(dead.clone()),
            _ => None,
        })
        .unwrap();
        build_app(&config).unwrap()
    }

    async fn get(app: Router, path: &str, cookie: Option<&str>) -> Response {
        let mut request = Request::get(path);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        app.oneshot(request.body(Body::empty()).unwrap()).await.unwrap()
    }

    #[tokio::test]
    async fn test_protected_page_without_cookies() {
        let response = get(offline_app().await, "/dashboard", None).await;

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/auth/login?callbackUrl=%2Fdashboard"
        );
    }

    #[tokio::test]
    async fn test_root_redirects_through_gate() {
        let anonymous = get(offline_app().await, "/", None).await;
        assert_eq!(
            anonymous.headers()[header::LOCATION],
            "/auth/login?callbackUrl=%2F"
        );

        let signed_in = get(offline_app().await, "/", Some("auth_jwt=t")).await;
        assert_eq!(signed_in.headers()[header::LOCATION], "/dashboard");
    }

    #[tokio::test]
    async fn test_dashboard_keeps_cookies_when_store_unreachable() {
        let response = get(
            offline_app().await,
            "/dashboard",
            Some("better_auth_session=s; auth_jwt=t"),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let cleared = response
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .filter(|c| c.contains("Max-Age=0"))
            .count();
        assert_eq!(cleared, 0);
    }

    #[tokio::test]
    async fn test_login_page_is_public() {
        let response = get(offline_app().await, "/auth/login?callbackUrl=%2Fdashboard", None).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("/api/auth/login"));
    }

    #[tokio::test]
    async fn test_unknown_page_is_problem_json() {
        let response = get(offline_app().await, "/nowhere", Some("auth_jwt=t")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], 404);
        assert_eq!(json["error"], "Page not found");
    }

    #[tokio::test]
    async fn test_session_endpoint_bypasses_gate() {
        let response = get(offline_app().await, "/api/auth/session", None).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
