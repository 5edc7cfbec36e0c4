//! Auth Router

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::credential_store::CredentialStore;
use crate::infra::resource_api::ResourceApiClient;
use crate::presentation::handlers::{self, AuthAppState, ResourceProxyState};

/// Auth endpoints, to be nested under `/api/auth`
pub fn auth_router<S>(store: Arc<S>, config: Arc<AuthConfig>) -> Router
where
    S: CredentialStore + Send + Sync + 'static,
{
    let state = AuthAppState { store, config };

    Router::new()
        .route("/login", post(handlers::login::<S>))
        .route("/register", post(handlers::register::<S>))
        .route("/logout", post(handlers::logout::<S>))
        .route("/session", get(handlers::session::<S>))
        .route("/refresh", post(handlers::refresh::<S>))
        .with_state(state)
}

/// Todo proxy, to be nested under `/api`
pub fn todos_router<S>(
    store: Arc<S>,
    config: Arc<AuthConfig>,
    resource: Arc<ResourceApiClient>,
) -> Router
where
    S: CredentialStore + Send + Sync + 'static,
{
    let state = ResourceProxyState {
        auth: AuthAppState { store, config },
        resource,
    };

    Router::new()
        .route(
            "/todos",
            get(handlers::list_todos::<S>).post(handlers::create_todo::<S>),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo::<S>)
                .put(handlers::update_todo::<S>)
                .delete(handlers::delete_todo::<S>),
        )
        .with_state(state)
}
