//! Auth Bridge Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Cookie Pair, session records, credential store trait
//! - `application/` - Cookie Jar Bridge use cases and the inbound gate
//! - `infra/` - HTTP clients for the credential store and resource API
//! - `presentation/` - HTTP handlers, DTOs, router, gate middleware
//!
//! ## Features
//! - Email/password login and registration against an external credential store
//! - Two-cookie model: long-lived session cookie, short-lived token cookie
//! - Token refresh on every session check; refresh failures never log the user out
//! - Cookie-presence gate in front of pages
//! - Todo proxy asserting the validated user to the resource API
//!
//! ## Security Model
//! - Both cookies are HttpOnly; SameSite/Secure follow the deployment profile
//! - A session the store rejects clears both cookies
//! - A token cookie alone can never mint a new token

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::inbound_gate::InboundGate;
pub use error::{AuthError, AuthResult};
pub use infra::http::{CredentialStoreConfig, HttpCredentialStore};
pub use infra::resource_api::{ResourceApiClient, ResourceApiConfig};
pub use presentation::router::{auth_router, todos_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
