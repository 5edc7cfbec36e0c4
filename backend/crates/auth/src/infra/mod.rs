//! Infrastructure Layer
//!
//! HTTP clients for the credential store and the downstream resource API.

pub mod http;
pub mod resource_api;

pub use http::{CredentialStoreConfig, HttpCredentialStore};
pub use resource_api::{ResourceApiClient, ResourceApiConfig, ResourceResponse};
