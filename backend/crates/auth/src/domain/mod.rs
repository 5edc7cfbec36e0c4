//! Domain Layer
//!
//! Entities, value objects, and the credential store boundary.

pub mod credential_store;
pub mod entity;
pub mod value_object;

// Re-exports
pub use credential_store::CredentialStore;
pub use entity::{AuthUser, CookieKind, CookiePair, CookieWrites, SessionRecord, SignedToken};
pub use value_object::Credentials;
