//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no knowledge of the auth domain:
//! - Cookie codec (request `Cookie` parsing, upstream `Set-Cookie` parsing, rendering)
//! - Client identification for log fields

pub mod client;
pub mod cookie;
