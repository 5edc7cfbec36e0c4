//! Presentation Layer
//!
//! HTTP handlers, DTOs, cookie rendering, router, and the gate middleware.

pub mod cookies;
pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::{AuthAppState, ResourceProxyState};
pub use middleware::inbound_gate;
pub use router::{auth_router, todos_router};
