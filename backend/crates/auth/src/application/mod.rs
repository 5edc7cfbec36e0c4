//! Application Layer
//!
//! Cookie Jar Bridge use cases and the inbound gate.

pub mod config;
pub mod inbound_gate;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod validate_session;

// Re-exports
pub use config::{AuthConfig, CookieProfile, GateConfig};
pub use inbound_gate::{GateDecision, InboundGate};
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh_token::{RefreshTokenOutput, RefreshTokenUseCase};
pub use register::RegisterUseCase;
pub use validate_session::{ValidateSessionOutput, ValidateSessionUseCase, ValidatedSession};
