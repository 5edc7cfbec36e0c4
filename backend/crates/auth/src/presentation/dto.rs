//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::domain::entity::{AuthUser, SessionRecord};

// ============================================================================
// Login / Register
// ============================================================================

/// Missing fields deserialize as empty and are rejected by validation,
/// which yields a 400 instead of an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user: AuthUser,
}

// ============================================================================
// Logout
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub success: bool,
}

// ============================================================================
// Session
// ============================================================================

/// Both fields are `null` when there is no valid session
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SessionResponse {
    pub user: Option<AuthUser>,
    pub session: Option<SessionRecord>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub refreshed: bool,
}
