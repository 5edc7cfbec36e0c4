//! Password Value Object
//!
//! Clear-text password on its way to the credential store. It is never
//! hashed or stored here; the bounds only reject input the store would
//! refuse anyway, so no network call is made for it.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;

/// Minimum password length accepted by the credential store
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Password from user input
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    pub fn new(raw: impl Into<String>) -> AppResult<Self> {
        let raw = raw.into();

        if raw.trim().is_empty() {
            return Err(AppError::bad_request("Password is required"));
        }

        let length = raw.chars().count();
        if length < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LENGTH
            )));
        }
        if length > MAX_PASSWORD_LENGTH {
            return Err(AppError::bad_request(format!(
                "Password must be at most {} characters",
                MAX_PASSWORD_LENGTH
            )));
        }

        Ok(Self(raw))
    }

    /// Clear text, for the outgoing request body only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Password").field(&"[REDACTED]").finish()
    }
}
