//! Signed Token Entity
//!
//! Short-lived identity assertion minted by the credential store from a
//! valid session. Opaque to this service: it is neither decoded nor
//! verified here.

use std::fmt;
use std::time::Duration;

#[derive(Clone, PartialEq, Eq)]
pub struct SignedToken(String);

impl SignedToken {
    /// Nominal lifetime; also the token cookie's Max-Age
    pub const LIFETIME: Duration = Duration::from_secs(15 * 60);

    /// Wrap a token string; empty strings are not tokens
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        (!value.is_empty()).then_some(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SignedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SignedToken").field(&"[REDACTED]").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_not_a_token() {
        assert!(SignedToken::new("").is_none());
        assert_eq!(SignedToken::new("a.b.c").unwrap().as_str(), "a.b.c");
    }

    #[test]
    fn test_lifetime_is_fifteen_minutes() {
        assert_eq!(SignedToken::LIFETIME.as_secs(), 900);
    }
}
