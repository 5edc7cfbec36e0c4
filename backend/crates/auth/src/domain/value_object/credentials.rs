//! Credentials Value Object

use kernel::error::app_error::AppResult;

use super::{email::Email, password::Password};

/// Validated email/password pair
///
/// Constructing one is the only gate before a login or registration call
/// leaves the process.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: Email,
    pub password: Password,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> AppResult<Self> {
        Ok(Self {
            email: Email::new(email)?,
            password: Password::new(password)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_validate_both_fields() {
        assert!(Credentials::new("a@b.com", "pw123456").is_ok());
        assert!(Credentials::new("not-an-email", "pw123456").is_err());
        assert!(Credentials::new("a@b.com", "").is_err());
    }
}
