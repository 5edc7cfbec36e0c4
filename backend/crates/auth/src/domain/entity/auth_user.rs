//! Auth User Entity
//!
//! The user as reported by the credential store. This service never writes
//! user records; it only relays them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    /// Store-assigned identifier; asserted downstream as `X-User-ID`
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_store_payload() {
        let json = r#"{
            "id": "usr_1",
            "email": "a@b.com",
            "name": "",
            "emailVerified": false,
            "image": null,
            "createdAt": "2025-01-01T00:00:00.000Z",
            "updatedAt": "2025-01-02T00:00:00.000Z"
        }"#;

        let user: AuthUser = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, "usr_1");
        assert_eq!(user.email, "a@b.com");
        assert!(user.created_at.is_some());
    }

    #[test]
    fn test_deserialize_minimal_payload() {
        let user: AuthUser = serde_json::from_str(r#"{"id":"u","email":"e@x.io"}"#).unwrap();
        assert!(user.name.is_none());
        assert!(!user.email_verified);
    }
}
