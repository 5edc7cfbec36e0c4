//! Session Record Entity
//!
//! A long-lived login as tracked by the credential store. The bridge only
//! ever holds a copy of `id`, in the session cookie.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auth_user::AuthUser;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// Expired records are treated as absent, never partially trusted
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Result of a successful sign-in at the credential store
#[derive(Debug, Clone)]
pub struct SessionGrant {
    /// Value the store set in its session cookie
    pub session_id: String,
    pub user: AuthUser,
}

/// Result of a successful session check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub user: AuthUser,
    pub session: SessionRecord,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn record(expires_at: DateTime<Utc>) -> SessionRecord {
        let now = Utc::now();
        SessionRecord {
            id: "ses_1".to_string(),
            user_id: "usr_1".to_string(),
            created_at: now,
            updated_at: now,
            expires_at,
        }
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let session = record(now);

        assert!(session.is_expired_at(now));
        assert!(!session.is_expired_at(now - Duration::milliseconds(1)));
    }

    #[test]
    fn test_is_expired() {
        assert!(record(Utc::now() - Duration::days(1)).is_expired());
        assert!(!record(Utc::now() + Duration::days(30)).is_expired());
    }

    #[test]
    fn test_deserialize_camel_case() {
        let json = r#"{
            "id": "ses_1",
            "userId": "usr_1",
            "createdAt": "2025-01-01T00:00:00Z",
            "updatedAt": "2025-01-01T00:00:00Z",
            "expiresAt": "2025-01-31T00:00:00Z",
            "ipAddress": "127.0.0.1"
        }"#;
        let session: SessionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(session.user_id, "usr_1");
    }
}
