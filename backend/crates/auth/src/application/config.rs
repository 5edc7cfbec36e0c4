//! Application Configuration
//!
//! Cookie policy and gate routing for the bridge. Loaded once at startup
//! and shared read-only behind an `Arc`.

use std::time::Duration;

use platform::cookie::CookieConfig;

use crate::domain::entity::{CookieKind, SignedToken};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Deployment profile deciding SameSite/Secure on both cookies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookieProfile {
    /// Web app and credential store share an origin: `SameSite=Lax`,
    /// `Secure` only when served over TLS
    SameOrigin { secure: bool },
    /// Cross-origin deployment: `SameSite=None; Secure` (browsers reject
    /// `None` without `Secure`)
    CrossOrigin,
}

impl CookieProfile {
    pub fn same_site(&self) -> SameSite {
        match self {
            CookieProfile::SameOrigin { .. } => SameSite::Lax,
            CookieProfile::CrossOrigin => SameSite::None,
        }
    }

    pub fn secure(&self) -> bool {
        match self {
            CookieProfile::SameOrigin { secure } => *secure,
            CookieProfile::CrossOrigin => true,
        }
    }
}

/// Inbound gate routing
#[derive(Debug, Clone)]
pub struct GateConfig {
    /// Prefixes reachable without cookies; authenticated visitors are bounced
    pub public_paths: Vec<String>,
    /// Prefixes the gate never looks at (static assets, API routes)
    pub bypass_prefixes: Vec<String>,
    /// Where unauthenticated visitors are sent
    pub login_path: String,
    /// Where authenticated visitors of public pages are sent
    pub landing_path: String,
    /// Query parameter carrying the originally requested path
    pub callback_param: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            public_paths: vec!["/auth/login".to_string(), "/auth/register".to_string()],
            bypass_prefixes: vec![
                "/_next/static".to_string(),
                "/_next/image".to_string(),
                "/favicon.ico".to_string(),
                "/api/".to_string(),
            ],
            login_path: "/auth/login".to_string(),
            landing_path: "/dashboard".to_string(),
            callback_param: "callbackUrl".to_string(),
        }
    }
}

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name (mirrors the store's session identifier)
    pub session_cookie_name: String,
    /// Token cookie name
    pub token_cookie_name: String,
    /// Session cookie Max-Age (30 days)
    pub session_ttl: Duration,
    /// Token cookie Max-Age (15 minutes)
    pub token_ttl: Duration,
    /// SameSite/Secure profile
    pub cookie_profile: CookieProfile,
    /// Inbound gate routing
    pub gate: GateConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "better_auth_session".to_string(),
            token_cookie_name: "auth_jwt".to_string(),
            session_ttl: Duration::from_secs(30 * 24 * 3600), // 30 days
            token_ttl: SignedToken::LIFETIME,
            cookie_profile: CookieProfile::SameOrigin { secure: true },
            gate: GateConfig::default(),
        }
    }
}

impl AuthConfig {
    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_profile: CookieProfile::SameOrigin { secure: false },
            ..Default::default()
        }
    }

    /// Create config for a cross-origin deployment
    pub fn cross_origin() -> Self {
        Self {
            cookie_profile: CookieProfile::CrossOrigin,
            ..Default::default()
        }
    }

    pub fn cookie_name(&self, kind: CookieKind) -> &str {
        match kind {
            CookieKind::Session => &self.session_cookie_name,
            CookieKind::Token => &self.token_cookie_name,
        }
    }

    /// Attributes used when minting or clearing a cookie
    pub fn cookie(&self, kind: CookieKind) -> CookieConfig {
        let ttl = match kind {
            CookieKind::Session => self.session_ttl,
            CookieKind::Token => self.token_ttl,
        };
        CookieConfig {
            max_age_secs: Some(ttl.as_secs() as i64),
            ..self.profile_cookie(kind)
        }
    }

    /// Name and profile attributes, no lifetime
    fn profile_cookie(&self, kind: CookieKind) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name(kind).to_string(),
            secure: self.cookie_profile.secure(),
            http_only: true,
            same_site: self.cookie_profile.same_site(),
            path: "/".to_string(),
            max_age_secs: None,
        }
    }
}
