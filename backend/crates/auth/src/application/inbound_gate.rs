//! Inbound Gate
//!
//! Routing decision made before any page is served. Cookie presence is all
//! it looks at; the credential store is not consulted here, the protected
//! page validates the session itself.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::CookiePair;

/// Outcome of the gate for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateDecision {
    /// Static asset or API route: passed through untouched
    Bypass,
    /// Unauthenticated visitor on a public page
    Allow,
    /// Authenticated visitor on a protected page; present cookies are
    /// re-emitted with the profile's attributes
    AllowAndReassert,
    /// Unauthenticated visitor on a protected page
    RedirectToLogin { location: String },
    /// Authenticated visitor on a public page
    RedirectToLanding { location: String },
}

#[derive(Debug, Clone)]
pub struct InboundGate {
    config: Arc<AuthConfig>,
}

impl InboundGate {
    pub fn new(config: Arc<AuthConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    pub fn is_bypassed(&self, path: &str) -> bool {
        self.config
            .gate
            .bypass_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn is_public(&self, path: &str) -> bool {
        self.config
            .gate
            .public_paths
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn decide(&self, path: &str, cookies: &CookiePair) -> GateDecision {
        if self.is_bypassed(path) {
            return GateDecision::Bypass;
        }

        match (cookies.is_authenticated(), self.is_public(path)) {
            (false, true) => GateDecision::Allow,
            (false, false) => GateDecision::RedirectToLogin {
                location: self.login_location(path),
            },
            (true, true) => GateDecision::RedirectToLanding {
                location: self.config.gate.landing_path.clone(),
            },
            (true, false) => GateDecision::AllowAndReassert,
        }
    }

    /// Login page URL carrying the requested path for the post-login redirect
    pub fn login_location(&self, path: &str) -> String {
        let gate = &self.config.gate;
        format!(
            "{}?{}={}",
            gate.login_path,
            urlencoding::encode(&gate.callback_param),
            urlencoding::encode(path)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gate() -> InboundGate {
        InboundGate::new(Arc::new(AuthConfig::default()))
    }

    fn session_only() -> CookiePair {
        CookiePair::new(Some("ses".into()), None)
    }

    fn token_only() -> CookiePair {
        CookiePair::new(None, Some("jwt".into()))
    }

    #[test]
    fn test_bypass_prefixes() {
        let gate = gate();
        for path in [
            "/_next/static/chunk.js",
            "/_next/image",
            "/favicon.ico",
            "/api/auth/login",
            "/api/todos/1",
        ] {
            assert_eq!(
                gate.decide(path, &CookiePair::default()),
                GateDecision::Bypass,
                "{path}"
            );
        }
    }

    #[test]
    fn test_unauthenticated_protected_redirects_with_callback() {
        let decision = gate().decide("/dashboard", &CookiePair::default());
        assert_eq!(
            decision,
            GateDecision::RedirectToLogin {
                location: "/auth/login?callbackUrl=%2Fdashboard".to_string()
            }
        );
    }

    #[test]
    fn test_unauthenticated_public_allowed() {
        let gate = gate();
        assert_eq!(
            gate.decide("/auth/login", &CookiePair::default()),
            GateDecision::Allow
        );
        assert_eq!(
            gate.decide("/auth/register", &CookiePair::default()),
            GateDecision::Allow
        );
    }

    #[test]
    fn test_authenticated_public_goes_to_landing() {
        let decision = gate().decide("/auth/login", &session_only());
        assert_eq!(
            decision,
            GateDecision::RedirectToLanding {
                location: "/dashboard".to_string()
            }
        );
    }

    #[test]
    fn test_either_cookie_passes_protected() {
        let gate = gate();
        assert_eq!(
            gate.decide("/dashboard", &session_only()),
            GateDecision::AllowAndReassert
        );
        assert_eq!(
            gate.decide("/dashboard", &token_only()),
            GateDecision::AllowAndReassert
        );
    }

    #[test]
    fn test_public_match_is_prefix_based() {
        let gate = gate();
        assert!(gate.is_public("/auth/login/reset"));
        assert!(!gate.is_public("/auth"));
        assert!(!gate.is_public("/"));
    }

    #[test]
    fn test_login_location_encodes_nested_path() {
        assert_eq!(
            gate().login_location("/dashboard/todos?x=1"),
            "/auth/login?callbackUrl=%2Fdashboard%2Ftodos%3Fx%3D1"
        );
    }

    #[test]
    fn test_default_login_path_is_public() {
        let gate = gate();
        let login = gate.config().gate.login_path.clone();
        assert_eq!(
            gate.decide(&login, &CookiePair::default()),
            GateDecision::Allow
        );
    }
}
