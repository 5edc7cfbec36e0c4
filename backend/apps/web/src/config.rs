//! Server Configuration
//!
//! Read once from the environment at startup.

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::config::{AuthConfig, CookieProfile};
use auth::{CredentialStoreConfig, ResourceApiConfig};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_STORE_URL: &str = "http://localhost:8787";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:31113,http://127.0.0.1:31113";

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    pub credential_store_url: String,
    /// Defaults to the credential store URL; both live in the same API
    pub resource_api_url: String,
    pub api_token: Option<String>,
    pub frontend_origins: Vec<String>,
    pub production: bool,
    pub cookie_profile: CookieProfile,
    pub upstream_timeout: Duration,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_addr = var("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let credential_store_url =
            var("CREDENTIAL_STORE_URL").unwrap_or_else(|| DEFAULT_STORE_URL.to_string());
        let resource_api_url =
            var("RESOURCE_API_URL").unwrap_or_else(|| credential_store_url.clone());

        let frontend_origins = var("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        let production = var("APP_ENV").is_some_and(|env| env == "production");

        let cookie_profile = match var("COOKIE_PROFILE").as_deref() {
            None | Some("same-origin") => CookieProfile::SameOrigin { secure: production },
            Some("cross-origin") => CookieProfile::CrossOrigin,
            Some(other) => {
                bail!("COOKIE_PROFILE must be `same-origin` or `cross-origin`, got `{other}`")
            }
        };

        let upstream_timeout = match var("UPSTREAM_TIMEOUT_SECS") {
            Some(secs) => Duration::from_secs(
                secs.parse()
                    .context("UPSTREAM_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => Duration::from_secs(10),
        };

        Ok(Self {
            bind_addr,
            credential_store_url,
            resource_api_url,
            api_token: var("API_TOKEN"),
            frontend_origins,
            production,
            cookie_profile,
            upstream_timeout,
        })
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            cookie_profile: self.cookie_profile,
            ..AuthConfig::default()
        }
    }

    pub fn credential_store_config(&self) -> CredentialStoreConfig {
        CredentialStoreConfig {
            timeout: self.upstream_timeout,
            ..CredentialStoreConfig::new(self.credential_store_url.clone())
        }
    }

    pub fn resource_api_config(&self) -> ResourceApiConfig {
        ResourceApiConfig {
            base_url: self.resource_api_url.clone(),
            api_token: self.api_token.clone(),
            timeout: self.upstream_timeout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.bind_addr.port(), 31113);
        assert_eq!(config.credential_store_url, "http://localhost:8787");
        assert_eq!(config.resource_api_url, config.credential_store_url);
        assert!(config.api_token.is_none());
        assert_eq!(config.frontend_origins.len(), 2);
        assert_eq!(
            config.cookie_profile,
            CookieProfile::SameOrigin { secure: false }
        );
    }

    #[test]
    fn test_production_enables_secure() {
        let config = load(&[("APP_ENV", "production")]).unwrap();
        assert!(config.auth_config().cookie_profile.secure());
    }

    #[test]
    fn test_cross_origin_profile() {
        let config = load(&[("COOKIE_PROFILE", "cross-origin")]).unwrap();
        let auth = config.auth_config();
        assert_eq!(auth.cookie_profile, CookieProfile::CrossOrigin);
        assert!(auth.cookie_profile.secure());
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(load(&[("COOKIE_PROFILE", "lax")]).is_err());
        assert!(load(&[("BIND_ADDR", "not-an-addr")]).is_err());
        assert!(load(&[("UPSTREAM_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_upstream_settings_flow_into_clients() {
        let config = load(&[
            ("CREDENTIAL_STORE_URL", "http://store:8787"),
            ("RESOURCE_API_URL", "http://api:9000"),
            ("API_TOKEN", "svc"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
        ])
        .unwrap();

        let store = config.credential_store_config();
        assert_eq!(store.base_url, "http://store:8787");
        assert_eq!(store.timeout, Duration::from_secs(3));

        let resource = config.resource_api_config();
        assert_eq!(resource.base_url, "http://api:9000");
        assert_eq!(resource.api_token.as_deref(), Some("svc"));
    }
}
