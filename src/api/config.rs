//! Client configuration

use super::auth::AccessToken;
use super::error::{Error, Result};
use std::time::Duration;
use url::Url;

/// Production API host
pub const DEFAULT_HOST: &str = "api.contentful.com";

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration used to build a [`Client`](super::client::Client)
///
/// Read-only once the client is constructed.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub access_token: AccessToken,
    /// Host (optionally with port), e.g. `api.contentful.com` or `127.0.0.1:5000`
    pub host: String,
    /// Use plain HTTP instead of HTTPS (local test servers)
    pub insecure: bool,
    pub user_agent: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(access_token: AccessToken) -> Self {
        Self {
            access_token,
            host: DEFAULT_HOST.to_string(),
            insecure: false,
            user_agent: format!("cma/{}", env!("CARGO_PKG_VERSION")),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create configuration from environment variables
    ///
    /// - `CONTENTFUL_ACCESS_TOKEN`: access token (required)
    /// - `CONTENTFUL_HOST`: API host (default: api.contentful.com)
    /// - `CONTENTFUL_INSECURE`: `true`/`1` to use plain HTTP
    pub fn from_env() -> Result<Self> {
        let mut config = Self::new(AccessToken::from_env()?);

        if let Ok(host) = std::env::var("CONTENTFUL_HOST") {
            config.host = host;
        }
        config.insecure = std::env::var("CONTENTFUL_INSECURE")
            .map(|v| v.to_lowercase() == "true" || v == "1")
            .unwrap_or(false);

        Ok(config)
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_insecure(mut self, insecure: bool) -> Self {
        self.insecure = insecure;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Base URL derived from `host` and `insecure`
    ///
    /// A host that already carries a scheme is used as given.
    pub fn base_url(&self) -> Result<Url> {
        let host = self.host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(Error::Config("host must not be empty".to_string()));
        }

        let raw = if host.contains("://") {
            format!("{}/", host)
        } else {
            let scheme = if self.insecure { "http" } else { "https" };
            format!("{}://{}/", scheme, host)
        };

        Url::parse(&raw).map_err(|e| Error::Config(format!("invalid host '{}': {}", self.host, e)))
    }
}
