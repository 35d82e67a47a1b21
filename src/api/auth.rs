//! Authentication
//!
//! Holds the bearer credential used for every request. Tokens are supplied
//! by the caller (or the environment); no refresh or OAuth flow is performed.

use super::error::{Error, Result};
use std::fmt;
use std::sync::Arc;

/// Environment variable holding the management access token
pub const ACCESS_TOKEN_ENV: &str = "CONTENTFUL_ACCESS_TOKEN";

/// Bearer access token
///
/// Security: `Debug` never prints the token itself.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(Arc<str>);

impl AccessToken {
    /// Create a token, rejecting empty values and embedded whitespace
    pub fn new(token: impl AsRef<str>) -> Result<Self> {
        let token = token.as_ref().trim();

        if token.is_empty() {
            return Err(Error::Config("access token must not be empty".to_string()));
        }
        if token.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(Error::Config(
                "access token must not contain whitespace".to_string(),
            ));
        }

        Ok(Self(Arc::from(token)))
    }

    /// Read the token from `CONTENTFUL_ACCESS_TOKEN`
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(ACCESS_TOKEN_ENV)
            .map_err(|_| Error::Config(format!("{} is not set", ACCESS_TOKEN_ENV)))?;
        Self::new(token)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(4).collect();
        write!(f, "AccessToken({}***)", visible)
    }
}
