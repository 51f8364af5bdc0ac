use std::env;
use std::time::Duration;

use url::Url;

use crate::constants::{BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Merchant credentials and transport settings for an [`EpgClient`](crate::EpgClient).
#[derive(Clone)]
pub struct EpgConfig {
    /// Merchant login, sent as `userName`, `username` and `user`
    pub username: String,
    pub password: String,
    /// Bank identifier placed in the `jsonParams` blob
    pub bank: String,
    /// Session id issued by the gateway for this integration
    pub sid: String,
    /// Gateway host, without a trailing path
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Skip TLS certificate and hostname verification. Off unless explicitly enabled.
    pub accept_invalid_certs: bool,
}

impl std::fmt::Debug for EpgConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EpgConfig")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("bank", &self.bank)
            .field("sid", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}

impl EpgConfig {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        bank: impl Into<String>,
        sid: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            bank: bank.into(),
            sid: sid.into(),
            base_url: BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            accept_invalid_certs: false,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }

    /// Load configuration from `EPG_*` environment variables.
    ///
    /// Required: `EPG_USERNAME`, `EPG_PASSWORD`, `EPG_BANK`, `EPG_SID`.
    /// Optional: `EPG_BASE_URL`, `EPG_TIMEOUT_SECS`, `EPG_ACCEPT_INVALID_CERTS`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or(ConfigError::MissingRequired(key))
        };

        let username = required("EPG_USERNAME")?;
        let password = required("EPG_PASSWORD")?;
        let bank = required("EPG_BANK")?;
        let sid = required("EPG_SID")?;

        let base_url = lookup("EPG_BASE_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| BASE_URL.to_string());
        Url::parse(&base_url).map_err(|_| ConfigError::InvalidUrl(base_url.clone()))?;

        let timeout = match lookup("EPG_TIMEOUT_SECS").filter(|s| !s.is_empty()) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let accept_invalid_certs = lookup("EPG_ACCEPT_INVALID_CERTS")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Ok(Self {
            username,
            password,
            bank,
            sid,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
            accept_invalid_certs,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingRequired(&'static str),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    #[error("invalid timeout (expected positive seconds): {0}")]
    InvalidTimeout(String),
}
