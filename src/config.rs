//! Client configuration
//!
//! A `ClientConfig` can be assembled with the builder, loaded from a YAML
//! file or read from `ROSSUM_*` environment variables.

use crate::auth::Credentials;
use crate::error::{Error, Result};
use crate::http::{RateLimiterConfig, RetryPolicy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://elis.rossum.ai/api/v1";

/// Default number of records requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Upper bound for the retry backoff factor and jitter, in seconds
pub const MAX_RETRY_DELAY_SECS: f64 = 3600.0;

/// Environment variable holding the API base URL
pub const ENV_BASE_URL: &str = "ROSSUM_API_BASE";
/// Environment variable holding a static API token
pub const ENV_TOKEN: &str = "ROSSUM_TOKEN";
/// Environment variable holding the login username
pub const ENV_USERNAME: &str = "ROSSUM_USERNAME";
/// Environment variable holding the login password
pub const ENV_PASSWORD: &str = "ROSSUM_PASSWORD";

// ============================================================================
// Client Config
// ============================================================================

/// Everything needed to build a [`Client`](crate::Client)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// API base URL, e.g. `https://elis.rossum.ai/api/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Username/password or a static token
    pub credentials: Credentials,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,

    /// Retry policy for transient failures
    #[serde(default)]
    pub retry: RetryPolicy,

    /// Maximum number of concurrently running requests
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight_requests: usize,

    /// Optional client-side rate limit
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// User agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Requested lifetime of tokens obtained by logging in
    #[serde(default)]
    pub token_lifetime_s: Option<u64>,

    /// Page size for list endpoints
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_max_in_flight() -> usize {
    4
}

fn default_user_agent() -> String {
    format!("rossum-api-rs/{}", env!("CARGO_PKG_VERSION"))
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl ClientConfig {
    /// Create a config with default settings for the given credentials
    pub fn new(base_url: impl Into<String>, credentials: Credentials) -> Self {
        Self {
            base_url: base_url.into(),
            credentials,
            timeout: default_timeout(),
            retry: RetryPolicy::default(),
            max_in_flight_requests: default_max_in_flight(),
            rate_limit: None,
            user_agent: default_user_agent(),
            token_lifetime_s: None,
            page_size: default_page_size(),
        }
    }

    /// Create a new config builder
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Parse a config from YAML text
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {e}", path.display()))
        })?;
        Self::from_yaml(&content)
    }

    /// Build a config from `ROSSUM_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// A token takes precedence over username and password.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let base_url = non_empty(ENV_BASE_URL).unwrap_or_else(default_base_url);
        let credentials = match (
            non_empty(ENV_TOKEN),
            non_empty(ENV_USERNAME),
            non_empty(ENV_PASSWORD),
        ) {
            (Some(token), _, _) => Credentials::token(token),
            (None, Some(username), Some(password)) => Credentials::user(username, password),
            (None, Some(_), None) => return Err(Error::missing_field(ENV_PASSWORD)),
            (None, None, _) => {
                return Err(Error::config(format!(
                    "either {ENV_TOKEN} or {ENV_USERNAME} and {ENV_PASSWORD} must be set"
                )))
            }
        };

        let config = Self::new(base_url, credentials);
        config.validate()?;
        Ok(config)
    }

    /// Check that the settings are usable
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(Error::missing_field("base_url"));
        }
        url::Url::parse(&self.base_url)?;

        if self.max_in_flight_requests == 0 {
            return Err(Error::config("max_in_flight_requests must be at least 1"));
        }
        if self.page_size == 0 {
            return Err(Error::config("page_size must be at least 1"));
        }
        for (name, value) in [
            ("retry.backoff_factor", self.retry.backoff_factor),
            ("retry.max_jitter", self.retry.max_jitter),
        ] {
            if !(0.0..=MAX_RETRY_DELAY_SECS).contains(&value) {
                return Err(Error::config(format!(
                    "{name} must be between 0 and {MAX_RETRY_DELAY_SECS} seconds, got {value}"
                )));
            }
        }
        Ok(())
    }
}

// ============================================================================
// Builder
// ============================================================================

/// Builder for [`ClientConfig`]
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    base_url: Option<String>,
    credentials: Option<Credentials>,
    timeout: Option<Duration>,
    retry: Option<RetryPolicy>,
    max_in_flight_requests: Option<usize>,
    rate_limit: Option<RateLimiterConfig>,
    user_agent: Option<String>,
    token_lifetime_s: Option<u64>,
    page_size: Option<u32>,
}

impl ClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Authenticate with username and password
    pub fn user_credentials(
        mut self,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        self.credentials = Some(Credentials::user(username, password));
        self
    }

    /// Authenticate with a static token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.credentials = Some(Credentials::token(token));
        self
    }

    /// Set the credentials
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the retry policy
    pub fn retry(mut self, policy: RetryPolicy) -> Self {
        self.retry = Some(policy);
        self
    }

    /// Set the number of retries, keeping the other retry settings
    pub fn n_retries(mut self, n_retries: u32) -> Self {
        self.retry.get_or_insert_with(RetryPolicy::default).n_retries = n_retries;
        self
    }

    /// Set the number of concurrently running requests
    pub fn max_in_flight_requests(mut self, n: usize) -> Self {
        self.max_in_flight_requests = Some(n);
        self
    }

    /// Set the rate limiter
    pub fn rate_limit(mut self, config: RateLimiterConfig) -> Self {
        self.rate_limit = Some(config);
        self
    }

    /// Set the user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    /// Request tokens with a limited lifetime
    pub fn token_lifetime_s(mut self, seconds: u64) -> Self {
        self.token_lifetime_s = Some(seconds);
        self
    }

    /// Set the page size for list endpoints
    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Build the config
    pub fn build(self) -> Result<ClientConfig> {
        let credentials = self
            .credentials
            .ok_or_else(|| Error::missing_field("credentials"))?;

        let mut config = ClientConfig::new(
            self.base_url.unwrap_or_else(default_base_url),
            credentials,
        );
        if let Some(timeout) = self.timeout {
            config.timeout = timeout;
        }
        if let Some(retry) = self.retry {
            config.retry = retry;
        }
        if let Some(n) = self.max_in_flight_requests {
            config.max_in_flight_requests = n;
        }
        if let Some(agent) = self.user_agent {
            config.user_agent = agent;
        }
        if let Some(page_size) = self.page_size {
            config.page_size = page_size;
        }
        config.rate_limit = self.rate_limit;
        config.token_lifetime_s = self.token_lifetime_s;

        config.validate()?;
        Ok(config)
    }
}

mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(serde::de::Error::custom)
    }
}
