// ABOUTME: Client configuration - API key resolution, headers, timeouts, and rate limits.
// ABOUTME: Built with ClientConfig::builder() and shared by the async and blocking clients.

use std::collections::HashMap;
use std::time::Duration;

use tracing::error;

use crate::error::OpenAqError;
use crate::ratelimit::DEFAULT_CAPACITY;

pub const DEFAULT_BASE_URL: &str = "https://api.openaq.org/v3";
pub const API_KEY_ENV: &str = "OPENAQ_API_KEY";
pub const ACCEPT_HEADER: &str = "application/json";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Resolved configuration for an OpenAQ client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
    pub auto_wait: bool,
    pub rate_limit: u32,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub pool_max_idle_per_host: usize,
}

impl ClientConfig {
    /// Create a new config builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Headers sent with every request: custom headers first, then the
    /// fixed `X-API-Key`, `User-Agent` and `Accept` values.
    ///
    /// Custom entries named like a fixed header are dropped so each is sent once.
    pub fn default_headers(&self) -> Vec<(String, String)> {
        let fixed = |name: &str| {
            name.eq_ignore_ascii_case("User-Agent")
                || name.eq_ignore_ascii_case("Accept")
                || (self.api_key.is_some() && name.eq_ignore_ascii_case("X-API-Key"))
        };
        let mut headers: Vec<_> = self
            .headers
            .iter()
            .filter(|(k, _)| !fixed(k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        headers.sort();
        if let Some(key) = &self.api_key {
            headers.push(("X-API-Key".to_string(), key.clone()));
        }
        headers.push(("User-Agent".to_string(), self.user_agent.clone()));
        headers.push(("Accept".to_string(), ACCEPT_HEADER.to_string()));
        headers
    }

    /// Full URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

/// Builder for [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    base_url: String,
    user_agent: String,
    headers: HashMap<String, String>,
    auto_wait: bool,
    rate_limit: Option<u32>,
    timeout: Duration,
    connect_timeout: Duration,
    pool_max_idle_per_host: usize,
}

impl Default for ClientConfigBuilder {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: format!("openaq-rust-{}", env!("CARGO_PKG_VERSION")),
            headers: HashMap::new(),
            auto_wait: true,
            rate_limit: None,
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
        }
    }
}

impl ClientConfigBuilder {
    /// Set the API key. Takes priority over `OPENAQ_API_KEY`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a header sent with every request.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Wait for the next rate limit window instead of failing. Defaults to true.
    pub fn auto_wait(mut self, auto_wait: bool) -> Self {
        self.auto_wait = auto_wait;
        self
    }

    /// Requests per minute to assume before the server reports its limit.
    pub fn rate_limit_override(mut self, per_minute: u32) -> Self {
        self.rate_limit = Some(per_minute);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Resolve the API key and validate the configuration.
    ///
    /// Fails with [`OpenAqError::ApiKeyMissing`] when no key is available and
    /// the client would talk to the public API.
    pub fn build(self) -> Result<ClientConfig, OpenAqError> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .filter(|key| !key.trim().is_empty());
        let base_url = self.base_url.trim_end_matches('/').to_string();

        if base_url.is_empty() {
            return Err(OpenAqError::Configuration("base_url must not be empty".into()));
        }
        if self.rate_limit == Some(0) {
            return Err(OpenAqError::Configuration(
                "rate_limit_override must be at least 1".into(),
            ));
        }
        if api_key.is_none() && base_url == DEFAULT_BASE_URL {
            error!("API key not set: an API key is required when using the OpenAQ API");
            return Err(OpenAqError::ApiKeyMissing);
        }

        Ok(ClientConfig {
            api_key,
            base_url,
            user_agent: self.user_agent,
            headers: self.headers,
            auto_wait: self.auto_wait,
            rate_limit: self.rate_limit.unwrap_or(DEFAULT_CAPACITY),
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            pool_max_idle_per_host: self.pool_max_idle_per_host,
        })
    }
}
