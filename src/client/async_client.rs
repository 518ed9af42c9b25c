// ABOUTME: Async OpenAQ client. Every request passes through the rate limit governor.
// ABOUTME: Safe to share across tasks; the governor coordinates concurrent requests.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use super::resources::{
    Countries, Instruments, Licenses, Locations, Manufacturers, Measurements, Owners, Parameters,
    Providers, Sensors,
};
use crate::config::ClientConfig;
use crate::error::OpenAqError;
use crate::models::Response;
use crate::ratelimit::RateLimitGovernor;
use crate::transport::{check_response, ApiRequest, ReqwestTransport, Transport};

/// Async client for the OpenAQ v3 API.
///
/// ```no_run
/// # async fn run() -> Result<(), openaq::OpenAqError> {
/// use openaq::{ClientConfig, LocationsQuery, OpenAq};
///
/// let client = OpenAq::new(ClientConfig::builder().api_key("my-key").build()?)?;
/// let locations = client
///     .locations()
///     .list(&LocationsQuery::new().iso("US").limit(10))
///     .await?;
/// println!("{} locations", locations.len());
/// # Ok(())
/// # }
/// ```
pub struct OpenAq {
    config: ClientConfig,
    headers: Vec<(String, String)>,
    transport: Arc<dyn Transport>,
    governor: RateLimitGovernor,
}

impl OpenAq {
    /// Create a client that talks HTTP with reqwest.
    pub fn new(config: ClientConfig) -> Result<Self, OpenAqError> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client with default settings and the key from `OPENAQ_API_KEY`.
    pub fn from_env() -> Result<Self, OpenAqError> {
        Self::new(ClientConfig::builder().build()?)
    }

    /// Create a client over a custom transport.
    pub fn with_transport(config: ClientConfig, transport: impl Transport + 'static) -> Self {
        let governor = RateLimitGovernor::new(config.rate_limit, config.auto_wait);
        Self {
            headers: config.default_headers(),
            config,
            transport: Arc::new(transport),
            governor,
        }
    }

    /// Replace the rate limit governor, e.g. one with a custom clock.
    pub fn with_governor(mut self, governor: RateLimitGovernor) -> Self {
        self.governor = governor;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The governor tracking this client's request budget.
    pub fn governor(&self) -> &RateLimitGovernor {
        &self.governor
    }

    /// Send a GET request and decode the response.
    ///
    /// The permit is released and the bootstrap gate opened before the status
    /// is checked, so a failed request never holds up other callers.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Response<T>, OpenAqError> {
        let url = self.config.url(&request.path);

        let sync_guard = self.governor.bootstrap().await;
        let permit = self.governor.acquire().await?;

        debug!(url = %url, params = request.query.pairs().len(), "sending request");
        let sent = self.transport.send(&url, &request.query, &self.headers).await;
        if let Ok(response) = &sent {
            self.governor.reconcile(&response.rate_limit_headers());
        }

        drop(permit);
        drop(sync_guard);

        let response = check_response(sent?)?;
        Response::from_json(&response.body)
    }

    // ========================================================================
    // Resources
    // ========================================================================

    pub fn locations(&self) -> Locations<'_, Self> {
        Locations::new(self)
    }

    pub fn sensors(&self) -> Sensors<'_, Self> {
        Sensors::new(self)
    }

    pub fn measurements(&self) -> Measurements<'_, Self> {
        Measurements::new(self)
    }

    pub fn providers(&self) -> Providers<'_, Self> {
        Providers::new(self)
    }

    pub fn parameters(&self) -> Parameters<'_, Self> {
        Parameters::new(self)
    }

    pub fn countries(&self) -> Countries<'_, Self> {
        Countries::new(self)
    }

    pub fn instruments(&self) -> Instruments<'_, Self> {
        Instruments::new(self)
    }

    pub fn manufacturers(&self) -> Manufacturers<'_, Self> {
        Manufacturers::new(self)
    }

    pub fn owners(&self) -> Owners<'_, Self> {
        Owners::new(self)
    }

    pub fn licenses(&self) -> Licenses<'_, Self> {
        Licenses::new(self)
    }
}

impl std::fmt::Debug for OpenAq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAq")
            .field("base_url", &self.config.base_url)
            .field("rate_limit", &self.governor.snapshot())
            .finish()
    }
}
