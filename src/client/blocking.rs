// ABOUTME: Blocking OpenAQ client for callers without an async runtime.
// ABOUTME: Requests run one at a time against a simpler blocking governor.

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
use crate::ratelimit::BlockingGovernor;
use crate::transport::{check_response, ApiRequest, BlockingReqwestTransport, BlockingTransport};

/// Blocking client for the OpenAQ v3 API.
///
/// Must not be created or used from inside an async runtime; use
/// [`OpenAq`](super::OpenAq) there.
pub struct BlockingOpenAq {
    config: ClientConfig,
    headers: Vec<(String, String)>,
    transport: Arc<dyn BlockingTransport>,
    governor: BlockingGovernor,
}

impl BlockingOpenAq {
    pub fn new(config: ClientConfig) -> Result<Self, OpenAqError> {
        let transport = BlockingReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, transport))
    }

    /// Create a client with default settings and the key from `OPENAQ_API_KEY`.
    pub fn from_env() -> Result<Self, OpenAqError> {
        Self::new(ClientConfig::builder().build()?)
    }

    /// Create a client over a custom transport.
    pub fn with_transport(
        config: ClientConfig,
        transport: impl BlockingTransport + 'static,
    ) -> Self {
        let governor = BlockingGovernor::new(config.rate_limit, config.auto_wait);
        Self {
            headers: config.default_headers(),
            config,
            transport: Arc::new(transport),
            governor,
        }
    }

    /// Replace the rate limit governor, e.g. one with a custom clock.
    pub fn with_governor(mut self, governor: BlockingGovernor) -> Self {
        self.governor = governor;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn governor(&self) -> &BlockingGovernor {
        &self.governor
    }

    pub(crate) fn get<T: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<Response<T>, OpenAqError> {
        let url = self.config.url(&request.path);
        self.governor.check()?;

        debug!(url = %url, params = request.query.pairs().len(), "sending request");
        let response = self.transport.send(&url, &request.query, &self.headers)?;
        self.governor.reconcile(&response.rate_limit_headers());

        let response = check_response(response)?;
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

impl std::fmt::Debug for BlockingOpenAq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingOpenAq")
            .field("base_url", &self.config.base_url)
            .field("remaining", &self.governor.remaining())
            .finish()
    }
}
