// ABOUTME: Root module for openaq - typed client for the OpenAQ v3 air quality API.
// ABOUTME: Re-exports the clients, queries, models, and errors from submodules.

pub mod client;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod models;
pub mod prelude;
pub mod query;
pub mod ratelimit;
pub mod transport;
pub mod validate;

pub use client::{BlockingOpenAq, OpenAq};
pub use config::ClientConfig;
pub use endpoints::{
    CountriesQuery, LocationsQuery, MeasurementsQuery, PageQuery, ParametersQuery, ProvidersQuery,
};
pub use error::{ApiError, OpenAqError, RateLimitExceeded};
