// ABOUTME: Endpoint request builders - typed, validated queries for each resource.
// ABOUTME: Builders produce ApiRequests; the clients only send them.

mod countries;
mod locations;
mod measurements;
mod page;
mod parameters;
mod providers;

pub use countries::CountriesQuery;
pub use locations::{DEFAULT_LOCATIONS_LIMIT, LocationsQuery};
pub use measurements::{DEFAULT_DATETIME_FROM, MeasurementsQuery};
pub use page::{DEFAULT_LIMIT, PageQuery};
pub use parameters::ParametersQuery;
pub use providers::ProvidersQuery;

use crate::error::OpenAqError;
use crate::query::{QueryParams, SortOrder};
use crate::transport::ApiRequest;
use crate::validate::{self, GeoFilter};

/// Request for a single resource, e.g. `/locations/{id}`.
pub fn by_id(resource: &str, id: u32) -> Result<ApiRequest, OpenAqError> {
    let id = validate::id(id)?;
    Ok(ApiRequest::new(format!("/{resource}/{id}")))
}

/// Request for a collection nested under a resource, e.g. `/locations/{id}/latest`.
pub fn nested(resource: &str, id: u32, child: &str) -> Result<ApiRequest, OpenAqError> {
    let id = validate::id(id)?;
    Ok(ApiRequest::new(format!("/{resource}/{id}/{child}")))
}

/// Start a query with validated `page` and `limit`.
fn paging(page: u32, limit: u32) -> Result<QueryParams, OpenAqError> {
    let mut query = QueryParams::new();
    query
        .push("page", validate::page(page)?)
        .push("limit", validate::limit(limit)?);
    Ok(query)
}

fn push_geo(query: &mut QueryParams, filter: GeoFilter) {
    match filter {
        GeoFilter::None => {}
        GeoFilter::Radius {
            coordinates,
            radius,
        } => {
            query
                .push_coordinates("coordinates", Some(coordinates))
                .push("radius", radius);
        }
        GeoFilter::Bbox(bbox) => {
            query.push_bbox("bbox", Some(bbox));
        }
    }
}

/// Validate and append an id list filter. Empty lists are omitted.
fn push_ids(query: &mut QueryParams, name: &str, ids: &[u32]) -> Result<(), OpenAqError> {
    if !ids.is_empty() {
        validate::ids(name, ids)?;
        query.push_list(name, ids);
    }
    Ok(())
}

fn push_order(query: &mut QueryParams, order_by: Option<&str>, sort_order: Option<SortOrder>) {
    query.push_opt("order_by", order_by).push_opt("sort_order", sort_order);
}

/// Builder setters for `page`, `limit`, `order_by` and `sort_order`.
macro_rules! paging_setters {
    () => {
        pub fn page(mut self, page: u32) -> Self {
            self.page = page;
            self
        }

        pub fn limit(mut self, limit: u32) -> Self {
            self.limit = limit;
            self
        }

        pub fn order_by(mut self, field: impl Into<String>) -> Self {
            self.order_by = Some(field.into());
            self
        }

        pub fn sort_order(mut self, order: crate::query::SortOrder) -> Self {
            self.sort_order = Some(order);
            self
        }
    };
}

/// Builder setters for the radius and bounding box filters.
macro_rules! geo_setters {
    () => {
        /// Search around a `(latitude, longitude)` point. Requires a radius.
        pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
            self.coordinates = Some((latitude, longitude));
            self
        }

        /// Search radius in meters, at most 25,000.
        pub fn radius(mut self, meters: u32) -> Self {
            self.radius = Some(meters);
            self
        }

        /// Restrict to `(min_lon, min_lat, max_lon, max_lat)`.
        pub fn bbox(mut self, min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
            self.bbox = Some((min_lon, min_lat, max_lon, max_lat));
            self
        }
    };
}

pub(crate) use {geo_setters, paging_setters};
