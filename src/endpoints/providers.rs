// ABOUTME: Query builder for listing data providers.
// ABOUTME: Filters by parameter, monitor grade, geography and country.

use super::{geo_setters, paging, paging_setters, push_geo, push_ids, push_order, DEFAULT_LIMIT};
use crate::error::OpenAqError;
use crate::query::SortOrder;
use crate::transport::ApiRequest;
use crate::validate::{self, BoundingBox, Coordinates};

/// Filters for `GET /providers`.
#[derive(Debug, Clone, PartialEq)]
pub struct ProvidersQuery {
    pub page: u32,
    pub limit: u32,
    pub order_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub parameters_id: Vec<u32>,
    pub monitor: Option<bool>,
    pub coordinates: Option<Coordinates>,
    pub radius: Option<u32>,
    pub bbox: Option<BoundingBox>,
    pub iso: Option<String>,
    pub countries_id: Vec<u32>,
}

impl Default for ProvidersQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            order_by: None,
            sort_order: None,
            parameters_id: Vec::new(),
            monitor: None,
            coordinates: None,
            radius: None,
            bbox: None,
            iso: None,
            countries_id: Vec::new(),
        }
    }
}

impl ProvidersQuery {
    pub fn new() -> Self {
        Self::default()
    }

    paging_setters!();
    geo_setters!();

    pub fn parameters(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.parameters_id = ids.into();
        self
    }

    pub fn monitor(mut self, monitor: bool) -> Self {
        self.monitor = Some(monitor);
        self
    }

    pub fn iso(mut self, code: impl Into<String>) -> Self {
        self.iso = Some(code.into());
        self
    }

    pub fn countries(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.countries_id = ids.into();
        self
    }

    pub fn to_request(&self) -> Result<ApiRequest, OpenAqError> {
        let mut query = paging(self.page, self.limit)?;
        push_geo(
            &mut query,
            validate::geospatial(self.coordinates, self.radius, self.bbox)?,
        );
        let iso = validate::countries(&self.countries_id, self.iso.as_deref())?;

        push_ids(&mut query, "parameters_id", &self.parameters_id)?;
        push_ids(&mut query, "countries_id", &self.countries_id)?;
        query.push_opt("iso", iso).push_opt("monitor", self.monitor);
        push_order(&mut query, self.order_by.as_deref(), self.sort_order);

        Ok(ApiRequest::new("/providers").with_query(query))
    }
}
