// ABOUTME: Query builder for listing monitoring locations.
// ABOUTME: Supports geospatial, country, provider and parameter filters.

use super::{geo_setters, paging, paging_setters, push_geo, push_ids, push_order};
use crate::error::OpenAqError;
use crate::query::SortOrder;
use crate::transport::ApiRequest;
use crate::validate::{self, BoundingBox, Coordinates};

/// Page size for location listings when none is given.
pub const DEFAULT_LOCATIONS_LIMIT: u32 = 100;

/// Filters for `GET /locations`.
///
/// Coordinates and radius must be given together, and exclude a bounding
/// box. Country ids and an ISO code exclude each other.
#[derive(Debug, Clone, PartialEq)]
pub struct LocationsQuery {
    pub page: u32,
    pub limit: u32,
    pub coordinates: Option<Coordinates>,
    pub radius: Option<u32>,
    pub bbox: Option<BoundingBox>,
    pub providers_id: Vec<u32>,
    pub countries_id: Vec<u32>,
    pub parameters_id: Vec<u32>,
    pub licenses_id: Vec<u32>,
    pub instruments_id: Vec<u32>,
    pub manufacturers_id: Vec<u32>,
    pub owners_id: Vec<u32>,
    pub iso: Option<String>,
    /// Reference-grade monitors (`true`) or air sensors (`false`).
    pub monitor: Option<bool>,
    pub mobile: Option<bool>,
    pub order_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl Default for LocationsQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LOCATIONS_LIMIT,
            coordinates: None,
            radius: None,
            bbox: None,
            providers_id: Vec::new(),
            countries_id: Vec::new(),
            parameters_id: Vec::new(),
            licenses_id: Vec::new(),
            instruments_id: Vec::new(),
            manufacturers_id: Vec::new(),
            owners_id: Vec::new(),
            iso: None,
            monitor: None,
            mobile: None,
            order_by: None,
            sort_order: None,
        }
    }
}

impl LocationsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    paging_setters!();
    geo_setters!();

    pub fn providers(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.providers_id = ids.into();
        self
    }

    pub fn countries(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.countries_id = ids.into();
        self
    }

    pub fn parameters(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.parameters_id = ids.into();
        self
    }

    pub fn licenses(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.licenses_id = ids.into();
        self
    }

    pub fn instruments(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.instruments_id = ids.into();
        self
    }

    pub fn manufacturers(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.manufacturers_id = ids.into();
        self
    }

    pub fn owners(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.owners_id = ids.into();
        self
    }

    /// ISO 3166-1 alpha-2 country code, case-insensitive.
    pub fn iso(mut self, code: impl Into<String>) -> Self {
        self.iso = Some(code.into());
        self
    }

    pub fn monitor(mut self, monitor: bool) -> Self {
        self.monitor = Some(monitor);
        self
    }

    pub fn mobile(mut self, mobile: bool) -> Self {
        self.mobile = Some(mobile);
        self
    }

    /// Validate the filters and build the request.
    pub fn to_request(&self) -> Result<ApiRequest, OpenAqError> {
        let mut query = paging(self.page, self.limit)?;
        push_geo(
            &mut query,
            validate::geospatial(self.coordinates, self.radius, self.bbox)?,
        );
        let iso = validate::countries(&self.countries_id, self.iso.as_deref())?;

        push_ids(&mut query, "providers_id", &self.providers_id)?;
        push_ids(&mut query, "countries_id", &self.countries_id)?;
        push_ids(&mut query, "parameters_id", &self.parameters_id)?;
        push_ids(&mut query, "licenses_id", &self.licenses_id)?;
        push_ids(&mut query, "instruments_id", &self.instruments_id)?;
        push_ids(&mut query, "manufacturers_id", &self.manufacturers_id)?;
        push_ids(&mut query, "owner_contacts_id", &self.owners_id)?;
        query
            .push_opt("iso", iso)
            .push_opt("monitor", self.monitor)
            .push_opt("mobile", self.mobile);
        push_order(&mut query, self.order_by.as_deref(), self.sort_order);

        Ok(ApiRequest::new("/locations").with_query(query))
    }
}
