// ABOUTME: Query builder for listing countries with data in OpenAQ.
// ABOUTME: Filters by the parameters measured and the providers reporting.

use super::{paging, paging_setters, push_ids, push_order, DEFAULT_LIMIT};
use crate::error::OpenAqError;
use crate::query::SortOrder;
use crate::transport::ApiRequest;

/// Filters for `GET /countries`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountriesQuery {
    pub page: u32,
    pub limit: u32,
    pub order_by: Option<String>,
    pub sort_order: Option<SortOrder>,
    pub parameters_id: Vec<u32>,
    pub providers_id: Vec<u32>,
}

impl Default for CountriesQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            order_by: None,
            sort_order: None,
            parameters_id: Vec::new(),
            providers_id: Vec::new(),
        }
    }
}

impl CountriesQuery {
    pub fn new() -> Self {
        Self::default()
    }

    paging_setters!();

    pub fn parameters(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.parameters_id = ids.into();
        self
    }

    pub fn providers(mut self, ids: impl Into<Vec<u32>>) -> Self {
        self.providers_id = ids.into();
        self
    }

    pub fn to_request(&self) -> Result<ApiRequest, OpenAqError> {
        let mut query = paging(self.page, self.limit)?;
        push_ids(&mut query, "parameters_id", &self.parameters_id)?;
        push_ids(&mut query, "providers_id", &self.providers_id)?;
        push_order(&mut query, self.order_by.as_deref(), self.sort_order);

        Ok(ApiRequest::new("/countries").with_query(query))
    }
}
