// ABOUTME: Plain paginated query used by resources without extra filters.
// ABOUTME: Shared by instruments, manufacturers, owners and licenses.

use super::{paging, paging_setters, push_order};
use crate::error::OpenAqError;
use crate::query::SortOrder;
use crate::transport::ApiRequest;

/// Page size used when none is given.
pub const DEFAULT_LIMIT: u32 = 1_000;

/// Pagination and ordering for collections without extra filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub page: u32,
    pub limit: u32,
    pub order_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
            order_by: None,
            sort_order: None,
        }
    }
}

impl PageQuery {
    pub fn new() -> Self {
        Self::default()
    }

    paging_setters!();

    /// Build the request for the collection at `path`.
    pub fn to_request(&self, path: &str) -> Result<ApiRequest, OpenAqError> {
        let mut query = paging(self.page, self.limit)?;
        push_order(&mut query, self.order_by.as_deref(), self.sort_order);
        Ok(ApiRequest::new(path).with_query(query))
    }
}
