use crate::core::executor::RequestExecutor;
use crate::core::request::{PaginationParameters, QueryBuilder};
use crate::utils::error::{ApiError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Page size the walker uses internally when aggregating all pages.
const WALK_PAGE_SIZE: u64 = 100;

/// List envelope returned by every collection endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PagedResult<T> {
    pub page_number: u64,
    pub page_size: u64,
    pub total_pages: u64,
    pub total_count: u64,
    pub data: Vec<T>,
}

impl<T> PagedResult<T> {
    /// Aggregated single-page view over a fully-walked collection.
    fn aggregated(data: Vec<T>) -> Self {
        let count = data.len() as u64;
        Self {
            page_number: 1,
            page_size: count,
            total_pages: 1,
            total_count: count,
            data,
        }
    }
}

impl RequestExecutor {
    /// Fetch one page, or walk the whole collection when `include_all` is
    /// requested.
    ///
    /// `query` carries the operation's own parameters (includes, filters);
    /// pagination is appended after them.
    pub async fn list_paged<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryBuilder,
        pagination: Option<&PaginationParameters>,
    ) -> Result<PagedResult<T>> {
        match pagination {
            Some(p) if p.include_all => self.list_all(path, query).await,
            _ => {
                let composed = query.clone().opt_pagination(pagination).append_to(path);
                self.get_json(composed).await
            }
        }
    }

    /// Walk every page of a collection in service order.
    ///
    /// Pages are fetched strictly sequentially from page 1; the walk stops
    /// when the service reports the last page or returns an empty one. A
    /// total-page count that changes mid-walk means the collection mutated
    /// remotely; the walk fails fast rather than reconciling.
    async fn list_all<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &QueryBuilder,
    ) -> Result<PagedResult<T>> {
        let mut items: Vec<T> = Vec::new();
        let mut page: u64 = 1;
        let mut expected_total_pages: Option<u64> = None;

        loop {
            let composed = query
                .clone()
                .pagination(&PaginationParameters::page(page, WALK_PAGE_SIZE))
                .append_to(path);
            let result: PagedResult<T> = self.get_json(composed).await?;

            match expected_total_pages {
                None => expected_total_pages = Some(result.total_pages),
                Some(expected) if expected != result.total_pages => {
                    return Err(ApiError::PaginationInconsistent {
                        message: format!(
                            "total page count changed from {} to {} while fetching page {}",
                            expected, result.total_pages, page
                        ),
                    });
                }
                Some(_) => {}
            }

            if result.data.is_empty() {
                break;
            }
            let last_page = result.page_number >= result.total_pages;
            items.extend(result.data);
            if last_page {
                break;
            }
            page += 1;
        }

        tracing::debug!("Aggregated {} item(s) from {} across {} page(s)", items.len(), path, page);
        Ok(PagedResult::aggregated(items))
    }
}
