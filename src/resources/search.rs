use crate::core::executor::RequestExecutor;
use crate::core::request::QueryBuilder;
use crate::domain::model::SearchResult;
use crate::utils::error::Result;
use std::sync::Arc;

/// Full-text search endpoints.
pub struct SearchResources {
    executor: Arc<RequestExecutor>,
}

impl SearchResources {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// GET /search?query={text}
    pub async fn search_all(&self, text: &str) -> Result<SearchResult> {
        let query = QueryBuilder::new().param("query", text);
        self.executor.get_json(query.append_to("search")).await
    }

    /// GET /search/sheets/{sheetId}?query={text}
    pub async fn search_sheet(&self, sheet_id: u64, text: &str) -> Result<SearchResult> {
        let query = QueryBuilder::new().param("query", text);
        self.executor
            .get_json(query.append_to(&format!("search/sheets/{}", sheet_id)))
            .await
    }
}
