use crate::core::executor::RequestExecutor;
use crate::core::paging::PagedResult;
use crate::core::request::{PaginationParameters, QueryBuilder};
use crate::domain::model::{ActionResult, Sheet, SheetInclusion, SourceExclusion};
use crate::utils::error::Result;
use std::sync::Arc;

/// Sheet endpoints.
pub struct SheetResources {
    executor: Arc<RequestExecutor>,
}

impl SheetResources {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// GET /sheets
    pub async fn list_sheets(
        &self,
        pagination: Option<PaginationParameters>,
    ) -> Result<PagedResult<Sheet>> {
        let query = QueryBuilder::new();
        self.executor
            .list_paged("sheets", &query, pagination.as_ref())
            .await
    }

    /// GET /sheets/{sheetId}
    pub async fn get_sheet(
        &self,
        sheet_id: u64,
        includes: &[SheetInclusion],
        exclusions: &[SourceExclusion],
    ) -> Result<Sheet> {
        let query = QueryBuilder::new()
            .value_list("include", includes)
            .value_list("exclude", exclusions);
        self.executor
            .get_json(query.append_to(&format!("sheets/{}", sheet_id)))
            .await
    }

    /// POST /sheets
    pub async fn create_sheet(&self, sheet: &Sheet) -> Result<Sheet> {
        let envelope: ActionResult<Sheet> = self.executor.post_json("sheets", sheet).await?;
        envelope.into_result()
    }

    /// PUT /sheets/{sheetId}
    pub async fn update_sheet(&self, sheet_id: u64, sheet: &Sheet) -> Result<Sheet> {
        let envelope: ActionResult<Sheet> = self
            .executor
            .put_json(format!("sheets/{}", sheet_id), sheet)
            .await?;
        envelope.into_result()
    }

    /// DELETE /sheets/{sheetId}
    pub async fn delete_sheet(&self, sheet_id: u64) -> Result<()> {
        let _: ActionResult<serde_json::Value> = self
            .executor
            .delete_json(format!("sheets/{}", sheet_id))
            .await?;
        Ok(())
    }
}
