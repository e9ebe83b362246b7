use crate::core::executor::RequestExecutor;
use crate::core::paging::PagedResult;
use crate::core::request::{PaginationParameters, QueryBuilder};
use crate::domain::model::{ActionResult, Column, ColumnInclusion};
use crate::utils::error::Result;
use std::sync::Arc;

/// Column endpoints under a sheet.
pub struct SheetColumnResources {
    executor: Arc<RequestExecutor>,
}

impl SheetColumnResources {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// GET /sheets/{sheetId}/columns
    pub async fn list_columns(
        &self,
        sheet_id: u64,
        includes: &[ColumnInclusion],
        pagination: Option<PaginationParameters>,
    ) -> Result<PagedResult<Column>> {
        let query = QueryBuilder::new().value_list("include", includes);
        self.executor
            .list_paged(
                &format!("sheets/{}/columns", sheet_id),
                &query,
                pagination.as_ref(),
            )
            .await
    }

    /// GET /sheets/{sheetId}/columns/{columnId}
    pub async fn get_column(
        &self,
        sheet_id: u64,
        column_id: u64,
        includes: &[ColumnInclusion],
    ) -> Result<Column> {
        let query = QueryBuilder::new().value_list("include", includes);
        self.executor
            .get_json(query.append_to(&format!("sheets/{}/columns/{}", sheet_id, column_id)))
            .await
    }

    /// POST /sheets/{sheetId}/columns
    pub async fn add_columns(&self, sheet_id: u64, columns: &[Column]) -> Result<Vec<Column>> {
        let envelope: ActionResult<Vec<Column>> = self
            .executor
            .post_json(format!("sheets/{}/columns", sheet_id), &columns)
            .await?;
        envelope.into_result()
    }

    /// PUT /sheets/{sheetId}/columns/{columnId}
    pub async fn update_column(
        &self,
        sheet_id: u64,
        column_id: u64,
        column: &Column,
    ) -> Result<Column> {
        let envelope: ActionResult<Column> = self
            .executor
            .put_json(
                format!("sheets/{}/columns/{}", sheet_id, column_id),
                column,
            )
            .await?;
        envelope.into_result()
    }

    /// DELETE /sheets/{sheetId}/columns/{columnId}
    pub async fn delete_column(&self, sheet_id: u64, column_id: u64) -> Result<()> {
        let _: ActionResult<serde_json::Value> = self
            .executor
            .delete_json(format!("sheets/{}/columns/{}", sheet_id, column_id))
            .await?;
        Ok(())
    }
}
