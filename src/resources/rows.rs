use crate::core::executor::RequestExecutor;
use crate::core::request::QueryBuilder;
use crate::domain::model::{ActionResult, Row, RowInclusion};
use crate::utils::error::Result;
use std::sync::Arc;

/// Row endpoints under a sheet.
pub struct RowResources {
    executor: Arc<RequestExecutor>,
}

impl RowResources {
    pub(crate) fn new(executor: Arc<RequestExecutor>) -> Self {
        Self { executor }
    }

    /// GET /sheets/{sheetId}/rows/{rowId}
    pub async fn get_row(
        &self,
        sheet_id: u64,
        row_id: u64,
        includes: &[RowInclusion],
    ) -> Result<Row> {
        let query = QueryBuilder::new().value_list("include", includes);
        self.executor
            .get_json(query.append_to(&format!("sheets/{}/rows/{}", sheet_id, row_id)))
            .await
    }

    /// POST /sheets/{sheetId}/rows
    pub async fn add_rows(&self, sheet_id: u64, rows: &[Row]) -> Result<Vec<Row>> {
        let envelope: ActionResult<Vec<Row>> = self
            .executor
            .post_json(format!("sheets/{}/rows", sheet_id), &rows)
            .await?;
        envelope.into_result()
    }

    /// PUT /sheets/{sheetId}/rows
    pub async fn update_rows(&self, sheet_id: u64, rows: &[Row]) -> Result<Vec<Row>> {
        let envelope: ActionResult<Vec<Row>> = self
            .executor
            .put_json(format!("sheets/{}/rows", sheet_id), &rows)
            .await?;
        envelope.into_result()
    }

    /// DELETE /sheets/{sheetId}/rows?ids={rowIds}
    ///
    /// Returns the ids of the deleted rows.
    pub async fn delete_rows(&self, sheet_id: u64, row_ids: &[u64]) -> Result<Vec<u64>> {
        let query = QueryBuilder::new().id_list("ids", row_ids);
        let envelope: ActionResult<Vec<u64>> = self
            .executor
            .delete_json(query.append_to(&format!("sheets/{}/rows", sheet_id)))
            .await?;
        envelope.into_result()
    }
}
