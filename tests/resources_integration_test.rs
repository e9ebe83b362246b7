use gridhub::domain::model::{ColumnInclusion, RowInclusion, SheetInclusion};
use gridhub::{Cell, ClientConfig, Column, GridClient, ObjectValue, RetrySettings, Row};
use httpmock::prelude::*;
use serde_json::json;

fn test_config(server: &MockServer) -> ClientConfig {
    ClientConfig::new("tok-secret-1")
        .with_base_url(format!("{}/", server.base_url()))
        .with_retry(RetrySettings {
            max_attempts: 2,
            base_delay_ms: 10,
            max_delay_ms: 50,
            max_elapsed_ms: 5_000,
            jitter_pct: 0,
        })
}

#[tokio::test]
async fn test_requests_carry_bearer_token_and_user_agent() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/sheets/5")
            .header("Authorization", "Bearer tok-secret-1")
            .header_exists("User-Agent")
            .header("Accept", "application/json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"id": 5, "name": "Roadmap"}));
    });

    let client = GridClient::new(test_config(&server)).unwrap();
    let sheet = client.sheets().get_sheet(5, &[], &[]).await.unwrap();

    mock.assert();
    assert_eq!(sheet.name.as_deref(), Some("Roadmap"));
}

#[tokio::test]
async fn test_get_sheet_renders_include_and_exclude_sets() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/sheets/5")
            .query_param("include", "discussions,source")
            .query_param("exclude", "permalinks");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"id": 5, "name": "Roadmap"}));
    });

    let client = GridClient::new(test_config(&server)).unwrap();
    client
        .sheets()
        .get_sheet(
            5,
            &[SheetInclusion::Source, SheetInclusion::Discussions],
            &[gridhub::domain::model::SourceExclusion::Permalinks],
        )
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn test_create_sheet_unwraps_the_mutation_envelope() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/sheets")
            .header("Content-Type", "application/json")
            .json_body_partial(r#"{"name": "New Plan"}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "resultCode": 0,
                "message": "SUCCESS",
                "result": {"id": 8899, "name": "New Plan", "permalink": "https://app.gridhub.example.com/b/p?x=1"}
            }));
    });

    let client = GridClient::new(test_config(&server)).unwrap();
    let sheet = gridhub::Sheet {
        name: Some("New Plan".to_string()),
        ..Default::default()
    };
    let created = client.sheets().create_sheet(&sheet).await.unwrap();

    mock.assert();
    assert_eq!(created.id, Some(8899));
}

#[tokio::test]
async fn test_add_columns_and_update_column() {
    let server = MockServer::start();
    let add_mock = server.mock(|when, then| {
        when.method(POST).path("/sheets/12/columns");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "resultCode": 0,
                "result": [{"id": 31, "title": "Owner", "index": 2, "type": "CONTACT_LIST"}]
            }));
    });
    let update_mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/sheets/12/columns/31")
            .json_body_partial(r#"{"title": "Assignee"}"#);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "resultCode": 0,
                "result": {"id": 31, "title": "Assignee", "index": 2}
            }));
    });

    let client = GridClient::new(test_config(&server)).unwrap();

    let added = client
        .columns()
        .add_columns(
            12,
            &[Column {
                title: Some("Owner".to_string()),
                r#type: Some("CONTACT_LIST".to_string()),
                index: Some(2),
                ..Column::default()
            }],
        )
        .await
        .unwrap();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].id, Some(31));

    let updated = client
        .columns()
        .update_column(
            12,
            31,
            &Column {
                title: Some("Assignee".to_string()),
                ..Column::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title.as_deref(), Some("Assignee"));

    add_mock.assert();
    update_mock.assert();
}

#[tokio::test]
async fn test_get_row_decodes_typed_cell_values() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/sheets/12/rows/700")
            .query_param("include", "columns,objectValue");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "id": 700,
                "rowNumber": 3,
                "cells": [
                    {"columnId": 31, "value": true, "objectValue": true},
                    {"columnId": 32, "value": 12.5, "objectValue": 12.5},
                    {"columnId": 33, "value": "2024-03-15", "objectValue": "2024-03-15"},
                    {"columnId": 34, "objectValue": {
                        "objectType": "PREDECESSOR_LIST",
                        "predecessors": [{"rowId": 10, "type": "FS", "lag": {"days": 2.5}}]
                    }},
                    {"columnId": 35, "objectValue": {
                        "objectType": "CONTACT", "email": "ann.blake@example.com", "name": "Ann Blake"
                    }}
                ]
            }));
    });

    let client = GridClient::new(test_config(&server)).unwrap();
    let row = client
        .rows()
        .get_row(12, 700, &[RowInclusion::Columns, RowInclusion::ObjectValue])
        .await
        .unwrap();

    mock.assert();
    let cells = row.cells.unwrap();
    assert!(matches!(
        cells[0].object_value,
        Some(ObjectValue::Boolean(true))
    ));
    assert!(matches!(
        cells[1].object_value,
        Some(ObjectValue::Number(n)) if n == 12.5
    ));
    assert!(matches!(cells[2].object_value, Some(ObjectValue::Date(_))));
    match &cells[3].object_value {
        Some(ObjectValue::PredecessorList(predecessors)) => {
            assert_eq!(predecessors[0].row_id, Some(10));
            assert_eq!(predecessors[0].r#type.as_deref(), Some("FS"));
            assert_eq!(predecessors[0].lag.as_ref().unwrap().days, Some(2.5));
        }
        other => panic!("expected PredecessorList, got {:?}", other),
    }
    assert!(matches!(
        cells[4].object_value,
        Some(ObjectValue::Contact(_))
    ));
}

#[tokio::test]
async fn test_add_rows_serializes_object_values_with_tags() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/sheets/12/rows")
            .json_body_partial(
                r#"[{"cells": [{"columnId": 34, "objectValue": {"objectType": "DURATION", "days": 2.5}}]}]"#,
            );
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "resultCode": 0,
                "result": [{"id": 701, "rowNumber": 4}]
            }));
    });

    let client = GridClient::new(test_config(&server)).unwrap();
    let rows = vec![Row {
        cells: Some(vec![Cell {
            column_id: Some(34),
            object_value: Some(ObjectValue::Duration(gridhub::domain::model::DurationValue {
                days: Some(2.5),
                ..Default::default()
            })),
            ..Cell::default()
        }]),
        ..Row::default()
    }];
    let added = client.rows().add_rows(12, &rows).await.unwrap();

    mock.assert();
    assert_eq!(added[0].id, Some(701));
}

#[tokio::test]
async fn test_delete_rows_renders_comma_joined_ids() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/sheets/12/rows")
            .query_param("ids", "7,9");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"resultCode": 0, "result": [7, 9]}));
    });

    let client = GridClient::new(test_config(&server)).unwrap();
    let deleted = client.rows().delete_rows(12, &[7, 9]).await.unwrap();

    mock.assert();
    assert_eq!(deleted, vec![7, 9]);
}

#[tokio::test]
async fn test_search_encodes_the_query_text() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .query_param("query", "launch plan & budget");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "totalCount": 1,
                "results": [{"text": "Launch plan & budget", "objectType": "sheet", "objectId": 5}]
            }));
    });

    let client = GridClient::new(test_config(&server)).unwrap();
    let found = client.search().search_all("launch plan & budget").await.unwrap();

    mock.assert();
    assert_eq!(found.total_count, Some(1));
    assert_eq!(
        found.results.unwrap()[0].object_id,
        Some(5)
    );
}

#[tokio::test]
async fn test_list_columns_include_set_matches_declared_order() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/sheets/5/columns")
            .query_param("include", "FILTERS,FORMULAS");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "pageNumber": 1, "pageSize": 100, "totalPages": 1, "totalCount": 0, "data": []
            }));
    });

    let client = GridClient::new(test_config(&server)).unwrap();
    // Caller order is irrelevant; declaration order goes on the wire.
    client
        .columns()
        .list_columns(
            5,
            &[ColumnInclusion::Formulas, ColumnInclusion::Filters],
            None,
        )
        .await
        .unwrap();

    mock.assert();
}
