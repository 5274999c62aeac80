//! Tests for the pagination module

use super::*;
use crate::config::ClientConfig;
use crate::error::Error;
use crate::http::{HttpClient, RetryPolicy};
use crate::types::JsonObject;
use futures::{StreamExt, TryStreamExt};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> HttpClient {
    let config = ClientConfig::builder()
        .base_url(format!("{}/api/v1", server.uri()))
        .token("t")
        .retry(RetryPolicy::none())
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

fn object(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("not an object: {other}"),
    }
}

// ============================================================================
// ListQuery
// ============================================================================

#[test]
fn test_list_query_pairs() {
    let query = ListQuery::new()
        .ordering("-id")
        .ordering("name")
        .sideload("documents")
        .sideload("content")
        .content_schema_id("invoice_id")
        .content_schema_id("date_issue")
        .filter("status", json!(["to_review", "confirmed"]))
        .filter("queue", 8198)
        .filter("deleted", false)
        .filter("ignored", serde_json::Value::Null);

    assert_eq!(
        query.to_query_pairs(Some(100)),
        vec![
            ("page_size".to_string(), "100".to_string()),
            ("ordering".to_string(), "-id,name".to_string()),
            ("sideload".to_string(), "documents,content".to_string()),
            (
                "content.schema_id".to_string(),
                "invoice_id,date_issue".to_string()
            ),
            ("status".to_string(), "to_review,confirmed".to_string()),
            ("queue".to_string(), "8198".to_string()),
            ("deleted".to_string(), "false".to_string()),
        ]
    );
}

#[test]
fn test_list_query_page_size_override() {
    let pairs = ListQuery::new().page_size(5).to_query_pairs(Some(100));
    assert_eq!(pairs, vec![("page_size".to_string(), "5".to_string())]);

    assert!(ListQuery::new().to_query_pairs(None).is_empty());
}

// ============================================================================
// Sideload merge
// ============================================================================

#[test]
fn test_merge_singular_and_plural_sideloads() {
    let mut results = vec![object(json!({
        "id": 1,
        "document": "https://x/api/v1/documents/10",
        "modifier": "https://x/api/v1/users/5",
        "relations": ["https://x/api/v1/relations/7", "https://x/api/v1/relations/8"]
    }))];
    let page = object(json!({
        "documents": [{"url": "https://x/api/v1/documents/10", "id": 10}],
        "modifiers": [],
        "relations": [{"url": "https://x/api/v1/relations/7", "id": 7}]
    }));

    merge_sideloads(
        &mut results,
        &page,
        &["documents".to_string(), "modifiers".to_string(), "relations".to_string()],
    );

    assert_eq!(results[0]["document"], json!({"url": "https://x/api/v1/documents/10", "id": 10}));
    assert_eq!(results[0]["modifier"], serde_json::Value::Null);
    assert_eq!(
        results[0]["relations"],
        json!([{"url": "https://x/api/v1/relations/7", "id": 7}, null])
    );
}

#[test]
fn test_merge_content_sideload() {
    let mut results = vec![
        object(json!({"id": 1, "content": "https://x/api/v1/annotations/1/content"})),
        object(json!({"id": 2, "content": "https://x/api/v1/annotations/2/content"})),
    ];
    let page = object(json!({
        "content": [
            {"url": "https://x/api/v1/annotations/1/content/100", "schema_id": "invoice_id"},
            {"url": "https://x/api/v1/annotations/2/content/200", "schema_id": "invoice_id"},
            {"url": "https://x/api/v1/annotations/1/content/101", "schema_id": "date_issue"}
        ]
    }));

    merge_sideloads(&mut results, &page, &["content".to_string()]);

    let first: Vec<_> = results[0]["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["schema_id"].as_str().unwrap())
        .collect();
    assert_eq!(first, ["invoice_id", "date_issue"]);
    assert_eq!(results[1]["content"].as_array().unwrap().len(), 1);
}

#[test]
fn test_merge_content_unwraps_inner_list() {
    let mut results = vec![object(json!({
        "id": 1,
        "content": "https://x/api/v1/annotations/1/content"
    }))];
    let page = object(json!({
        "content": [{
            "url": "https://x/api/v1/annotations/1/content",
            "content": [{"id": 100, "category": "section"}]
        }]
    }));

    merge_sideloads(&mut results, &page, &["content".to_string()]);

    assert_eq!(results[0]["content"], json!([{"id": 100, "category": "section"}]));
}

#[test]
fn test_merge_missing_sideload_is_noop() {
    let mut results = vec![object(json!({"document": "https://x/api/v1/documents/1"}))];
    merge_sideloads(&mut results, &JsonObject::new(), &["documents".to_string()]);
    assert_eq!(results[0]["document"], "https://x/api/v1/documents/1");
}

// ============================================================================
// Paginated stream
// ============================================================================

#[tokio::test]
async fn test_paginate_follows_next() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/api/v1/queues?page=2&page_size=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/queues"))
        .and(query_param("page_size", "2"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": next, "previous": null, "total": 3, "total_pages": 2},
            "results": [{"id": 1}, {"id": 2}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/queues"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": null, "total": 3},
            "results": [{"id": 3}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let request = PageRequest::get("queues", vec![("page_size".to_string(), "2".to_string())]);
    let records: Vec<JsonObject> = paginate(&client, request).try_collect().await.unwrap();

    let ids: Vec<_> = records.iter().map(|r| r["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, [1, 2, 3]);
}

#[tokio::test]
async fn test_paginate_is_lazy() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/api/v1/users?page=2", mock_server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": next},
            "results": [{"id": 1}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/users"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": null},
            "results": [{"id": 2}]
        })))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let mut stream = paginate(&client, PageRequest::get("users", Vec::new()));
    let first = stream.next().await.unwrap().unwrap();

    assert_eq!(first["id"], 1);
}

#[tokio::test]
async fn test_paginate_post_resends_body() {
    let mock_server = MockServer::start().await;
    let next = format!("{}/api/v1/annotations/search?search_after=abc", mock_server.uri());
    let body = json!({"query": {"$and": [{"field": "status", "value": "to_review"}]}});

    Mock::given(method("POST"))
        .and(path("/api/v1/annotations/search"))
        .and(query_param_is_missing("search_after"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": next},
            "results": [{"id": 1}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/annotations/search"))
        .and(query_param("search_after", "abc"))
        .and(body_json(body.clone()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": null},
            "results": [{"id": 2}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let request = PageRequest::post("annotations/search", Vec::new(), body);
    let records: Vec<JsonObject> = paginate(&client, request).try_collect().await.unwrap();

    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_paginate_merges_sideloads_per_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/annotations"))
        .and(query_param("sideload", "documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": null},
            "results": [{"id": 1, "document": "https://x/api/v1/documents/9"}],
            "documents": [{"url": "https://x/api/v1/documents/9", "original_file_name": "a.pdf"}]
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let request = PageRequest::get(
        "annotations",
        vec![("sideload".to_string(), "documents".to_string())],
    )
    .with_sideloads(vec!["documents".to_string()]);
    let records: Vec<JsonObject> = paginate(&client, request).try_collect().await.unwrap();

    assert_eq!(records[0]["document"]["original_file_name"], "a.pdf");
}

#[tokio::test]
async fn test_paginate_empty_results() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/hooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": null, "total": 0},
            "results": []
        })))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let records: Vec<JsonObject> = paginate(&client, PageRequest::get("hooks", Vec::new()))
        .try_collect()
        .await
        .unwrap();

    assert!(records.is_empty());
}

#[tokio::test]
async fn test_paginate_propagates_errors() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/hooks"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let result: Result<Vec<JsonObject>, Error> =
        paginate(&client, PageRequest::get("hooks", Vec::new()))
            .try_collect()
            .await;

    assert!(matches!(result, Err(Error::HttpStatus { status: 403, .. })));
}

#[tokio::test]
async fn test_paginate_rejects_non_object_page() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/hooks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&mock_server)
        .await;

    let client = client(&mock_server);
    let mut stream = paginate(&client, PageRequest::get("hooks", Vec::new()));

    assert!(matches!(
        stream.next().await,
        Some(Err(Error::UnexpectedResponse { .. }))
    ));
}
