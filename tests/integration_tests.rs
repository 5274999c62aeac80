//! Integration tests using mock HTTP server
//!
//! Tests the full flow through the public API: credentials → login →
//! paginated, retried HTTP requests → typed models

use futures::TryStreamExt;
use rossum_api::http::RetryPolicy;
use rossum_api::models::{DatapointType, Link, TaskStatus};
use rossum_api::{Client, ClientConfig, Error, ListQuery, PollOptions, UploadFile};
use serde_json::{json, Value};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn base_url(server: &MockServer) -> String {
    format!("{}/api/v1", server.uri())
}

fn fast_retry(n_retries: u32) -> RetryPolicy {
    RetryPolicy::new(n_retries, 0.01, 0.0)
}

fn token_client(server: &MockServer, retry: RetryPolicy) -> Client {
    let config = ClientConfig::builder()
        .base_url(base_url(server))
        .token("static-token")
        .retry(retry)
        .build()
        .unwrap();
    Client::new(&config).unwrap()
}

fn password_client(server: &MockServer) -> Client {
    let config = ClientConfig::builder()
        .base_url(base_url(server))
        .user_credentials("john-doe@east-west-trading.com", "secret")
        .retry(RetryPolicy::none())
        .build()
        .unwrap();
    Client::new(&config).unwrap()
}

fn workspace(id: i64) -> Value {
    json!({
        "id": id,
        "name": format!("Workspace {id}"),
        "url": format!("https://elis.rossum.ai/api/v1/workspaces/{id}"),
        "organization": "https://elis.rossum.ai/api/v1/organizations/406",
        "queues": []
    })
}

// ============================================================================
// Authentication
// ============================================================================

#[tokio::test]
async fn test_password_login_then_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .and(body_partial_json(json!({
            "username": "john-doe@east-west-trading.com",
            "password": "secret"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "token-1"})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces/7540"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(workspace(7540)))
        .expect(2)
        .mount(&server)
        .await;

    let client = password_client(&server);
    client.retrieve_workspace(7540).await.unwrap();
    // The token is cached between requests
    let workspace = client.retrieve_workspace(7540).await.unwrap();

    assert_eq!(workspace.name, "Workspace 7540");
}

#[tokio::test]
async fn test_expired_token_triggers_relogin() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "old"})))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"key": "new"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces/1"))
        .and(header("Authorization", "Bearer old"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces/1"))
        .and(header("Authorization", "Bearer new"))
        .respond_with(ResponseTemplate::new(200).set_body_json(workspace(1)))
        .expect(1)
        .mount(&server)
        .await;

    let workspace = password_client(&server).retrieve_workspace(1).await.unwrap();
    assert_eq!(workspace.id, 1);
}

#[tokio::test]
async fn test_static_token_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces/1"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = token_client(&server, RetryPolicy::none())
        .retrieve_workspace(1)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Auth { .. }));
}

#[tokio::test]
async fn test_failed_login() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/auth/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({"detail": "Unable to log in with provided credentials."})),
        )
        .mount(&server)
        .await;

    let err = password_client(&server).authenticate().await.unwrap_err();
    assert!(matches!(err, Error::Auth { .. }));
}

// ============================================================================
// Retries
// ============================================================================

#[tokio::test]
async fn test_retry_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces/1"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(workspace(1)))
        .expect(1)
        .mount(&server)
        .await;

    let workspace = token_client(&server, fast_retry(3))
        .retrieve_workspace(1)
        .await
        .unwrap();
    assert_eq!(workspace.id, 1);
}

#[tokio::test]
async fn test_retries_exhausted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces/1"))
        .respond_with(ResponseTemplate::new(500))
        .expect(3)
        .mount(&server)
        .await;

    let err = token_client(&server, fast_retry(2))
        .retrieve_workspace(1)
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_throttled_request_is_retried() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces/1"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(workspace(1)))
        .mount(&server)
        .await;

    let workspace = token_client(&server, fast_retry(1))
        .retrieve_workspace(1)
        .await
        .unwrap();
    assert_eq!(workspace.id, 1);
}

#[tokio::test]
async fn test_client_error_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/workspaces"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"name": ["This field is required."]})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let err = token_client(&server, fast_retry(3))
        .create_new_workspace(json!({}))
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(400));
}

// ============================================================================
// Pagination and sideloads
// ============================================================================

#[tokio::test]
async fn test_annotations_across_pages_with_sideloads() {
    let server = MockServer::start().await;
    let next = format!("{}/annotations?page=2&sideload=documents", base_url(&server));

    let annotation = |id: i64, document: i64| {
        json!({
            "id": id,
            "url": format!("https://elis.rossum.ai/api/v1/annotations/{id}"),
            "status": "to_review",
            "schema": "https://elis.rossum.ai/api/v1/schemas/31336",
            "document": format!("https://elis.rossum.ai/api/v1/documents/{document}")
        })
    };
    let document = |id: i64| {
        json!({
            "id": id,
            "url": format!("https://elis.rossum.ai/api/v1/documents/{id}"),
            "original_file_name": format!("invoice-{id}.pdf")
        })
    };

    Mock::given(method("GET"))
        .and(path("/api/v1/annotations"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": null},
            "results": [annotation(2, 20)],
            "documents": [document(20)]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/annotations"))
        .and(query_param("sideload", "documents"))
        .and(query_param("ordering", "-created_at"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": next},
            "results": [annotation(1, 10)],
            "documents": [document(10)]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;

    let client = token_client(&server, RetryPolicy::none());
    let annotations: Vec<_> = client
        .list_annotations(
            ListQuery::new()
                .ordering("-created_at")
                .sideload("documents"),
        )
        .try_collect()
        .await
        .unwrap();

    let files: Vec<_> = annotations
        .iter()
        .map(|a| {
            a.document
                .as_ref()
                .and_then(Link::expanded)
                .and_then(|d| d.original_file_name.clone())
                .unwrap()
        })
        .collect();
    assert_eq!(files, ["invoice-10.pdf", "invoice-20.pdf"]);
}

#[tokio::test]
async fn test_stream_stops_early_without_fetching_more_pages() {
    let server = MockServer::start().await;
    let next = format!("{}/workspaces?page=2", base_url(&server));

    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "pagination": {"next": next},
            "results": [workspace(1), workspace(2)]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = token_client(&server, RetryPolicy::none());
    let mut workspaces = client.list_workspaces(ListQuery::new());
    let first = workspaces.try_next().await.unwrap().unwrap();

    assert_eq!(first.id, 1);
}

// ============================================================================
// Workflows
// ============================================================================

#[tokio::test]
async fn test_upload_and_wait_for_task() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("invoice.pdf");
    std::fs::write(&file, b"%PDF-1.4 test").unwrap();

    Mock::given(method("POST"))
        .and(path("/api/v1/uploads"))
        .and(query_param("queue", "8198"))
        .respond_with(
            ResponseTemplate::new(202)
                .set_body_json(json!({"url": "https://elis.rossum.ai/api/v1/tasks/77"})),
        )
        .mount(&server)
        .await;

    let task = |status: &str| {
        json!({
            "id": 77,
            "url": "https://elis.rossum.ai/api/v1/tasks/77",
            "type": "upload_created",
            "status": status,
            "content": {"upload": "https://elis.rossum.ai/api/v1/uploads/3"}
        })
    };
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task("running")))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/tasks/77"))
        .respond_with(ResponseTemplate::new(200).set_body_json(task("succeeded")))
        .mount(&server)
        .await;

    let client = token_client(&server, RetryPolicy::none());
    let tasks = client
        .upload_document(8198, &[UploadFile::from_path(&file)], None, None)
        .await
        .unwrap();
    let options = PollOptions::new()
        .interval(Duration::from_millis(5))
        .timeout(Duration::from_secs(5));
    let done = client
        .poll_task_until_succeeded(tasks[0].id, &options)
        .await
        .unwrap();

    assert_eq!(done.status, TaskStatus::Succeeded);
    assert_eq!(done.content["upload"], "https://elis.rossum.ai/api/v1/uploads/3");
}

#[tokio::test]
async fn test_schema_tree_from_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/schemas/31336"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 31336,
            "name": "Invoices",
            "url": "https://elis.rossum.ai/api/v1/schemas/31336",
            "content": [{
                "id": "totals",
                "category": "section",
                "children": [
                    {"id": "amount_total", "category": "datapoint", "type": "number"},
                    {"id": "amount_check", "category": "datapoint", "type": "formula",
                     "formula": "field.amount_total * 2"}
                ]
            }]
        })))
        .mount(&server)
        .await;

    let schema = token_client(&server, RetryPolicy::none())
        .retrieve_schema(31336)
        .await
        .unwrap();

    let formulas: Vec<_> = schema.formula_fields(true).map(|dp| dp.id.as_str()).collect();
    assert_eq!(formulas, ["amount_check"]);
    let total = schema.get_by_id("amount_total", true).unwrap();
    assert_eq!(
        total.as_datapoint().unwrap().datapoint_type,
        Some(DatapointType::Number)
    );
    assert_eq!(schema.parent_of("amount_total").unwrap().id(), "totals");
}

#[tokio::test]
async fn test_config_from_yaml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rossum.yaml");
    std::fs::write(
        &path,
        r"
base_url: https://example.rossum.app/api/v1
credentials:
  username: john
  password: secret
timeout: 10
page_size: 50
",
    )
    .unwrap();

    let config = ClientConfig::from_file(&path).unwrap();
    assert_eq!(config.base_url, "https://example.rossum.app/api/v1");
    assert_eq!(config.timeout, Duration::from_secs(10));
    assert_eq!(config.page_size, 50);
    assert!(config.credentials.can_refresh());
    assert!(Client::new(&config).is_ok());
}
