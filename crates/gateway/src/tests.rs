//! Router-level tests against an in-memory SQLite store

use super::*;
use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
};
use bibforge_common::{
    config::{DatabaseConfig, RateLimitConfig},
    db::models::{Citation, CitationInput},
    errors::{AppError, Result},
};
use serde_json::{json, Value};
use std::time::Duration;
use tower::ServiceExt;

async fn test_app_with(config: AppConfig) -> Router {
    let db = DbPool::new(&DatabaseConfig::in_memory()).await.unwrap();
    let state = AppState {
        config: Arc::new(config),
        store: Arc::new(Repository::new(db)),
    };
    create_router(state)
}

async fn test_app() -> Router {
    test_app_with(AppConfig::default()).await
}

struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl TestResponse {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec();

    TestResponse { status, headers, body }
}

async fn create(app: &Router, payload: Value) -> Value {
    let response = send(app, Method::POST, "/api/citations", Some(payload)).await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.json()
}

fn smith() -> Value {
    json!({
        "title": "T",
        "authors": "Smith, J.",
        "journal": "J",
        "year": 2020
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/health", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], bibforge_common::VERSION);
}

#[tokio::test]
async fn test_ready_reports_store() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let body = response.json();
    assert_eq!(body["status"], "ready");
    assert!(body["store_latency_ms"].is_u64());
}

#[tokio::test]
async fn test_list_empty_is_array() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/citations", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.json(), json!([]));
}

#[tokio::test]
async fn test_create_ignores_client_identity() {
    let app = test_app().await;
    let mut payload = smith();
    payload["id"] = json!("my-id");
    payload["created_at"] = json!("1999-01-01T00:00:00Z");

    let created = create(&app, payload).await;
    assert_ne!(created["id"], "my-id");
    assert_ne!(created["created_at"], "1999-01-01T00:00:00Z");
    assert_eq!(created["created_at"], created["updated_at"]);
    assert_eq!(created["title"], "T");
    assert_eq!(created["volume"], "");
    assert_eq!(created["abstract"], "");

    let id = created["id"].as_str().unwrap();
    let fetched = send(&app, Method::GET, &format!("/api/citations/{}", id), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.json(), created);
}

#[tokio::test]
async fn test_create_malformed_year_is_bad_request() {
    let app = test_app().await;
    let response = send(
        &app,
        Method::POST,
        "/api/citations",
        Some(json!({ "title": "T", "year": "2020a" })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"].is_string());
}

#[tokio::test]
async fn test_create_without_year_is_bad_request() {
    let app = test_app().await;
    let response = send(&app, Method::POST, "/api/citations", Some(json!({ "title": "T" }))).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.json()["error"]
        .as_str()
        .unwrap()
        .contains("missing field `year`"));

    let list = send(&app, Method::GET, "/api/citations", None).await;
    assert_eq!(list.json(), json!([]));
}

#[tokio::test]
async fn test_create_invalid_json_is_bad_request() {
    let app = test_app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/citations")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_empty_title_is_bad_request() {
    let app = test_app().await;
    let response = send(
        &app,
        Method::POST,
        "/api/citations",
        Some(json!({ "title": "", "year": 2020 })),
    )
    .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_is_not_found() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/citations/does-not-exist", None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["error"], "Citation not found: does-not-exist");
}

#[tokio::test]
async fn test_update_preserves_id_and_created_at() {
    let app = test_app().await;
    let created = create(&app, smith()).await;
    let id = created["id"].as_str().unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/citations/{}", id),
        Some(json!({
            "id": "other",
            "created_at": "2000-01-01T00:00:00Z",
            "title": "Revised",
            "authors": "Doe, A.",
            "journal": "Science",
            "year": 2021,
            "doi": "10.1/x"
        })),
    )
    .await;
    assert_eq!(response.status, StatusCode::OK);

    let updated = response.json();
    assert_eq!(updated["id"], created["id"]);
    assert_eq!(updated["created_at"], created["created_at"]);
    assert_ne!(updated["updated_at"], created["updated_at"]);
    assert_eq!(updated["title"], "Revised");
    assert_eq!(updated["doi"], "10.1/x");
}

#[tokio::test]
async fn test_update_unknown_is_not_found() {
    let app = test_app().await;
    let response = send(&app, Method::PUT, "/api/citations/ghost", Some(smith())).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = test_app().await;
    let created = create(&app, smith()).await;
    let uri = format!("/api/citations/{}", created["id"].as_str().unwrap());

    let first = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(first.status, StatusCode::OK);
    assert_eq!(first.json()["message"], "Citation deleted successfully");

    let gone = send(&app, Method::GET, &uri, None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);

    let again = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(again.status, StatusCode::OK);
}

#[tokio::test]
async fn test_list_newest_first() {
    let app = test_app().await;
    for title in ["one", "two", "three"] {
        let mut payload = smith();
        payload["title"] = json!(title);
        create(&app, payload).await;
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let list = send(&app, Method::GET, "/api/citations", None).await.json();
    let titles: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["three", "two", "one"]);
}

#[tokio::test]
async fn test_search_requires_query() {
    let app = test_app().await;

    let missing = send(&app, Method::GET, "/api/search", None).await;
    assert_eq!(missing.status, StatusCode::BAD_REQUEST);
    let body = missing.json();
    assert_eq!(body["error"], "Search query is required");
    assert_eq!(body["field"], "q");

    let empty = send(&app, Method::GET, "/api/search?q=", None).await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_search_repeated_query_is_structured_error() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/search?q=a&q=b", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let body = response.json();
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["error"].as_str().unwrap().contains("duplicate field"));
}

#[tokio::test]
async fn test_search_filters_records() {
    let app = test_app().await;
    create(&app, smith()).await;
    create(
        &app,
        json!({ "title": "Other", "authors": "Doe, A.", "journal": "Cell", "year": 2001 }),
    )
    .await;

    let response = send(&app, Method::GET, "/api/search?q=smith", None).await;
    assert_eq!(response.status, StatusCode::OK);
    let hits = response.json();
    assert_eq!(hits.as_array().unwrap().len(), 1);
    assert_eq!(hits[0]["authors"], "Smith, J.");
}

#[tokio::test]
async fn test_export_defaults_to_json() {
    let app = test_app().await;
    let created = create(&app, smith()).await;

    let response = send(&app, Method::GET, "/api/export", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "application/json");
    assert!(response.headers.get(header::CONTENT_DISPOSITION).is_none());
    assert_eq!(response.json(), json!([created]));
}

#[tokio::test]
async fn test_export_bibtex() {
    let app = test_app().await;
    create(&app, smith()).await;

    let response = send(&app, Method::GET, "/api/export?format=bibtex", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "text/plain");
    assert_eq!(
        response.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=citations.bib"
    );

    let text = response.text();
    assert!(text.contains("\n@article{Smith2020,\n  title = {T},\n"));
}

#[tokio::test]
async fn test_export_csv() {
    let app = test_app().await;
    create(&app, smith()).await;

    let response = send(&app, Method::GET, "/api/export?format=csv", None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers[header::CONTENT_TYPE], "text/csv");
    assert_eq!(
        response.headers[header::CONTENT_DISPOSITION],
        "attachment; filename=citations.csv"
    );
    assert_eq!(
        response.text(),
        "Title,Authors,Journal,Year,Volume,Issue,Pages,DOI,URL,Abstract,Keywords\n\
         \"T\",\"Smith, J.\",\"J\",2020,\"\",\"\",\"\",\"\",\"\",\"\",\"\"\n"
    );
}

#[tokio::test]
async fn test_export_unknown_format() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/export?format=xml", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let message = response.json()["error"].as_str().unwrap().to_string();
    assert!(message.contains("'json', 'bibtex' or 'csv'"));
}

#[tokio::test]
async fn test_export_repeated_format_is_structured_error() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/api/export?format=csv&format=xml", None).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(response.json()["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = test_app().await;
    let response = send(&app, Method::GET, "/health", None).await;
    let id = response.headers["x-request-id"].to_str().unwrap();
    assert!(!id.is_empty());
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = test_app().await;
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "trace-42")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.headers()["x-request-id"], "trace-42");
}

#[tokio::test]
async fn test_rate_limit_rejects_burst() {
    let config = AppConfig {
        rate_limit: RateLimitConfig {
            enabled: true,
            requests_per_second: 1,
            burst: 1,
        },
        ..AppConfig::default()
    };
    let app = test_app_with(config).await;

    let first = send(&app, Method::GET, "/health", None).await;
    assert_eq!(first.status, StatusCode::OK);

    let second = send(&app, Method::GET, "/health", None).await;
    assert_eq!(second.status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(second.json()["code"], "RATE_LIMITED");
}

/// Store whose engine is always failing
struct BrokenStore;

#[async_trait]
impl CitationStore for BrokenStore {
    async fn list(&self) -> Result<Vec<Citation>> {
        Err(broken())
    }
    async fn get(&self, _id: &str) -> Result<Citation> {
        Err(broken())
    }
    async fn create(&self, _input: CitationInput) -> Result<Citation> {
        Err(broken())
    }
    async fn update(&self, _id: &str, _input: CitationInput) -> Result<Citation> {
        Err(broken())
    }
    async fn delete(&self, _id: &str) -> Result<()> {
        Err(broken())
    }
    async fn search(&self, _query: &str) -> Result<Vec<Citation>> {
        Err(broken())
    }
    async fn ping(&self) -> Result<()> {
        Err(broken())
    }
}

fn broken() -> AppError {
    AppError::DatabaseConnection {
        message: "database is locked".to_string(),
    }
}

#[tokio::test]
async fn test_storage_failure_is_server_error() {
    let app = create_router(AppState {
        config: Arc::new(AppConfig::default()),
        store: Arc::new(BrokenStore),
    });

    let response = send(&app, Method::GET, "/api/citations", None).await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.json()["error"]
        .as_str()
        .unwrap()
        .contains("database is locked"));

    let ready = send(&app, Method::GET, "/ready", None).await;
    assert_eq!(ready.status, StatusCode::SERVICE_UNAVAILABLE);
    let body = ready.json();
    assert_eq!(body["code"], "SERVICE_UNAVAILABLE");
    assert!(body["error"].as_str().unwrap().contains("database is locked"));
}
