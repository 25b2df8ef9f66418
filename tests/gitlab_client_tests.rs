//! GitLab client integration tests with mock server

use marmot_mcp::auth::{PatProvider, Unauthenticated};
use marmot_mcp::config::GitLabConfig;
use marmot_mcp::error::{AuthError, GitLabError};
use marmot_mcp::gitlab::GitLabClient;
use marmot_mcp::util::SecretString;
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Helper to create a test client pointing to mock server
fn create_test_client(mock_server: &MockServer, token: &str) -> GitLabClient {
    let config = GitLabConfig {
        url: mock_server.uri(),
        token: Some(SecretString::new(token)),
        ..Default::default()
    };
    let auth = PatProvider::new(SecretString::new(token));
    GitLabClient::new(&config, Box::new(auth)).unwrap()
}

#[tokio::test]
async fn test_get_returns_raw_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/123"))
        .and(header("PRIVATE-TOKEN", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"id":1}"#))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, "test-token");
    let body = client.get("/projects/123").await.unwrap();

    // The payload is passed through unparsed
    assert_eq!(body, r#"{"id":1}"#);
}

#[tokio::test]
async fn test_not_found_error_includes_status_line_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"message":"404 Not Found"}"#),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, "test-token");
    let err = client.get("/projects/missing").await.unwrap_err();

    let text = err.to_string();
    assert!(text.contains("404 Not Found"), "missing status line: {text}");
    assert!(
        text.contains(r#"{"message":"404 Not Found"}"#),
        "missing body: {text}"
    );
}

#[tokio::test]
async fn test_server_error_preserves_diagnostic_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/1/issues"))
        .respond_with(
            ResponseTemplate::new(422).set_body_string(r#"{"message":{"title":["is too long"]}}"#),
        )
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, "test-token");
    let err = client
        .post("/projects/1/issues", &json!({"title": "x"}))
        .await
        .unwrap_err();

    assert!(matches!(err, GitLabError::Http { status: 422, .. }));
    assert!(err.to_string().contains("is too long"));
}

#[tokio::test]
async fn test_post_sends_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/1/issues"))
        .and(wiremock::matchers::body_json(json!({"title": "New issue"})))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"iid":7}"#))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, "test-token");
    let body = client
        .post("/projects/1/issues", &json!({"title": "New issue"}))
        .await
        .unwrap();

    assert_eq!(body, r#"{"iid":7}"#);
}

#[tokio::test]
async fn test_delete_with_empty_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/v4/projects/1/labels/old"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, "test-token");
    let body = client.delete("/projects/1/labels/old").await.unwrap();

    assert_eq!(body, "");
}

#[tokio::test]
async fn test_missing_token_is_per_invocation_error() {
    let mock_server = MockServer::start().await;

    let config = GitLabConfig {
        url: mock_server.uri(),
        ..Default::default()
    };
    let client = GitLabClient::new(&config, Box::new(Unauthenticated)).unwrap();

    // No mocks mounted: the error must be raised before any request is sent
    let err = client.get("/projects/1").await.unwrap_err();
    assert!(matches!(err, GitLabError::Auth(AuthError::NotConfigured)));

    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_transport_error_is_surfaced() {
    // Port 1 is essentially guaranteed to refuse connections
    let config = GitLabConfig {
        url: "http://127.0.0.1:1".to_string(),
        timeout_secs: 2,
        ..Default::default()
    };
    let auth = PatProvider::new(SecretString::new("tok"));
    let client = GitLabClient::new(&config, Box::new(auth)).unwrap();

    let err = client.get("/projects").await.unwrap_err();
    assert!(matches!(err, GitLabError::Request(_)));
}
