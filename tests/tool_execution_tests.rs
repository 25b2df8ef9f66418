//! End-to-end tool execution tests against a mock GitLab server

use marmot_mcp::auth::PatProvider;
use marmot_mcp::config::GitLabConfig;
use marmot_mcp::error::ToolError;
use marmot_mcp::gitlab::GitLabClient;
use marmot_mcp::tools::{ToolContext, ToolRegistry};
use marmot_mcp::util::SecretString;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_context(mock_server: &MockServer) -> ToolContext {
    let config = GitLabConfig {
        url: mock_server.uri(),
        token: Some(SecretString::new("test-token")),
        ..Default::default()
    };
    let auth = PatProvider::new(SecretString::new("test-token"));
    let gitlab = Arc::new(GitLabClient::new(&config, Box::new(auth)).unwrap());
    ToolContext::new(gitlab, "test-request")
}

#[tokio::test]
async fn test_omitted_optional_params_are_absent_from_request() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/7/issues"))
        .and(query_param_is_missing("state"))
        .and(query_param_is_missing("labels"))
        .and(query_param_is_missing("search"))
        .and(query_param_is_missing("created_after"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let output = registry
        .execute("list_issues", &ctx, json!({"project": "7"}))
        .await
        .unwrap();

    assert!(!output.is_error);
    assert_eq!(output.text, "[]");
}

#[tokio::test]
async fn test_defaulted_boolean_is_always_forwarded() {
    let mock_server = MockServer::start().await;

    // `archived` has a declared default, so it is emitted as false even when
    // the caller provides nothing
    Mock::given(method("GET"))
        .and(path("/api/v4/projects"))
        .and(query_param("archived", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let output = registry
        .execute("list_projects", &ctx, json!({}))
        .await
        .unwrap();

    assert!(!output.is_error);
}

#[tokio::test]
async fn test_csv_list_param_is_forwarded_in_order() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1/issues"))
        .and(query_param("labels", "bug,p1,backend"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let output = registry
        .execute(
            "list_issues",
            &ctx,
            json!({"project": "1", "labels": "bug,p1,backend"}),
        )
        .await
        .unwrap();

    assert!(!output.is_error);
}

#[tokio::test]
async fn test_empty_csv_list_param_stays_unset() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1/issues"))
        .and(query_param_is_missing("labels"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let output = registry
        .execute("list_issues", &ctx, json!({"project": "1", "labels": ""}))
        .await
        .unwrap();

    assert!(!output.is_error);
}

#[tokio::test]
async fn test_valid_timestamp_param_is_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1/issues"))
        .and(query_param("created_after", "2024-01-15T08:00:00+00:00"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .mount(&mock_server)
        .await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let output = registry
        .execute(
            "list_issues",
            &ctx,
            json!({"project": "1", "created_after": "2024-01-15T08:00:00Z"}),
        )
        .await
        .unwrap();

    assert!(!output.is_error);
}

#[tokio::test]
async fn test_invalid_timestamp_is_rejected_before_any_request() {
    let mock_server = MockServer::start().await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let err = registry
        .execute(
            "list_issues",
            &ctx,
            json!({"project": "1", "created_after": "yesterday"}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::InvalidArguments(_)));
    assert!(err.to_string().contains("created_after"));

    // Validation happens before the client is touched
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_date_is_rejected_for_mutating_tool() {
    let mock_server = MockServer::start().await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let err = registry
        .execute(
            "create_milestone",
            &ctx,
            json!({"project": "1", "title": "v1.0", "due_date": "June 2024"}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::InvalidArguments(_)));
    assert!(err.to_string().contains("due_date"));
}

#[tokio::test]
async fn test_application_error_surfaces_status_line_and_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1/issues/99"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"message":"404 Issue Not Found"}"#),
        )
        .mount(&mock_server)
        .await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let err = registry
        .execute("get_issue", &ctx, json!({"project": "1", "issue_iid": 99}))
        .await
        .unwrap_err();

    let text = err.to_string();
    assert!(text.contains("404 Not Found"));
    assert!(text.contains("404 Issue Not Found"));
}

#[tokio::test]
async fn test_missing_required_argument_is_invalid() {
    let mock_server = MockServer::start().await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let err = registry
        .execute("get_issue", &ctx, json!({"project": "1"}))
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::InvalidArguments(_)));
    assert!(err.to_string().contains("issue_iid"));
}

#[tokio::test]
async fn test_mutating_tool_is_unknown_in_read_only_mode() {
    let mock_server = MockServer::start().await;

    let registry = ToolRegistry::discover(true);
    let ctx = create_context(&mock_server);

    let err = registry
        .execute(
            "create_issue",
            &ctx,
            json!({"project": "1", "title": "nope"}),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, ToolError::NotFound(_)));
    assert!(mock_server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_issue_posts_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/v4/projects/1/issues"))
        .and(wiremock::matchers::body_json(json!({
            "title": "Crash on startup",
            "labels": "bug,p1",
        })))
        .respond_with(ResponseTemplate::new(201).set_body_string(r#"{"iid":12}"#))
        .mount(&mock_server)
        .await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let output = registry
        .execute(
            "create_issue",
            &ctx,
            json!({"project": "1", "title": "Crash on startup", "labels": "bug, p1"}),
        )
        .await
        .unwrap();

    assert!(!output.is_error);
    assert_eq!(output.text, r#"{"iid":12}"#);
}

#[tokio::test]
async fn test_get_file_decodes_base64_content() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v4/projects/1/repository/files/README.md"))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            // "# Hello\n" base64-encoded
            r#"{"file_name":"README.md","encoding":"base64","content":"IyBIZWxsbwo="}"#,
        ))
        .mount(&mock_server)
        .await;

    let registry = ToolRegistry::discover(false);
    let ctx = create_context(&mock_server);

    let output = registry
        .execute(
            "get_file",
            &ctx,
            json!({"project": "1", "file_path": "README.md", "ref_name": "main"}),
        )
        .await
        .unwrap();

    assert!(!output.is_error);
    assert_eq!(output.text, "# Hello\n");
}
