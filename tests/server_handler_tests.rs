//! Server handler integration tests

use marmot_mcp::auth::PatProvider;
use marmot_mcp::config::AppConfig;
use marmot_mcp::gitlab::GitLabClient;
use marmot_mcp::server::GitLabMcpHandler;
use marmot_mcp::util::SecretString;
use rmcp::handler::server::ServerHandler;
use std::sync::Arc;
use wiremock::MockServer;

/// Create test configuration pointing at the mock server
fn create_test_config(gitlab_url: &str, read_only: bool) -> AppConfig {
    let mut config = AppConfig::default();
    config.server.name = "test-marmot-mcp".to_string();
    config.server.version = "0.0.1".to_string();
    config.server.read_only = read_only;
    config.gitlab.url = gitlab_url.to_string();
    config.gitlab.token = Some(SecretString::new("test-token"));
    config
}

fn create_test_handler(mock_server: &MockServer, read_only: bool) -> GitLabMcpHandler {
    let config = create_test_config(&mock_server.uri(), read_only);
    let auth = PatProvider::new(SecretString::new("test-token"));
    let gitlab = Arc::new(GitLabClient::new(&config.gitlab, Box::new(auth)).unwrap());
    GitLabMcpHandler::new(&config, gitlab)
}

#[tokio::test]
async fn test_handler_get_info() {
    let mock_server = MockServer::start().await;
    let handler = create_test_handler(&mock_server, false);

    let info = handler.get_info();

    assert_eq!(info.server_info.name, "test-marmot-mcp");
    assert_eq!(info.server_info.version, "0.0.1");
    assert!(info.capabilities.tools.is_some());
    assert!(info.instructions.is_some());
}

#[tokio::test]
async fn test_handler_registers_all_tools() {
    let mock_server = MockServer::start().await;
    let handler = create_test_handler(&mock_server, false);

    assert!(
        handler.tool_count() >= 100,
        "Expected at least 100 tools, got {}",
        handler.tool_count()
    );
}

#[tokio::test]
async fn test_read_only_handler_exposes_smaller_surface() {
    let mock_server = MockServer::start().await;

    let full = create_test_handler(&mock_server, false);
    let read_only = create_test_handler(&mock_server, true);

    assert!(read_only.tool_count() < full.tool_count());
    assert!(read_only.registry().is_read_only());
    assert!(read_only.registry().get("delete_project").is_none());
    assert!(read_only.registry().get("list_projects").is_some());
}
