//! Configuration loading tests

use marmot_mcp::config::{LogFormat, TransportMode, load_config, load_config_from_str};
use serial_test::serial;
use std::io::Write;

const MINIMAL_CONFIG: &str = r#"
[server]
name = "test-server"

[gitlab]
url = "https://gitlab.example.com"
token = "test-token"
"#;

const FULL_CONFIG: &str = r#"
[server]
name = "marmot-mcp-test"
version = "0.1.0"
transport = "http"
host = "0.0.0.0"
port = 9000
read_only = true

[gitlab]
url = "https://gitlab.company.com"
token = "glpat-test"
timeout_secs = 60
verify_ssl = false

[logging]
level = "debug"
format = "json"
"#;

#[test]
fn test_minimal_config() {
    let config = load_config_from_str(MINIMAL_CONFIG).unwrap();

    assert_eq!(config.server.name, "test-server");
    assert_eq!(config.gitlab.url, "https://gitlab.example.com");
    assert_eq!(config.server.transport, TransportMode::Stdio);
    assert!(!config.server.read_only);
}

#[test]
fn test_full_config() {
    let config = load_config_from_str(FULL_CONFIG).unwrap();

    assert_eq!(config.server.transport, TransportMode::Http);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, 9000);
    assert!(config.server.read_only);
    assert_eq!(config.gitlab.timeout_secs, 60);
    assert!(!config.gitlab.verify_ssl);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
}

#[test]
fn test_defaults_applied() {
    let config = load_config_from_str(
        r#"
[gitlab]
url = "https://gitlab.com"
"#,
    )
    .unwrap();

    assert_eq!(config.gitlab.api_version, "v4");
    assert_eq!(config.gitlab.timeout_secs, 30);
    assert!(config.gitlab.verify_ssl);
    assert_eq!(config.server.name, "marmot-mcp");
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_api_url_from_config() {
    let config = load_config_from_str(MINIMAL_CONFIG).unwrap();
    assert_eq!(config.gitlab.api_url(), "https://gitlab.example.com/api/v4");
}

#[test]
fn test_invalid_transport_rejected() {
    let result = load_config_from_str(
        r#"
[server]
transport = "carrier-pigeon"

[gitlab]
url = "https://gitlab.com"
"#,
    );
    assert!(result.is_err());
}

#[test]
fn test_explicit_config_path_must_exist() {
    let result = load_config(Some("/nonexistent/marmot-mcp.toml"));
    assert!(result.is_err());
}

#[test]
#[serial]
fn test_load_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[server]
name = "from-file"

[gitlab]
url = "https://gitlab.internal.example"
token = "file-token"
"#
    )
    .unwrap();

    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.server.name, "from-file");
    assert_eq!(config.gitlab.url, "https://gitlab.internal.example");
}

#[test]
#[serial]
fn test_gitlab_token_env_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[gitlab]
url = "https://gitlab.example.com"
"#
    )
    .unwrap();

    unsafe {
        std::env::set_var("GITLAB_TOKEN", "env-token");
    }

    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    assert_eq!(
        config.gitlab.token.as_ref().map(|t| t.expose_secret()),
        Some("env-token")
    );

    unsafe {
        std::env::remove_var("GITLAB_TOKEN");
    }
}

#[test]
#[serial]
fn test_gitlab_url_env_override() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r#"
[gitlab]
url = "https://gitlab.example.com"
"#
    )
    .unwrap();

    unsafe {
        std::env::set_var("GITLAB_URL", "https://gitlab.override.example");
    }

    let config = load_config(Some(file.path().to_str().unwrap())).unwrap();
    assert_eq!(config.gitlab.url, "https://gitlab.override.example");

    unsafe {
        std::env::remove_var("GITLAB_URL");
    }
}
