//! Configuration types for marmot-mcp
//!
//! This module defines the configuration structure that can be loaded from
//! TOML files and/or environment variables.

use crate::util::SecretString;
use serde::Deserialize;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// GitLab connection settings
    pub gitlab: GitLabConfig,

    /// Server/transport settings
    pub server: ServerConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// GitLab connection configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GitLabConfig {
    /// GitLab instance URL (e.g., `https://gitlab.com`)
    pub url: String,

    /// Personal Access Token (prefer env var GITLAB_TOKEN).
    ///
    /// A missing token is not a startup failure: tool invocations report it
    /// as a per-invocation error instead.
    #[serde(default)]
    pub token: Option<SecretString>,

    /// API version (default: "v4")
    pub api_version: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Whether to verify SSL certificates
    pub verify_ssl: bool,
}

impl Default for GitLabConfig {
    fn default() -> Self {
        Self {
            url: "https://gitlab.com".to_string(),
            token: None,
            api_version: "v4".to_string(),
            timeout_secs: 30,
            verify_ssl: true,
        }
    }
}

impl GitLabConfig {
    /// Get the full API base URL
    pub fn api_url(&self) -> String {
        format!(
            "{}/api/{}",
            self.url.trim_end_matches('/'),
            self.api_version
        )
    }
}

/// Server/transport configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Transport mode
    pub transport: TransportMode,

    /// HTTP host (for http transport)
    pub host: String,

    /// HTTP port (for http transport)
    pub port: u16,

    /// Server name for MCP
    pub name: String,

    /// Server version for MCP
    pub version: String,

    /// Read-only mode: when true, mutating tools (the POST/PUT/DELETE
    /// surface) are excluded from the registry at startup.
    pub read_only: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            transport: TransportMode::Stdio,
            host: "127.0.0.1".to_string(),
            port: 20289,
            name: "marmot-mcp".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            read_only: false,
        }
    }
}

/// Transport mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Standard input/output (default, for local MCP clients)
    #[default]
    Stdio,
    /// HTTP with Server-Sent Events
    Http,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Output format (pretty, json)
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable output
    #[default]
    Pretty,
    /// JSON structured output
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gitlab_config_api_url() {
        let config = GitLabConfig {
            url: "https://gitlab.example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_url(), "https://gitlab.example.com/api/v4");

        // Trailing slash is trimmed
        let config = GitLabConfig {
            url: "https://gitlab.example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.api_url(), "https://gitlab.example.com/api/v4");
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.gitlab.url, "https://gitlab.com");
        assert_eq!(config.gitlab.timeout_secs, 30);
        assert_eq!(config.server.transport, TransportMode::Stdio);
        assert!(!config.server.read_only);
    }

    #[test]
    fn test_token_not_shown_in_debug() {
        let config = GitLabConfig {
            token: Some(SecretString::new("glpat-secret")),
            ..Default::default()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("glpat-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
