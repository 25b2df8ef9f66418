//! Error types for marmot-mcp
//!
//! This module defines the error hierarchy used throughout the application.
//! We use `thiserror` for library-style errors that are part of the API,
//! and convert to appropriate MCP error responses at the boundary.
//!
//! Every invocation failure falls into one of three categories, all surfaced
//! to the caller as a textual error result rather than a crash:
//! missing credentials (`AuthError`), transport failure (`GitLabError::Request`),
//! or a non-2xx GitLab response (`GitLabError::Http`).

use thiserror::Error;

/// Top-level application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("GitLab API error: {0}")]
    GitLab(#[from] GitLabError),

    #[error("Tool execution error: {0}")]
    Tool(#[from] ToolError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(String),

    #[error("Invalid configuration: {message}")]
    Invalid { message: String },

    #[error("Missing required configuration: {field}")]
    Missing { field: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// GitLab API specific errors
#[derive(Error, Debug)]
pub enum GitLabError {
    /// Transport-level failure: connection, DNS, timeout, TLS. The request
    /// may never have reached GitLab.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// GitLab answered with a non-2xx status. The status line and the raw
    /// response body are both preserved so server-side diagnostics (GitLab's
    /// JSON error payloads) reach the caller.
    #[error("GitLab API error (HTTP {status} {reason}): {body}")]
    Http {
        status: u16,
        reason: String,
        body: String,
    },

    /// The response arrived but its body could not be read.
    #[error("Invalid response from GitLab: {0}")]
    InvalidResponse(String),

    /// Credentials were missing or unusable before the request was sent.
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl GitLabError {
    /// Build the application-error variant from a status code and body text.
    pub fn from_status(status: reqwest::StatusCode, body: String) -> Self {
        GitLabError::Http {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            body,
        }
    }
}

/// Tool execution errors
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("GitLab API error: {0}")]
    GitLab(#[from] GitLabError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Tool not found: {0}")]
    NotFound(String),
}

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("No GitLab token configured (set GITLAB_TOKEN or gitlab.token)")]
    NotConfigured,

    #[error("Invalid token format")]
    InvalidToken,
}

/// Result type alias for the application
pub type Result<T> = std::result::Result<T, AppError>;

/// Result type alias for tool operations
pub type ToolResult<T> = std::result::Result<T, ToolError>;

/// Result type alias for GitLab API operations
pub type GitLabResult<T> = std::result::Result<T, GitLabError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_preserves_status_line_and_body() {
        let err = GitLabError::from_status(
            reqwest::StatusCode::NOT_FOUND,
            r#"{"message":"404 Project Not Found"}"#.to_string(),
        );

        let text = err.to_string();
        assert!(text.contains("404 Not Found"));
        assert!(text.contains(r#"{"message":"404 Project Not Found"}"#));
    }

    #[test]
    fn test_http_error_unknown_reason() {
        let status = reqwest::StatusCode::from_u16(599).unwrap();
        let err = GitLabError::from_status(status, String::new());
        assert!(matches!(err, GitLabError::Http { status: 599, .. }));
    }

    #[test]
    fn test_auth_error_surfaces_through_gitlab_error() {
        let err: GitLabError = AuthError::NotConfigured.into();
        assert!(err.to_string().contains("GITLAB_TOKEN"));
    }

    #[test]
    fn test_tool_error_from_gitlab() {
        let err: ToolError = GitLabError::InvalidResponse("truncated".into()).into();
        assert!(err.to_string().contains("truncated"));
    }
}
