//! Tool execution types
//!
//! Defines the traits and context shared by every tool implementation.

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Static metadata for a tool, implemented via the `#[gitlab_tool]` macro.
pub trait ToolInfo {
    /// Unique tool name (e.g., "list_issues")
    fn name() -> &'static str;

    /// Human-readable description shown to MCP clients
    fn description() -> &'static str;

    /// The kind of operation this tool performs against GitLab
    fn operation() -> OperationKind;
}

/// The kind of REST operation a tool performs.
///
/// Everything except `Read` maps to the POST/PUT/DELETE surface and is
/// excluded from the registry in read-only mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    /// Read operations (get, list, search)
    Read,
    /// Write operations (create, update)
    Write,
    /// Delete operations
    Delete,
    /// Action operations (merge, retry, cancel, play)
    Execute,
}

impl OperationKind {
    /// Check if this operation modifies data on the GitLab side
    pub const fn is_mutating(&self) -> bool {
        !matches!(self, OperationKind::Read)
    }

    /// Get the operation name as a string
    pub const fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Read => "read",
            OperationKind::Write => "write",
            OperationKind::Delete => "delete",
            OperationKind::Execute => "execute",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-invocation context handed to every tool.
///
/// Carries the shared GitLab client explicitly so each handler's dependency
/// on credentials and base URL is visible at the type level.
#[derive(Clone)]
pub struct ToolContext {
    /// Shared GitLab API client
    pub gitlab: Arc<GitLabClient>,
    /// Request ID for tracing
    pub request_id: String,
}

impl ToolContext {
    /// Create a new tool context
    pub fn new(gitlab: Arc<GitLabClient>, request_id: impl Into<String>) -> Self {
        Self {
            gitlab,
            request_id: request_id.into(),
        }
    }
}

/// Uniform result envelope returned from a tool invocation.
///
/// Either a success payload (raw response text, typically JSON) or an error
/// message, flagged via `is_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    /// The payload or error text
    pub text: String,
    /// Whether this output represents a failure
    pub is_error: bool,
}

impl ToolOutput {
    /// Create a success output carrying the given payload text.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_error: false,
        }
    }

    /// Create an error output carrying the given message.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            text: message.into(),
            is_error: true,
        }
    }
}

/// Executable behavior of a tool.
#[async_trait]
pub trait ToolExecutor {
    /// Execute the tool against GitLab.
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_kind_mutating() {
        assert!(!OperationKind::Read.is_mutating());
        assert!(OperationKind::Write.is_mutating());
        assert!(OperationKind::Delete.is_mutating());
        assert!(OperationKind::Execute.is_mutating());
    }

    #[test]
    fn test_operation_kind_display() {
        assert_eq!(OperationKind::Read.to_string(), "read");
        assert_eq!(OperationKind::Execute.to_string(), "execute");
    }

    #[test]
    fn test_tool_output_constructors() {
        let ok = ToolOutput::text("{}");
        assert!(!ok.is_error);
        assert_eq!(ok.text, "{}");

        let err = ToolOutput::error("boom");
        assert!(err.is_error);
        assert_eq!(err.text, "boom");
    }
}
