//! Commit tools
//!
//! Tools for inspecting and acting on repository commits.

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::params;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List repository commits
#[gitlab_tool(
    name = "list_commits",
    description = "List repository commits with optional filtering by ref, path, author, or time range",
    operation = "read"
)]
pub struct ListCommits {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Branch, tag, or commit SHA to list from
    #[serde(default)]
    pub ref_name: Option<String>,
    /// Only commits touching this file path
    #[serde(default)]
    pub path: Option<String>,
    /// Only commits by this author (name or email)
    #[serde(default)]
    pub author: Option<String>,
    /// Only commits after this ISO 8601 timestamp
    #[serde(default)]
    pub since: Option<String>,
    /// Only commits before this ISO 8601 timestamp
    #[serde(default)]
    pub until: Option<String>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListCommits {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let since = params::checked_timestamp("since", self.since.as_deref())?;
        let until = params::checked_timestamp("until", self.until.as_deref())?;

        let query = QueryBuilder::new()
            .optional_encoded("ref_name", self.ref_name.as_ref())
            .optional_encoded("path", self.path.as_ref())
            .optional_encoded("author", self.author.as_ref())
            .optional("since", since)
            .optional("until", until)
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/repository/commits{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a specific commit
#[gitlab_tool(
    name = "get_commit",
    description = "Get detailed information about a specific commit",
    operation = "read"
)]
pub struct GetCommit {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Commit SHA or ref name
    pub sha: String,
}

#[async_trait]
impl ToolExecutor for GetCommit {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let sha = GitLabClient::encode_path(&self.sha);
        let endpoint = format!("/projects/{}/repository/commits/{}", project, sha);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get the diff of a commit
#[gitlab_tool(
    name = "get_commit_diff",
    description = "Get the diff introduced by a specific commit",
    operation = "read"
)]
pub struct GetCommitDiff {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Commit SHA or ref name
    pub sha: String,
}

#[async_trait]
impl ToolExecutor for GetCommitDiff {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let sha = GitLabClient::encode_path(&self.sha);
        let endpoint = format!("/projects/{}/repository/commits/{}/diff", project, sha);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// List comments on a commit
#[gitlab_tool(
    name = "list_commit_comments",
    description = "List comments on a specific commit",
    operation = "read"
)]
pub struct ListCommitComments {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Commit SHA or ref name
    pub sha: String,
}

#[async_trait]
impl ToolExecutor for ListCommitComments {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let sha = GitLabClient::encode_path(&self.sha);
        let endpoint = format!("/projects/{}/repository/commits/{}/comments", project, sha);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Comment on a commit
#[gitlab_tool(
    name = "create_commit_comment",
    description = "Add a comment to a commit, optionally anchored to a file line",
    operation = "write"
)]
pub struct CreateCommitComment {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Commit SHA
    pub sha: String,
    /// Comment text
    pub note: String,
    /// File path to anchor the comment to
    #[serde(default)]
    pub path: Option<String>,
    /// Line number to anchor the comment to
    #[serde(default)]
    pub line: Option<u32>,
}

#[async_trait]
impl ToolExecutor for CreateCommitComment {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let sha = GitLabClient::encode_path(&self.sha);
        let endpoint = format!("/projects/{}/repository/commits/{}/comments", project, sha);

        let mut body = serde_json::json!({ "note": self.note });
        if let Some(path) = &self.path {
            body["path"] = serde_json::json!(path);
        }
        if let Some(line) = self.line {
            body["line"] = serde_json::json!(line);
            body["line_type"] = serde_json::json!("new");
        }

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Get commit CI statuses
#[gitlab_tool(
    name = "get_commit_statuses",
    description = "Get the CI statuses reported for a commit",
    operation = "read"
)]
pub struct GetCommitStatuses {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Commit SHA
    pub sha: String,
    /// Filter by ref name
    #[serde(default)]
    pub ref_name: Option<String>,
    /// Filter by status name (e.g., "build")
    #[serde(default)]
    pub name: Option<String>,
}

#[async_trait]
impl ToolExecutor for GetCommitStatuses {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let sha = GitLabClient::encode_path(&self.sha);
        let query = QueryBuilder::new()
            .optional_encoded("ref", self.ref_name.as_ref())
            .optional_encoded("name", self.name.as_ref())
            .build();

        let endpoint = format!(
            "/projects/{}/repository/commits/{}/statuses{}",
            project, sha, query
        );
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Cherry-pick a commit
#[gitlab_tool(
    name = "cherry_pick_commit",
    description = "Cherry-pick a commit onto a branch",
    operation = "execute"
)]
pub struct CherryPickCommit {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Commit SHA to cherry-pick
    pub sha: String,
    /// Target branch
    pub branch: String,
}

#[async_trait]
impl ToolExecutor for CherryPickCommit {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let sha = GitLabClient::encode_path(&self.sha);
        let endpoint = format!(
            "/projects/{}/repository/commits/{}/cherry_pick",
            project, sha
        );

        let body = serde_json::json!({ "branch": self.branch });
        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Revert a commit
#[gitlab_tool(
    name = "revert_commit",
    description = "Revert a commit on a branch",
    operation = "execute"
)]
pub struct RevertCommit {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Commit SHA to revert
    pub sha: String,
    /// Target branch
    pub branch: String,
}

#[async_trait]
impl ToolExecutor for RevertCommit {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let sha = GitLabClient::encode_path(&self.sha);
        let endpoint = format!("/projects/{}/repository/commits/{}/revert", project, sha);

        let body = serde_json::json!({ "branch": self.branch });
        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}
