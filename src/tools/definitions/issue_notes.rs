//! Issue note tools
//!
//! Comments (notes) on issues.

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List notes on an issue
#[gitlab_tool(
    name = "list_issue_notes",
    description = "List comments (notes) on an issue",
    operation = "read"
)]
pub struct ListIssueNotes {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Issue IID
    pub issue_iid: u64,
    /// Sort order: asc or desc
    #[serde(default)]
    pub sort: Option<String>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListIssueNotes {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional("sort", self.sort.as_ref())
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!(
            "/projects/{}/issues/{}/notes{}",
            project, self.issue_iid, query
        );
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a single issue note
#[gitlab_tool(
    name = "get_issue_note",
    description = "Get a single comment (note) on an issue",
    operation = "read"
)]
pub struct GetIssueNote {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Issue IID
    pub issue_iid: u64,
    /// Note ID
    pub note_id: u64,
}

#[async_trait]
impl ToolExecutor for GetIssueNote {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/issues/{}/notes/{}",
            project, self.issue_iid, self.note_id
        );

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Add a comment to an issue
#[gitlab_tool(
    name = "create_issue_note",
    description = "Add a comment (note) to an issue",
    operation = "write"
)]
pub struct CreateIssueNote {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Issue IID
    pub issue_iid: u64,
    /// Comment body (Markdown)
    pub body: String,
}

#[async_trait]
impl ToolExecutor for CreateIssueNote {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/issues/{}/notes", project, self.issue_iid);

        let body = serde_json::json!({ "body": self.body });
        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Edit an issue comment
#[gitlab_tool(
    name = "update_issue_note",
    description = "Edit an existing comment (note) on an issue",
    operation = "write"
)]
pub struct UpdateIssueNote {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Issue IID
    pub issue_iid: u64,
    /// Note ID
    pub note_id: u64,
    /// New comment body
    pub body: String,
}

#[async_trait]
impl ToolExecutor for UpdateIssueNote {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/issues/{}/notes/{}",
            project, self.issue_iid, self.note_id
        );

        let body = serde_json::json!({ "body": self.body });
        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete an issue comment
#[gitlab_tool(
    name = "delete_issue_note",
    description = "Delete a comment (note) from an issue",
    operation = "delete"
)]
pub struct DeleteIssueNote {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Issue IID
    pub issue_iid: u64,
    /// Note ID
    pub note_id: u64,
}

#[async_trait]
impl ToolExecutor for DeleteIssueNote {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/issues/{}/notes/{}",
            project, self.issue_iid, self.note_id
        );

        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "Note {} deleted successfully",
            self.note_id
        )))
    }
}
