//! Merge request discussion tools

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List discussions on a merge request
#[gitlab_tool(
    name = "list_mr_discussions",
    description = "List discussion threads on a merge request",
    operation = "read"
)]
pub struct ListMrDiscussions {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListMrDiscussions {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!(
            "/projects/{}/merge_requests/{}/discussions{}",
            project, self.mr_iid, query
        );
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a single discussion on a merge request
#[gitlab_tool(
    name = "get_mr_discussion",
    description = "Get a single discussion thread on a merge request",
    operation = "read"
)]
pub struct GetMrDiscussion {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
    /// Discussion ID
    pub discussion_id: String,
}

#[async_trait]
impl ToolExecutor for GetMrDiscussion {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/merge_requests/{}/discussions/{}",
            project, self.mr_iid, self.discussion_id
        );

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Start a new discussion on a merge request
#[gitlab_tool(
    name = "create_mr_discussion",
    description = "Start a new discussion thread on a merge request",
    operation = "write"
)]
pub struct CreateMrDiscussion {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
    /// Discussion body (Markdown)
    pub body: String,
}

#[async_trait]
impl ToolExecutor for CreateMrDiscussion {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/merge_requests/{}/discussions",
            project, self.mr_iid
        );

        let body = serde_json::json!({ "body": self.body });
        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Reply to a discussion on a merge request
#[gitlab_tool(
    name = "reply_to_mr_discussion",
    description = "Add a reply note to an existing merge request discussion",
    operation = "write"
)]
pub struct ReplyToMrDiscussion {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
    /// Discussion ID
    pub discussion_id: String,
    /// Reply body (Markdown)
    pub body: String,
}

#[async_trait]
impl ToolExecutor for ReplyToMrDiscussion {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/merge_requests/{}/discussions/{}/notes",
            project, self.mr_iid, self.discussion_id
        );

        let body = serde_json::json!({ "body": self.body });
        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Resolve or unresolve a discussion
#[gitlab_tool(
    name = "resolve_mr_discussion",
    description = "Resolve or unresolve a merge request discussion thread",
    operation = "write"
)]
pub struct ResolveMrDiscussion {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
    /// Discussion ID
    pub discussion_id: String,
    /// true to resolve, false to unresolve
    pub resolved: bool,
}

#[async_trait]
impl ToolExecutor for ResolveMrDiscussion {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/merge_requests/{}/discussions/{}",
            project, self.mr_iid, self.discussion_id
        );

        let body = serde_json::json!({ "resolved": self.resolved });
        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}
