//! Search tools
//!
//! Global, project, and group scoped search.

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// Search across the GitLab instance
#[gitlab_tool(
    name = "search_global",
    description = "Search across the GitLab instance in a given scope (projects, issues, merge_requests, milestones, users, blobs, commits, or wiki_blobs)",
    operation = "read"
)]
pub struct SearchGlobal {
    /// Search scope: projects, issues, merge_requests, milestones, users, blobs, commits, or wiki_blobs
    pub scope: String,
    /// Search query
    pub search: String,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for SearchGlobal {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let query = QueryBuilder::new()
            .param("scope", &self.scope)
            .optional_encoded("search", Some(&self.search))
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/search{}", query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Search within a project
#[gitlab_tool(
    name = "search_project",
    description = "Search within a single project in a given scope",
    operation = "read"
)]
pub struct SearchProject {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Search scope: issues, merge_requests, milestones, notes, blobs, commits, wiki_blobs, or users
    pub scope: String,
    /// Search query
    pub search: String,
    /// Restrict blob search to this ref
    #[serde(default)]
    pub ref_name: Option<String>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for SearchProject {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .param("scope", &self.scope)
            .optional_encoded("search", Some(&self.search))
            .optional_encoded("ref", self.ref_name.as_ref())
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/search{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Search within a group
#[gitlab_tool(
    name = "search_group",
    description = "Search within a group in a given scope",
    operation = "read"
)]
pub struct SearchGroup {
    /// Group ID or URL-encoded path
    pub group: String,
    /// Search scope: projects, issues, merge_requests, milestones, or users
    pub scope: String,
    /// Search query
    pub search: String,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for SearchGroup {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let group = GitLabClient::encode_project(&self.group);
        let query = QueryBuilder::new()
            .param("scope", &self.scope)
            .optional_encoded("search", Some(&self.search))
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/groups/{}/search{}", group, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}
