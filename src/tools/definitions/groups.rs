//! Group tools

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List groups visible to the authenticated user
#[gitlab_tool(
    name = "list_groups",
    description = "List groups visible to the authenticated user",
    operation = "read"
)]
pub struct ListGroups {
    /// Search for groups matching this string
    #[serde(default)]
    pub search: Option<String>,
    /// Limit to groups owned by the current user
    #[serde(default)]
    pub owned: Option<bool>,
    /// Limit to top-level groups
    #[serde(default)]
    pub top_level_only: Option<bool>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListGroups {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let query = QueryBuilder::new()
            .optional_encoded("search", self.search.as_ref())
            .optional("owned", self.owned)
            .optional("top_level_only", self.top_level_only)
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/groups{}", query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a specific group
#[gitlab_tool(
    name = "get_group",
    description = "Get detailed information about a specific group",
    operation = "read"
)]
pub struct GetGroup {
    /// Group ID or URL-encoded path
    pub group: String,
    /// Include custom attributes
    #[serde(default)]
    pub with_projects: Option<bool>,
}

#[async_trait]
impl ToolExecutor for GetGroup {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let group = GitLabClient::encode_project(&self.group);
        let query = QueryBuilder::new()
            .optional("with_projects", self.with_projects)
            .build();
        let endpoint = format!("/groups/{}{}", group, query);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// List projects in a group
#[gitlab_tool(
    name = "list_group_projects",
    description = "List projects belonging to a group",
    operation = "read"
)]
pub struct ListGroupProjects {
    /// Group ID or URL-encoded path
    pub group: String,
    /// Search for projects matching this string
    #[serde(default)]
    pub search: Option<String>,
    /// Include projects in subgroups
    #[serde(default)]
    pub include_subgroups: Option<bool>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListGroupProjects {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let group = GitLabClient::encode_project(&self.group);
        let query = QueryBuilder::new()
            .optional_encoded("search", self.search.as_ref())
            .optional("include_subgroups", self.include_subgroups)
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/groups/{}/projects{}", group, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// List subgroups of a group
#[gitlab_tool(
    name = "list_group_subgroups",
    description = "List the direct subgroups of a group",
    operation = "read"
)]
pub struct ListGroupSubgroups {
    /// Group ID or URL-encoded path
    pub group: String,
    /// Search for subgroups matching this string
    #[serde(default)]
    pub search: Option<String>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListGroupSubgroups {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let group = GitLabClient::encode_project(&self.group);
        let query = QueryBuilder::new()
            .optional_encoded("search", self.search.as_ref())
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/groups/{}/subgroups{}", group, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// List members of a group
#[gitlab_tool(
    name = "list_group_members",
    description = "List members of a group, including inherited members",
    operation = "read"
)]
pub struct ListGroupMembers {
    /// Group ID or URL-encoded path
    pub group: String,
    /// Search for members matching this string
    #[serde(default)]
    pub query: Option<String>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListGroupMembers {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let group = GitLabClient::encode_project(&self.group);
        let query = QueryBuilder::new()
            .optional_encoded("query", self.query.as_ref())
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/groups/{}/members/all{}", group, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}
