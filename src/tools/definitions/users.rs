//! User tools

use crate::error::ToolError;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// Get the authenticated user
#[gitlab_tool(
    name = "get_current_user",
    description = "Get the profile of the currently authenticated user",
    operation = "read"
)]
pub struct GetCurrentUser {}

#[async_trait]
impl ToolExecutor for GetCurrentUser {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let body = ctx.gitlab.get("/user").await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a user by ID
#[gitlab_tool(
    name = "get_user",
    description = "Get a user's public profile by ID",
    operation = "read"
)]
pub struct GetUser {
    /// User ID
    pub user_id: u64,
}

#[async_trait]
impl ToolExecutor for GetUser {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let endpoint = format!("/users/{}", self.user_id);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// List users
#[gitlab_tool(
    name = "list_users",
    description = "List users with optional filtering by username or search terms",
    operation = "read"
)]
pub struct ListUsers {
    /// Exact username to look up
    #[serde(default)]
    pub username: Option<String>,
    /// Search by name, username, or email
    #[serde(default)]
    pub search: Option<String>,
    /// Only active users
    #[serde(default)]
    pub active: Option<bool>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListUsers {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let query = QueryBuilder::new()
            .optional_encoded("username", self.username.as_ref())
            .optional_encoded("search", self.search.as_ref())
            .optional("active", self.active)
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/users{}", query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}
