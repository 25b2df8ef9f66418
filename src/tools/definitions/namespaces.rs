//! Namespace tools

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List namespaces
#[gitlab_tool(
    name = "list_namespaces",
    description = "List namespaces (user and group) visible to the authenticated user",
    operation = "read"
)]
pub struct ListNamespaces {
    /// Search for namespaces matching this string
    #[serde(default)]
    pub search: Option<String>,
    /// Only namespaces the user owns
    #[serde(default)]
    pub owned_only: Option<bool>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListNamespaces {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let query = QueryBuilder::new()
            .optional_encoded("search", self.search.as_ref())
            .optional("owned_only", self.owned_only)
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/namespaces{}", query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a specific namespace
#[gitlab_tool(
    name = "get_namespace",
    description = "Get details of a namespace by ID or path",
    operation = "read"
)]
pub struct GetNamespace {
    /// Namespace ID or URL-encoded path
    pub namespace: String,
}

#[async_trait]
impl ToolExecutor for GetNamespace {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let namespace = GitLabClient::encode_project(&self.namespace);
        let endpoint = format!("/namespaces/{}", namespace);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}
