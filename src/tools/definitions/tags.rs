//! Tag tools

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List repository tags
#[gitlab_tool(
    name = "list_tags",
    description = "List tags in a repository",
    operation = "read"
)]
pub struct ListTags {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Search for tags matching this string
    #[serde(default)]
    pub search: Option<String>,
    /// Order by: name, updated, or version
    #[serde(default)]
    pub order_by: Option<String>,
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
impl ToolExecutor for ListTags {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional_encoded("search", self.search.as_ref())
            .optional("order_by", self.order_by.as_ref())
            .optional("sort", self.sort.as_ref())
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/repository/tags{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a specific tag
#[gitlab_tool(
    name = "get_tag",
    description = "Get information about a specific tag",
    operation = "read"
)]
pub struct GetTag {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Tag name
    pub tag_name: String,
}

#[async_trait]
impl ToolExecutor for GetTag {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let tag = GitLabClient::encode_path(&self.tag_name);
        let endpoint = format!("/projects/{}/repository/tags/{}", project, tag);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Create a tag
#[gitlab_tool(
    name = "create_tag",
    description = "Create a new tag pointing at a ref",
    operation = "write"
)]
pub struct CreateTag {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Name for the new tag
    pub tag_name: String,
    /// Source ref (branch name or commit SHA)
    pub ref_name: String,
    /// Annotation message, creating an annotated tag
    #[serde(default)]
    pub message: Option<String>,
}

#[async_trait]
impl ToolExecutor for CreateTag {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/repository/tags", project);

        let mut body = serde_json::json!({
            "tag_name": self.tag_name,
            "ref": self.ref_name,
        });
        if let Some(message) = &self.message {
            body["message"] = serde_json::json!(message);
        }

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete a tag
#[gitlab_tool(
    name = "delete_tag",
    description = "Delete a tag from the repository",
    operation = "delete"
)]
pub struct DeleteTag {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Tag name to delete
    pub tag_name: String,
}

#[async_trait]
impl ToolExecutor for DeleteTag {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let tag = GitLabClient::encode_path(&self.tag_name);
        let endpoint = format!("/projects/{}/repository/tags/{}", project, tag);

        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "Tag '{}' deleted successfully",
            self.tag_name
        )))
    }
}
