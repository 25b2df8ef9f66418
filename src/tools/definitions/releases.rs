//! Release tools

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::params;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List project releases
#[gitlab_tool(
    name = "list_releases",
    description = "List releases in a project, newest first",
    operation = "read"
)]
pub struct ListReleases {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListReleases {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/releases{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a release by tag
#[gitlab_tool(
    name = "get_release",
    description = "Get a release by its tag name",
    operation = "read"
)]
pub struct GetRelease {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Tag name of the release
    pub tag_name: String,
}

#[async_trait]
impl ToolExecutor for GetRelease {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let tag = GitLabClient::encode_path(&self.tag_name);
        let endpoint = format!("/projects/{}/releases/{}", project, tag);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Create a release
#[gitlab_tool(
    name = "create_release",
    description = "Create a release from an existing tag or create the tag from a ref",
    operation = "write"
)]
pub struct CreateRelease {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Tag name for the release
    pub tag_name: String,
    /// Release name
    #[serde(default)]
    pub name: Option<String>,
    /// Release notes (Markdown)
    #[serde(default)]
    pub description: Option<String>,
    /// Ref to create the tag from, if the tag does not exist yet
    #[serde(default)]
    pub ref_name: Option<String>,
    /// Release timestamp (ISO 8601), for backdated releases
    #[serde(default)]
    pub released_at: Option<String>,
}

#[async_trait]
impl ToolExecutor for CreateRelease {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/releases", project);
        let released_at = params::checked_timestamp("released_at", self.released_at.as_deref())?;

        let mut body = serde_json::json!({ "tag_name": self.tag_name });
        if let Some(name) = &self.name {
            body["name"] = serde_json::json!(name);
        }
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }
        if let Some(ref_name) = &self.ref_name {
            body["ref"] = serde_json::json!(ref_name);
        }
        if let Some(released) = released_at {
            body["released_at"] = serde_json::json!(released);
        }

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Update a release
#[gitlab_tool(
    name = "update_release",
    description = "Update a release's name or notes",
    operation = "write"
)]
pub struct UpdateRelease {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Tag name of the release
    pub tag_name: String,
    /// New release name
    #[serde(default)]
    pub name: Option<String>,
    /// New release notes (Markdown)
    #[serde(default)]
    pub description: Option<String>,
}

#[async_trait]
impl ToolExecutor for UpdateRelease {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let tag = GitLabClient::encode_path(&self.tag_name);
        let endpoint = format!("/projects/{}/releases/{}", project, tag);

        let mut body = serde_json::json!({});
        if let Some(name) = &self.name {
            body["name"] = serde_json::json!(name);
        }
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }

        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete a release
#[gitlab_tool(
    name = "delete_release",
    description = "Delete a release (the tag itself is kept)",
    operation = "delete"
)]
pub struct DeleteRelease {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Tag name of the release
    pub tag_name: String,
}

#[async_trait]
impl ToolExecutor for DeleteRelease {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let tag = GitLabClient::encode_path(&self.tag_name);
        let endpoint = format!("/projects/{}/releases/{}", project, tag);

        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "Release '{}' deleted successfully",
            self.tag_name
        )))
    }
}
