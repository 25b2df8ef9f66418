//! Label tools

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List project labels
#[gitlab_tool(
    name = "list_labels",
    description = "List labels defined in a project",
    operation = "read"
)]
pub struct ListLabels {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Search for labels matching this string
    #[serde(default)]
    pub search: Option<String>,
    /// Include label usage counts
    #[serde(default)]
    pub with_counts: Option<bool>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListLabels {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional_encoded("search", self.search.as_ref())
            .optional("with_counts", self.with_counts)
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/labels{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a single label
#[gitlab_tool(
    name = "get_label",
    description = "Get a single label by name or ID",
    operation = "read"
)]
pub struct GetLabel {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Label name or ID
    pub label: String,
}

#[async_trait]
impl ToolExecutor for GetLabel {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let label = GitLabClient::encode_path(&self.label);
        let endpoint = format!("/projects/{}/labels/{}", project, label);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Create a label
#[gitlab_tool(
    name = "create_label",
    description = "Create a new label in a project",
    operation = "write"
)]
pub struct CreateLabel {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Label name
    pub name: String,
    /// Label color as a hex value (e.g., "#FF0000")
    pub color: String,
    /// Label description
    #[serde(default)]
    pub description: Option<String>,
    /// Priority for ordering (lower is higher priority)
    #[serde(default)]
    pub priority: Option<u32>,
}

#[async_trait]
impl ToolExecutor for CreateLabel {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/labels", project);

        let mut body = serde_json::json!({
            "name": self.name,
            "color": self.color,
        });
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }
        if let Some(priority) = self.priority {
            body["priority"] = serde_json::json!(priority);
        }

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Update a label
#[gitlab_tool(
    name = "update_label",
    description = "Update a label's name, color, or description",
    operation = "write"
)]
pub struct UpdateLabel {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Label name or ID
    pub label: String,
    /// New label name
    #[serde(default)]
    pub new_name: Option<String>,
    /// New color as a hex value
    #[serde(default)]
    pub color: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
}

#[async_trait]
impl ToolExecutor for UpdateLabel {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let label = GitLabClient::encode_path(&self.label);
        let endpoint = format!("/projects/{}/labels/{}", project, label);

        let mut body = serde_json::json!({});
        if let Some(new_name) = &self.new_name {
            body["new_name"] = serde_json::json!(new_name);
        }
        if let Some(color) = &self.color {
            body["color"] = serde_json::json!(color);
        }
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }

        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete a label
#[gitlab_tool(
    name = "delete_label",
    description = "Delete a label from a project",
    operation = "delete"
)]
pub struct DeleteLabel {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Label name or ID
    pub label: String,
}

#[async_trait]
impl ToolExecutor for DeleteLabel {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let label = GitLabClient::encode_path(&self.label);
        let endpoint = format!("/projects/{}/labels/{}", project, label);

        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "Label '{}' deleted successfully",
            self.label
        )))
    }
}
