//! Milestone tools

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::params;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List project milestones
#[gitlab_tool(
    name = "list_milestones",
    description = "List milestones in a project with optional filtering by state or search terms",
    operation = "read"
)]
pub struct ListMilestones {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Filter by state: active or closed
    #[serde(default)]
    pub state: Option<String>,
    /// Search in title and description
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
impl ToolExecutor for ListMilestones {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional("state", self.state.as_ref())
            .optional_encoded("search", self.search.as_ref())
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/milestones{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a specific milestone
#[gitlab_tool(
    name = "get_milestone",
    description = "Get detailed information about a specific milestone",
    operation = "read"
)]
pub struct GetMilestone {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Milestone ID
    pub milestone_id: u64,
}

#[async_trait]
impl ToolExecutor for GetMilestone {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/milestones/{}", project, self.milestone_id);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Create a milestone
#[gitlab_tool(
    name = "create_milestone",
    description = "Create a new milestone in a project",
    operation = "write"
)]
pub struct CreateMilestone {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Milestone title
    pub title: String,
    /// Milestone description
    #[serde(default)]
    pub description: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[serde(default)]
    pub due_date: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
}

#[async_trait]
impl ToolExecutor for CreateMilestone {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/milestones", project);
        let due_date = params::checked_date("due_date", self.due_date.as_deref())?;
        let start_date = params::checked_date("start_date", self.start_date.as_deref())?;

        let mut body = serde_json::json!({ "title": self.title });
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }
        if let Some(due) = due_date {
            body["due_date"] = serde_json::json!(due);
        }
        if let Some(start) = start_date {
            body["start_date"] = serde_json::json!(start);
        }

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Update a milestone
#[gitlab_tool(
    name = "update_milestone",
    description = "Update a milestone's title, description, dates, or state",
    operation = "write"
)]
pub struct UpdateMilestone {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Milestone ID
    pub milestone_id: u64,
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[serde(default)]
    pub due_date: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[serde(default)]
    pub start_date: Option<String>,
    /// State event: activate or close
    #[serde(default)]
    pub state_event: Option<String>,
}

#[async_trait]
impl ToolExecutor for UpdateMilestone {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/milestones/{}", project, self.milestone_id);
        let due_date = params::checked_date("due_date", self.due_date.as_deref())?;
        let start_date = params::checked_date("start_date", self.start_date.as_deref())?;

        let mut body = serde_json::json!({});
        if let Some(title) = &self.title {
            body["title"] = serde_json::json!(title);
        }
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }
        if let Some(due) = due_date {
            body["due_date"] = serde_json::json!(due);
        }
        if let Some(start) = start_date {
            body["start_date"] = serde_json::json!(start);
        }
        if let Some(state_event) = &self.state_event {
            body["state_event"] = serde_json::json!(state_event);
        }

        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete a milestone
#[gitlab_tool(
    name = "delete_milestone",
    description = "Delete a milestone from a project",
    operation = "delete"
)]
pub struct DeleteMilestone {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Milestone ID
    pub milestone_id: u64,
}

#[async_trait]
impl ToolExecutor for DeleteMilestone {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/milestones/{}", project, self.milestone_id);

        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "Milestone {} deleted successfully",
            self.milestone_id
        )))
    }
}
