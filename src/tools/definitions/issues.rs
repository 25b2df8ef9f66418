//! Issue tools
//!
//! Tools for managing GitLab issues.

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::params;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List issues in a project
#[gitlab_tool(
    name = "list_issues",
    description = "List issues in a GitLab project with optional filtering by state, labels, milestone, assignee, author, search terms, or creation/update time",
    operation = "read"
)]
pub struct ListIssues {
    /// Project ID or URL-encoded path (e.g., "group/project")
    pub project: String,
    /// Filter by state: opened, closed, or all
    #[serde(default)]
    pub state: Option<String>,
    /// Filter by labels (comma-separated)
    #[serde(default)]
    pub labels: Option<String>,
    /// Filter by milestone title
    #[serde(default)]
    pub milestone: Option<String>,
    /// Filter by assignee ID
    #[serde(default)]
    pub assignee_id: Option<u64>,
    /// Filter by author ID
    #[serde(default)]
    pub author_id: Option<u64>,
    /// Search in title and description
    #[serde(default)]
    pub search: Option<String>,
    /// Only issues created after this ISO 8601 timestamp
    #[serde(default)]
    pub created_after: Option<String>,
    /// Only issues created before this ISO 8601 timestamp
    #[serde(default)]
    pub created_before: Option<String>,
    /// Only issues updated after this ISO 8601 timestamp
    #[serde(default)]
    pub updated_after: Option<String>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListIssues {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let labels = self.labels.as_deref().and_then(params::split_csv);
        let created_after =
            params::checked_timestamp("created_after", self.created_after.as_deref())?;
        let created_before =
            params::checked_timestamp("created_before", self.created_before.as_deref())?;
        let updated_after =
            params::checked_timestamp("updated_after", self.updated_after.as_deref())?;

        let query = QueryBuilder::new()
            .optional("state", self.state.as_ref())
            .optional_list("labels", labels.as_deref())
            .optional_encoded("milestone", self.milestone.as_ref())
            .optional("assignee_id", self.assignee_id)
            .optional("author_id", self.author_id)
            .optional_encoded("search", self.search.as_ref())
            .optional("created_after", created_after)
            .optional("created_before", created_before)
            .optional("updated_after", updated_after)
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/issues{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a specific issue
#[gitlab_tool(
    name = "get_issue",
    description = "Get detailed information about a specific issue by its IID",
    operation = "read"
)]
pub struct GetIssue {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Issue IID (internal ID within the project)
    pub issue_iid: u64,
}

#[async_trait]
impl ToolExecutor for GetIssue {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/issues/{}", project, self.issue_iid);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Create a new issue
#[gitlab_tool(
    name = "create_issue",
    description = "Create a new issue in a GitLab project",
    operation = "write"
)]
pub struct CreateIssue {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Issue title
    pub title: String,
    /// Issue description (Markdown)
    #[serde(default)]
    pub description: Option<String>,
    /// Labels to apply (comma-separated)
    #[serde(default)]
    pub labels: Option<String>,
    /// Assignee user IDs
    #[serde(default)]
    pub assignee_ids: Option<Vec<u64>>,
    /// Milestone ID
    #[serde(default)]
    pub milestone_id: Option<u64>,
    /// Due date (YYYY-MM-DD)
    #[serde(default)]
    pub due_date: Option<String>,
    /// Create as confidential
    #[serde(default)]
    pub confidential: Option<bool>,
}

#[async_trait]
impl ToolExecutor for CreateIssue {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/issues", project);
        let due_date = params::checked_date("due_date", self.due_date.as_deref())?;

        let mut body = serde_json::json!({
            "title": self.title,
        });
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }
        if let Some(labels) = self.labels.as_deref().and_then(params::split_csv) {
            body["labels"] = serde_json::json!(labels.join(","));
        }
        if let Some(ids) = &self.assignee_ids {
            body["assignee_ids"] = serde_json::json!(ids);
        }
        if let Some(milestone_id) = self.milestone_id {
            body["milestone_id"] = serde_json::json!(milestone_id);
        }
        if let Some(due) = due_date {
            body["due_date"] = serde_json::json!(due);
        }
        if let Some(confidential) = self.confidential {
            body["confidential"] = serde_json::json!(confidential);
        }

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Update an existing issue
#[gitlab_tool(
    name = "update_issue",
    description = "Update an issue's title, description, labels, state, assignees, milestone, or due date",
    operation = "write"
)]
pub struct UpdateIssue {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Issue IID
    pub issue_iid: u64,
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// State event: close or reopen
    #[serde(default)]
    pub state_event: Option<String>,
    /// Replacement labels (comma-separated)
    #[serde(default)]
    pub labels: Option<String>,
    /// Replacement assignee user IDs
    #[serde(default)]
    pub assignee_ids: Option<Vec<u64>>,
    /// Milestone ID (0 to unassign)
    #[serde(default)]
    pub milestone_id: Option<u64>,
    /// Due date (YYYY-MM-DD)
    #[serde(default)]
    pub due_date: Option<String>,
}

#[async_trait]
impl ToolExecutor for UpdateIssue {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/issues/{}", project, self.issue_iid);
        let due_date = params::checked_date("due_date", self.due_date.as_deref())?;

        let mut body = serde_json::json!({});
        if let Some(title) = &self.title {
            body["title"] = serde_json::json!(title);
        }
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }
        if let Some(state_event) = &self.state_event {
            body["state_event"] = serde_json::json!(state_event);
        }
        if let Some(labels) = self.labels.as_deref().and_then(params::split_csv) {
            body["labels"] = serde_json::json!(labels.join(","));
        }
        if let Some(ids) = &self.assignee_ids {
            body["assignee_ids"] = serde_json::json!(ids);
        }
        if let Some(milestone_id) = self.milestone_id {
            body["milestone_id"] = serde_json::json!(milestone_id);
        }
        if let Some(due) = due_date {
            body["due_date"] = serde_json::json!(due);
        }

        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete an issue
#[gitlab_tool(
    name = "delete_issue",
    description = "Delete an issue from a project (requires owner permissions)",
    operation = "delete"
)]
pub struct DeleteIssue {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Issue IID
    pub issue_iid: u64,
}

#[async_trait]
impl ToolExecutor for DeleteIssue {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/issues/{}", project, self.issue_iid);

        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "Issue #{} deleted successfully",
            self.issue_iid
        )))
    }
}
