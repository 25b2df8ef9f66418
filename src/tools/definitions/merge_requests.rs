//! Merge request tools
//!
//! Tools for listing, inspecting, creating, and acting on merge requests.

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::params;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List merge requests in a project
#[gitlab_tool(
    name = "list_merge_requests",
    description = "List merge requests in a GitLab project with optional filtering by state, branches, labels, search terms, or creation/update time",
    operation = "read"
)]
pub struct ListMergeRequests {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Filter by state: opened, closed, locked, merged, or all
    #[serde(default)]
    pub state: Option<String>,
    /// Filter by target branch
    #[serde(default)]
    pub target_branch: Option<String>,
    /// Filter by source branch
    #[serde(default)]
    pub source_branch: Option<String>,
    /// Filter by labels (comma-separated)
    #[serde(default)]
    pub labels: Option<String>,
    /// Search in title and description
    #[serde(default)]
    pub search: Option<String>,
    /// Only MRs created after this ISO 8601 timestamp
    #[serde(default)]
    pub created_after: Option<String>,
    /// Only MRs updated after this ISO 8601 timestamp
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
impl ToolExecutor for ListMergeRequests {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let labels = self.labels.as_deref().and_then(params::split_csv);
        let created_after =
            params::checked_timestamp("created_after", self.created_after.as_deref())?;
        let updated_after =
            params::checked_timestamp("updated_after", self.updated_after.as_deref())?;

        let query = QueryBuilder::new()
            .optional("state", self.state.as_ref())
            .optional_encoded("target_branch", self.target_branch.as_ref())
            .optional_encoded("source_branch", self.source_branch.as_ref())
            .optional_list("labels", labels.as_deref())
            .optional_encoded("search", self.search.as_ref())
            .optional("created_after", created_after)
            .optional("updated_after", updated_after)
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/merge_requests{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a specific merge request
#[gitlab_tool(
    name = "get_merge_request",
    description = "Get detailed information about a specific merge request by its IID",
    operation = "read"
)]
pub struct GetMergeRequest {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
}

#[async_trait]
impl ToolExecutor for GetMergeRequest {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/merge_requests/{}", project, self.mr_iid);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get the changes (diffs) of a merge request
#[gitlab_tool(
    name = "get_merge_request_changes",
    description = "Get the file changes (diffs) of a merge request",
    operation = "read"
)]
pub struct GetMergeRequestChanges {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
}

#[async_trait]
impl ToolExecutor for GetMergeRequestChanges {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/merge_requests/{}/changes",
            project, self.mr_iid
        );

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// List the commits of a merge request
#[gitlab_tool(
    name = "list_merge_request_commits",
    description = "List the commits contained in a merge request",
    operation = "read"
)]
pub struct ListMergeRequestCommits {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
}

#[async_trait]
impl ToolExecutor for ListMergeRequestCommits {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/merge_requests/{}/commits",
            project, self.mr_iid
        );

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Create a merge request
#[gitlab_tool(
    name = "create_merge_request",
    description = "Create a new merge request between two branches",
    operation = "write"
)]
pub struct CreateMergeRequest {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Source branch name
    pub source_branch: String,
    /// Target branch name
    pub target_branch: String,
    /// Merge request title
    pub title: String,
    /// Merge request description (Markdown)
    #[serde(default)]
    pub description: Option<String>,
    /// Labels to apply (comma-separated)
    #[serde(default)]
    pub labels: Option<String>,
    /// Assignee user ID
    #[serde(default)]
    pub assignee_id: Option<u64>,
    /// Delete source branch when merged
    #[serde(default)]
    pub remove_source_branch: Option<bool>,
}

#[async_trait]
impl ToolExecutor for CreateMergeRequest {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/merge_requests", project);

        let mut body = serde_json::json!({
            "source_branch": self.source_branch,
            "target_branch": self.target_branch,
            "title": self.title,
        });
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }
        if let Some(labels) = self.labels.as_deref().and_then(params::split_csv) {
            body["labels"] = serde_json::json!(labels.join(","));
        }
        if let Some(assignee_id) = self.assignee_id {
            body["assignee_id"] = serde_json::json!(assignee_id);
        }
        if let Some(remove) = self.remove_source_branch {
            body["remove_source_branch"] = serde_json::json!(remove);
        }

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Update a merge request
#[gitlab_tool(
    name = "update_merge_request",
    description = "Update a merge request's title, description, target branch, labels, or state",
    operation = "write"
)]
pub struct UpdateMergeRequest {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New target branch
    #[serde(default)]
    pub target_branch: Option<String>,
    /// State event: close or reopen
    #[serde(default)]
    pub state_event: Option<String>,
    /// Replacement labels (comma-separated)
    #[serde(default)]
    pub labels: Option<String>,
}

#[async_trait]
impl ToolExecutor for UpdateMergeRequest {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/merge_requests/{}", project, self.mr_iid);

        let mut body = serde_json::json!({});
        if let Some(title) = &self.title {
            body["title"] = serde_json::json!(title);
        }
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }
        if let Some(target_branch) = &self.target_branch {
            body["target_branch"] = serde_json::json!(target_branch);
        }
        if let Some(state_event) = &self.state_event {
            body["state_event"] = serde_json::json!(state_event);
        }
        if let Some(labels) = self.labels.as_deref().and_then(params::split_csv) {
            body["labels"] = serde_json::json!(labels.join(","));
        }

        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Merge a merge request
#[gitlab_tool(
    name = "merge_merge_request",
    description = "Accept and merge a merge request",
    operation = "execute"
)]
pub struct MergeMergeRequest {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
    /// Custom merge commit message
    #[serde(default)]
    pub merge_commit_message: Option<String>,
    /// Squash commits before merging
    #[serde(default)]
    pub squash: Option<bool>,
    /// Delete source branch after merging
    #[serde(default)]
    pub should_remove_source_branch: Option<bool>,
}

#[async_trait]
impl ToolExecutor for MergeMergeRequest {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/merge_requests/{}/merge", project, self.mr_iid);

        let mut body = serde_json::json!({});
        if let Some(message) = &self.merge_commit_message {
            body["merge_commit_message"] = serde_json::json!(message);
        }
        if let Some(squash) = self.squash {
            body["squash"] = serde_json::json!(squash);
        }
        if let Some(remove) = self.should_remove_source_branch {
            body["should_remove_source_branch"] = serde_json::json!(remove);
        }

        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Rebase a merge request
#[gitlab_tool(
    name = "rebase_merge_request",
    description = "Rebase the source branch of a merge request onto its target branch",
    operation = "execute"
)]
pub struct RebaseMergeRequest {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
}

#[async_trait]
impl ToolExecutor for RebaseMergeRequest {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/merge_requests/{}/rebase",
            project, self.mr_iid
        );

        let response = ctx.gitlab.put(&endpoint, &serde_json::json!({})).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete a merge request
#[gitlab_tool(
    name = "delete_merge_request",
    description = "Delete a merge request (requires owner permissions)",
    operation = "delete"
)]
pub struct DeleteMergeRequest {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Merge request IID
    pub mr_iid: u64,
}

#[async_trait]
impl ToolExecutor for DeleteMergeRequest {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/merge_requests/{}", project, self.mr_iid);

        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "Merge request !{} deleted successfully",
            self.mr_iid
        )))
    }
}
