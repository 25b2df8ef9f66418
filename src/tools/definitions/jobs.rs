//! Job tools
//!
//! Tools for individual CI/CD jobs.

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List jobs in a project
#[gitlab_tool(
    name = "list_jobs",
    description = "List CI/CD jobs in a project",
    operation = "read"
)]
pub struct ListJobs {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Filter by job scope: created, pending, running, failed, success, canceled, skipped, manual
    #[serde(default)]
    pub scope: Option<String>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListJobs {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional("scope", self.scope.as_ref())
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/jobs{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a specific job
#[gitlab_tool(
    name = "get_job",
    description = "Get detailed information about a specific job",
    operation = "read"
)]
pub struct GetJob {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Job ID
    pub job_id: u64,
}

#[async_trait]
impl ToolExecutor for GetJob {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/jobs/{}", project, self.job_id);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a job's log
#[gitlab_tool(
    name = "get_job_log",
    description = "Get the log (trace) of a job",
    operation = "read"
)]
pub struct GetJobLog {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Job ID
    pub job_id: u64,
}

#[async_trait]
impl ToolExecutor for GetJobLog {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/jobs/{}/trace", project, self.job_id);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Retry a job
#[gitlab_tool(
    name = "retry_job",
    description = "Retry a failed or canceled job",
    operation = "execute"
)]
pub struct RetryJob {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Job ID
    pub job_id: u64,
}

#[async_trait]
impl ToolExecutor for RetryJob {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/jobs/{}/retry", project, self.job_id);

        let response = ctx.gitlab.post_empty(&endpoint).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Cancel a job
#[gitlab_tool(
    name = "cancel_job",
    description = "Cancel a running job",
    operation = "execute"
)]
pub struct CancelJob {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Job ID
    pub job_id: u64,
}

#[async_trait]
impl ToolExecutor for CancelJob {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/jobs/{}/cancel", project, self.job_id);

        let response = ctx.gitlab.post_empty(&endpoint).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Trigger a manual job
#[gitlab_tool(
    name = "play_job",
    description = "Trigger a manual job",
    operation = "execute"
)]
pub struct PlayJob {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Job ID
    pub job_id: u64,
}

#[async_trait]
impl ToolExecutor for PlayJob {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/jobs/{}/play", project, self.job_id);

        let response = ctx.gitlab.post_empty(&endpoint).await?;
        Ok(ToolOutput::text(response))
    }
}
