//! Pipeline tools
//!
//! Tools for CI/CD pipelines.

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::params;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List pipelines in a project
#[gitlab_tool(
    name = "list_pipelines",
    description = "List CI/CD pipelines in a project with optional filtering by status, ref, or update time",
    operation = "read"
)]
pub struct ListPipelines {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Filter by status: created, pending, running, success, failed, canceled, skipped
    #[serde(default)]
    pub status: Option<String>,
    /// Filter by ref (branch or tag)
    #[serde(default)]
    pub ref_name: Option<String>,
    /// Filter by the commit SHA the pipeline ran for
    #[serde(default)]
    pub sha: Option<String>,
    /// Only pipelines updated after this ISO 8601 timestamp
    #[serde(default)]
    pub updated_after: Option<String>,
    /// Only pipelines updated before this ISO 8601 timestamp
    #[serde(default)]
    pub updated_before: Option<String>,
    /// Order by: id, status, ref, updated_at, or user_id
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
impl ToolExecutor for ListPipelines {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let updated_after =
            params::checked_timestamp("updated_after", self.updated_after.as_deref())?;
        let updated_before =
            params::checked_timestamp("updated_before", self.updated_before.as_deref())?;

        let query = QueryBuilder::new()
            .optional("status", self.status.as_ref())
            .optional_encoded("ref", self.ref_name.as_ref())
            .optional_encoded("sha", self.sha.as_ref())
            .optional("updated_after", updated_after)
            .optional("updated_before", updated_before)
            .optional("order_by", self.order_by.as_ref())
            .optional("sort", self.sort.as_ref())
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/pipelines{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a specific pipeline
#[gitlab_tool(
    name = "get_pipeline",
    description = "Get detailed information about a specific pipeline",
    operation = "read"
)]
pub struct GetPipeline {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Pipeline ID
    pub pipeline_id: u64,
}

#[async_trait]
impl ToolExecutor for GetPipeline {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/pipelines/{}", project, self.pipeline_id);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// List jobs in a pipeline
#[gitlab_tool(
    name = "list_pipeline_jobs",
    description = "List the jobs of a specific pipeline",
    operation = "read"
)]
pub struct ListPipelineJobs {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Pipeline ID
    pub pipeline_id: u64,
    /// Filter by job scope: created, pending, running, failed, success, canceled, skipped, manual
    #[serde(default)]
    pub scope: Option<String>,
}

#[async_trait]
impl ToolExecutor for ListPipelineJobs {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional("scope", self.scope.as_ref())
            .build();

        let endpoint = format!(
            "/projects/{}/pipelines/{}/jobs{}",
            project, self.pipeline_id, query
        );
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Trigger a new pipeline
#[gitlab_tool(
    name = "create_pipeline",
    description = "Trigger a new pipeline for a ref",
    operation = "execute"
)]
pub struct CreatePipeline {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Branch or tag to run the pipeline for
    pub ref_name: String,
    /// Pipeline variables as key/value pairs
    #[serde(default)]
    pub variables: Option<std::collections::BTreeMap<String, String>>,
}

#[async_trait]
impl ToolExecutor for CreatePipeline {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/pipeline", project);

        let mut body = serde_json::json!({ "ref": self.ref_name });
        if let Some(variables) = &self.variables {
            let vars: Vec<serde_json::Value> = variables
                .iter()
                .map(|(key, value)| serde_json::json!({ "key": key, "value": value }))
                .collect();
            body["variables"] = serde_json::json!(vars);
        }

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Retry failed jobs in a pipeline
#[gitlab_tool(
    name = "retry_pipeline",
    description = "Retry the failed jobs of a pipeline",
    operation = "execute"
)]
pub struct RetryPipeline {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Pipeline ID
    pub pipeline_id: u64,
}

#[async_trait]
impl ToolExecutor for RetryPipeline {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/pipelines/{}/retry", project, self.pipeline_id);

        let response = ctx.gitlab.post_empty(&endpoint).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Cancel a pipeline
#[gitlab_tool(
    name = "cancel_pipeline",
    description = "Cancel a running pipeline and its jobs",
    operation = "execute"
)]
pub struct CancelPipeline {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Pipeline ID
    pub pipeline_id: u64,
}

#[async_trait]
impl ToolExecutor for CancelPipeline {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!(
            "/projects/{}/pipelines/{}/cancel",
            project, self.pipeline_id
        );

        let response = ctx.gitlab.post_empty(&endpoint).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete a pipeline
#[gitlab_tool(
    name = "delete_pipeline",
    description = "Delete a pipeline and its jobs, logs, and artifacts",
    operation = "delete"
)]
pub struct DeletePipeline {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Pipeline ID
    pub pipeline_id: u64,
}

#[async_trait]
impl ToolExecutor for DeletePipeline {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/pipelines/{}", project, self.pipeline_id);

        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "Pipeline {} deleted successfully",
            self.pipeline_id
        )))
    }
}
