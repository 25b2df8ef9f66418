//! Project tools
//!
//! Tools for listing and managing projects.

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::params;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List projects visible to the authenticated user
#[gitlab_tool(
    name = "list_projects",
    description = "List projects visible to the authenticated user, with optional filtering by search terms, membership, visibility, or topics",
    operation = "read"
)]
pub struct ListProjects {
    /// Search for projects matching this string
    #[serde(default)]
    pub search: Option<String>,
    /// Include archived projects (always forwarded; defaults to false)
    #[serde(default)]
    pub archived: bool,
    /// Limit to projects owned by the current user
    #[serde(default)]
    pub owned: Option<bool>,
    /// Limit to projects the current user is a member of
    #[serde(default)]
    pub membership: Option<bool>,
    /// Filter by visibility: public, internal, or private
    #[serde(default)]
    pub visibility: Option<String>,
    /// Filter by topics (comma-separated)
    #[serde(default)]
    pub topics: Option<String>,
    /// Order by: id, name, path, created_at, updated_at, or last_activity_at
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
impl ToolExecutor for ListProjects {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let topics = self.topics.as_deref().and_then(params::split_csv);

        // `archived` is always emitted: serde fills in the default, so the
        // parameter reaches GitLab as false even when the caller omitted it.
        let query = QueryBuilder::new()
            .param("archived", self.archived)
            .optional_encoded("search", self.search.as_ref())
            .optional("owned", self.owned)
            .optional("membership", self.membership)
            .optional("visibility", self.visibility.as_ref())
            .optional_list("topics", topics.as_deref())
            .optional("order_by", self.order_by.as_ref())
            .optional("sort", self.sort.as_ref())
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects{}", query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a specific project
#[gitlab_tool(
    name = "get_project",
    description = "Get detailed information about a specific project",
    operation = "read"
)]
pub struct GetProject {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Include project statistics
    #[serde(default)]
    pub statistics: Option<bool>,
}

#[async_trait]
impl ToolExecutor for GetProject {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional("statistics", self.statistics)
            .build();
        let endpoint = format!("/projects/{}{}", project, query);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// List members of a project
#[gitlab_tool(
    name = "list_project_members",
    description = "List members of a project, including inherited members",
    operation = "read"
)]
pub struct ListProjectMembers {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Search for members matching this string
    #[serde(default)]
    pub query: Option<String>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListProjectMembers {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional_encoded("query", self.query.as_ref())
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/members/all{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Create a new project
#[gitlab_tool(
    name = "create_project",
    description = "Create a new project in the user's namespace or a group",
    operation = "write"
)]
pub struct CreateProject {
    /// Project name
    pub name: String,
    /// Project path (slug); derived from name when omitted
    #[serde(default)]
    pub path: Option<String>,
    /// Namespace ID to create the project in
    #[serde(default)]
    pub namespace_id: Option<u64>,
    /// Project description
    #[serde(default)]
    pub description: Option<String>,
    /// Visibility: public, internal, or private
    #[serde(default)]
    pub visibility: Option<String>,
    /// Initialize with a README
    #[serde(default)]
    pub initialize_with_readme: Option<bool>,
}

#[async_trait]
impl ToolExecutor for CreateProject {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let mut body = serde_json::json!({ "name": self.name });
        if let Some(path) = &self.path {
            body["path"] = serde_json::json!(path);
        }
        if let Some(namespace_id) = self.namespace_id {
            body["namespace_id"] = serde_json::json!(namespace_id);
        }
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }
        if let Some(visibility) = &self.visibility {
            body["visibility"] = serde_json::json!(visibility);
        }
        if let Some(readme) = self.initialize_with_readme {
            body["initialize_with_readme"] = serde_json::json!(readme);
        }

        let response = ctx.gitlab.post("/projects", &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Update a project
#[gitlab_tool(
    name = "update_project",
    description = "Update a project's name, description, visibility, topics, or default branch",
    operation = "write"
)]
pub struct UpdateProject {
    /// Project ID or URL-encoded path
    pub project: String,
    /// New name
    #[serde(default)]
    pub name: Option<String>,
    /// New description
    #[serde(default)]
    pub description: Option<String>,
    /// New visibility: public, internal, or private
    #[serde(default)]
    pub visibility: Option<String>,
    /// Replacement topics (comma-separated)
    #[serde(default)]
    pub topics: Option<String>,
    /// New default branch
    #[serde(default)]
    pub default_branch: Option<String>,
}

#[async_trait]
impl ToolExecutor for UpdateProject {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}", project);

        let mut body = serde_json::json!({});
        if let Some(name) = &self.name {
            body["name"] = serde_json::json!(name);
        }
        if let Some(description) = &self.description {
            body["description"] = serde_json::json!(description);
        }
        if let Some(visibility) = &self.visibility {
            body["visibility"] = serde_json::json!(visibility);
        }
        if let Some(topics) = self.topics.as_deref().and_then(params::split_csv) {
            body["topics"] = serde_json::json!(topics);
        }
        if let Some(default_branch) = &self.default_branch {
            body["default_branch"] = serde_json::json!(default_branch);
        }

        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Fork a project
#[gitlab_tool(
    name = "fork_project",
    description = "Fork a project into the user's namespace or a group",
    operation = "write"
)]
pub struct ForkProject {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Namespace ID to fork into
    #[serde(default)]
    pub namespace_id: Option<u64>,
    /// Name for the forked project
    #[serde(default)]
    pub name: Option<String>,
    /// Path for the forked project
    #[serde(default)]
    pub path: Option<String>,
}

#[async_trait]
impl ToolExecutor for ForkProject {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/fork", project);

        let mut body = serde_json::json!({});
        if let Some(namespace_id) = self.namespace_id {
            body["namespace_id"] = serde_json::json!(namespace_id);
        }
        if let Some(name) = &self.name {
            body["name"] = serde_json::json!(name);
        }
        if let Some(path) = &self.path {
            body["path"] = serde_json::json!(path);
        }

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete a project
#[gitlab_tool(
    name = "delete_project",
    description = "Delete a project (requires owner permissions)",
    operation = "delete"
)]
pub struct DeleteProject {
    /// Project ID or URL-encoded path
    pub project: String,
}

#[async_trait]
impl ToolExecutor for DeleteProject {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}", project);

        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "Project '{}' deleted successfully",
            self.project
        )))
    }
}
