//! Repository tools
//!
//! File access, tree listing, and comparisons. File content comes back from
//! GitLab base64-encoded; `get_file` decodes it so callers see the text.

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;
use base64::Engine;

use marmot_mcp_macros::gitlab_tool;

/// Get a file from the repository, decoded
#[gitlab_tool(
    name = "get_file",
    description = "Get a file from the repository with its content decoded to text",
    operation = "read"
)]
pub struct GetFile {
    /// Project ID or URL-encoded path
    pub project: String,
    /// File path within the repository
    pub file_path: String,
    /// Git reference (branch, tag, or commit SHA); defaults to HEAD
    #[serde(default)]
    pub ref_name: Option<String>,
}

#[async_trait]
impl ToolExecutor for GetFile {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let file_path = GitLabClient::encode_path(&self.file_path);
        let ref_name = self.ref_name.as_deref().unwrap_or("HEAD");
        let query = QueryBuilder::new().param("ref", ref_name).build();

        let endpoint = format!(
            "/projects/{}/repository/files/{}{}",
            project, file_path, query
        );
        let response = ctx.gitlab.get(&endpoint).await?;

        // GitLab returns file metadata with base64 content
        let parsed: serde_json::Value = serde_json::from_str(&response)?;
        let content = parsed
            .get("content")
            .and_then(|c| c.as_str())
            .ok_or_else(|| {
                ToolError::GitLab(crate::error::GitLabError::InvalidResponse(
                    "No content field in file response".to_string(),
                ))
            })?;

        let decoded = if parsed.get("encoding").and_then(|e| e.as_str()) == Some("base64") {
            let bytes = base64::engine::general_purpose::STANDARD
                .decode(content.replace('\n', ""))
                .map_err(|e| {
                    ToolError::GitLab(crate::error::GitLabError::InvalidResponse(format!(
                        "Failed to decode base64 content: {}",
                        e
                    )))
                })?;
            String::from_utf8_lossy(&bytes).into_owned()
        } else {
            content.to_string()
        };

        Ok(ToolOutput::text(decoded))
    }
}

/// Get raw file content
#[gitlab_tool(
    name = "get_raw_file",
    description = "Get the raw content of a file from the repository",
    operation = "read"
)]
pub struct GetRawFile {
    /// Project ID or URL-encoded path
    pub project: String,
    /// File path within the repository
    pub file_path: String,
    /// Git reference (branch, tag, or commit SHA); defaults to HEAD
    #[serde(default)]
    pub ref_name: Option<String>,
}

#[async_trait]
impl ToolExecutor for GetRawFile {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let file_path = GitLabClient::encode_path(&self.file_path);
        let ref_name = self.ref_name.as_deref().unwrap_or("HEAD");
        let query = QueryBuilder::new().param("ref", ref_name).build();

        let endpoint = format!(
            "/projects/{}/repository/files/{}/raw{}",
            project, file_path, query
        );
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// List repository tree
#[gitlab_tool(
    name = "list_tree",
    description = "List files and directories in a repository tree",
    operation = "read"
)]
pub struct ListTree {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Path inside the repository to list
    #[serde(default)]
    pub path: Option<String>,
    /// Git reference (branch, tag, or commit SHA)
    #[serde(default)]
    pub ref_name: Option<String>,
    /// Recurse into subdirectories
    #[serde(default)]
    pub recursive: Option<bool>,
    /// Page number
    #[serde(default)]
    pub page: Option<u32>,
    /// Items per page (max 100)
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[async_trait]
impl ToolExecutor for ListTree {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional_encoded("path", self.path.as_ref())
            .optional_encoded("ref", self.ref_name.as_ref())
            .optional("recursive", self.recursive)
            .optional("page", self.page)
            .optional("per_page", self.per_page.map(|p| p.min(100)))
            .build();

        let endpoint = format!("/projects/{}/repository/tree{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Compare two refs
#[gitlab_tool(
    name = "compare_refs",
    description = "Compare two branches, tags, or commits and return the diff",
    operation = "read"
)]
pub struct CompareRefs {
    /// Project ID or URL-encoded path
    pub project: String,
    /// The base commit SHA, branch, or tag
    pub from: String,
    /// The head commit SHA, branch, or tag
    pub to: String,
    /// Compare from the merge base instead of directly
    #[serde(default)]
    pub straight: Option<bool>,
}

#[async_trait]
impl ToolExecutor for CompareRefs {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional_encoded("from", Some(&self.from))
            .optional_encoded("to", Some(&self.to))
            .optional("straight", self.straight)
            .build();

        let endpoint = format!("/projects/{}/repository/compare{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// List repository contributors
#[gitlab_tool(
    name = "list_contributors",
    description = "List repository contributors with commit counts",
    operation = "read"
)]
pub struct ListContributors {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Order by: name, email, or commits
    #[serde(default)]
    pub order_by: Option<String>,
    /// Sort order: asc or desc
    #[serde(default)]
    pub sort: Option<String>,
}

#[async_trait]
impl ToolExecutor for ListContributors {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional("order_by", self.order_by.as_ref())
            .optional("sort", self.sort.as_ref())
            .build();

        let endpoint = format!("/projects/{}/repository/contributors{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Create a new file in the repository
#[gitlab_tool(
    name = "create_file",
    description = "Create a new file in the repository with a commit",
    operation = "write"
)]
pub struct CreateFile {
    /// Project ID or URL-encoded path
    pub project: String,
    /// File path within the repository
    pub file_path: String,
    /// Branch to commit to
    pub branch: String,
    /// File content
    pub content: String,
    /// Commit message
    pub commit_message: String,
    /// Author email for the commit
    #[serde(default)]
    pub author_email: Option<String>,
    /// Author name for the commit
    #[serde(default)]
    pub author_name: Option<String>,
}

#[async_trait]
impl ToolExecutor for CreateFile {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let file_path = GitLabClient::encode_path(&self.file_path);
        let endpoint = format!("/projects/{}/repository/files/{}", project, file_path);

        let mut body = serde_json::json!({
            "branch": self.branch,
            "content": self.content,
            "commit_message": self.commit_message,
        });
        if let Some(email) = &self.author_email {
            body["author_email"] = serde_json::json!(email);
        }
        if let Some(name) = &self.author_name {
            body["author_name"] = serde_json::json!(name);
        }

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Update an existing file in the repository
#[gitlab_tool(
    name = "update_file",
    description = "Update an existing file in the repository with a commit",
    operation = "write"
)]
pub struct UpdateFile {
    /// Project ID or URL-encoded path
    pub project: String,
    /// File path within the repository
    pub file_path: String,
    /// Branch to commit to
    pub branch: String,
    /// New file content
    pub content: String,
    /// Commit message
    pub commit_message: String,
    /// Expected last commit SHA of the file (optimistic locking)
    #[serde(default)]
    pub last_commit_id: Option<String>,
}

#[async_trait]
impl ToolExecutor for UpdateFile {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let file_path = GitLabClient::encode_path(&self.file_path);
        let endpoint = format!("/projects/{}/repository/files/{}", project, file_path);

        let mut body = serde_json::json!({
            "branch": self.branch,
            "content": self.content,
            "commit_message": self.commit_message,
        });
        if let Some(sha) = &self.last_commit_id {
            body["last_commit_id"] = serde_json::json!(sha);
        }

        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete a file from the repository
#[gitlab_tool(
    name = "delete_file",
    description = "Delete a file from the repository with a commit",
    operation = "delete"
)]
pub struct DeleteFile {
    /// Project ID or URL-encoded path
    pub project: String,
    /// File path within the repository
    pub file_path: String,
    /// Branch to commit to
    pub branch: String,
    /// Commit message
    pub commit_message: String,
}

#[async_trait]
impl ToolExecutor for DeleteFile {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let file_path = GitLabClient::encode_path(&self.file_path);
        let query = QueryBuilder::new()
            .optional_encoded("branch", Some(&self.branch))
            .optional_encoded("commit_message", Some(&self.commit_message))
            .build();

        let endpoint = format!(
            "/projects/{}/repository/files/{}{}",
            project, file_path, query
        );
        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "File '{}' deleted on branch '{}'",
            self.file_path, self.branch
        )))
    }
}
