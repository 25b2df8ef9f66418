//! Wiki tools

use crate::error::ToolError;
use crate::gitlab::GitLabClient;
use crate::tools::executor::{ToolContext, ToolExecutor, ToolOutput};
use crate::util::QueryBuilder;
use async_trait::async_trait;

use marmot_mcp_macros::gitlab_tool;

/// List wiki pages
#[gitlab_tool(
    name = "list_wiki_pages",
    description = "List wiki pages of a project",
    operation = "read"
)]
pub struct ListWikiPages {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Include page content in the listing
    #[serde(default)]
    pub with_content: Option<bool>,
}

#[async_trait]
impl ToolExecutor for ListWikiPages {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let query = QueryBuilder::new()
            .optional("with_content", self.with_content)
            .build();

        let endpoint = format!("/projects/{}/wikis{}", project, query);
        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Get a wiki page
#[gitlab_tool(
    name = "get_wiki_page",
    description = "Get a wiki page by its slug",
    operation = "read"
)]
pub struct GetWikiPage {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Page slug (URL path of the page)
    pub slug: String,
}

#[async_trait]
impl ToolExecutor for GetWikiPage {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let slug = GitLabClient::encode_path(&self.slug);
        let endpoint = format!("/projects/{}/wikis/{}", project, slug);

        let body = ctx.gitlab.get(&endpoint).await?;
        Ok(ToolOutput::text(body))
    }
}

/// Create a wiki page
#[gitlab_tool(
    name = "create_wiki_page",
    description = "Create a new wiki page",
    operation = "write"
)]
pub struct CreateWikiPage {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Page title
    pub title: String,
    /// Page content (Markdown)
    pub content: String,
}

#[async_trait]
impl ToolExecutor for CreateWikiPage {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let endpoint = format!("/projects/{}/wikis", project);

        let body = serde_json::json!({
            "title": self.title,
            "content": self.content,
        });

        let response = ctx.gitlab.post(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Update a wiki page
#[gitlab_tool(
    name = "update_wiki_page",
    description = "Update a wiki page's title or content",
    operation = "write"
)]
pub struct UpdateWikiPage {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Page slug
    pub slug: String,
    /// New title
    #[serde(default)]
    pub title: Option<String>,
    /// New content (Markdown)
    #[serde(default)]
    pub content: Option<String>,
}

#[async_trait]
impl ToolExecutor for UpdateWikiPage {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let slug = GitLabClient::encode_path(&self.slug);
        let endpoint = format!("/projects/{}/wikis/{}", project, slug);

        let mut body = serde_json::json!({});
        if let Some(title) = &self.title {
            body["title"] = serde_json::json!(title);
        }
        if let Some(content) = &self.content {
            body["content"] = serde_json::json!(content);
        }

        let response = ctx.gitlab.put(&endpoint, &body).await?;
        Ok(ToolOutput::text(response))
    }
}

/// Delete a wiki page
#[gitlab_tool(
    name = "delete_wiki_page",
    description = "Delete a wiki page",
    operation = "delete"
)]
pub struct DeleteWikiPage {
    /// Project ID or URL-encoded path
    pub project: String,
    /// Page slug
    pub slug: String,
}

#[async_trait]
impl ToolExecutor for DeleteWikiPage {
    async fn execute(&self, ctx: &ToolContext) -> Result<ToolOutput, ToolError> {
        let project = GitLabClient::encode_project(&self.project);
        let slug = GitLabClient::encode_path(&self.slug);
        let endpoint = format!("/projects/{}/wikis/{}", project, slug);

        ctx.gitlab.delete(&endpoint).await?;
        Ok(ToolOutput::text(format!(
            "Wiki page '{}' deleted successfully",
            self.slug
        )))
    }
}
