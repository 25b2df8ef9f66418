//! GitLab API client
//!
//! A thin HTTP client for the GitLab REST API v4. Each call is a single
//! request/response round trip: no retries, no redirect handling beyond the
//! transport's own, no response parsing. Successful responses are returned as
//! raw body text for the caller to interpret per endpoint; non-2xx responses
//! become errors that carry the status line together with the raw body, so
//! GitLab's own diagnostics are never lost.

use crate::auth::BoxedAuthProvider;
use crate::config::GitLabConfig;
use crate::error::{GitLabError, GitLabResult};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// GitLab API client
pub struct GitLabClient {
    http: Client,
    base_url: String,
    auth: BoxedAuthProvider,
}

impl GitLabClient {
    /// Create a new GitLab client from configuration
    pub fn new(config: &GitLabConfig, auth: BoxedAuthProvider) -> GitLabResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .user_agent(format!("marmot-mcp/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(GitLabError::Request)?;

        debug!(auth = auth.auth_type(), "Created GitLab client");

        Ok(Self {
            http,
            base_url: config.api_url(),
            auth,
        })
    }

    /// Build a URL for an API endpoint
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Add authentication to a request
    async fn authenticate(&self, request: RequestBuilder) -> GitLabResult<RequestBuilder> {
        let header = self.auth.get_auth_header().await?;
        Ok(request.header(header.header_name(), header.header_value()))
    }

    /// Send a request and normalize the response.
    ///
    /// Transport failures surface as-is; everything else goes through
    /// [`normalize_response`].
    async fn send(&self, request: RequestBuilder) -> GitLabResult<String> {
        let request = self.authenticate(request).await?;
        let response = request.send().await.map_err(GitLabError::Request)?;
        Self::into_text(response).await
    }

    /// Read a response body and apply status normalization.
    async fn into_text(response: Response) -> GitLabResult<String> {
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GitLabError::InvalidResponse(format!("Failed to read body: {}", e)))?;

        normalize_response(status, body)
    }

    /// Make a GET request, returning the raw response body.
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn get(&self, endpoint: &str) -> GitLabResult<String> {
        self.send(self.http.get(self.url(endpoint))).await
    }

    /// Make a POST request with a JSON body.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> GitLabResult<String> {
        self.send(self.http.post(self.url(endpoint)).json(body))
            .await
    }

    /// Make a POST request without a body (action endpoints such as
    /// retry/cancel/play).
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn post_empty(&self, endpoint: &str) -> GitLabResult<String> {
        self.send(self.http.post(self.url(endpoint))).await
    }

    /// Make a PUT request with a JSON body.
    #[instrument(skip(self, body), fields(endpoint = %endpoint))]
    pub async fn put<B: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> GitLabResult<String> {
        self.send(self.http.put(self.url(endpoint)).json(body))
            .await
    }

    /// Make a DELETE request.
    #[instrument(skip(self), fields(endpoint = %endpoint))]
    pub async fn delete(&self, endpoint: &str) -> GitLabResult<String> {
        self.send(self.http.delete(self.url(endpoint))).await
    }

    /// URL-encode a project path for use in API endpoints
    pub fn encode_project(project: &str) -> String {
        urlencoding::encode(project).to_string()
    }

    /// URL-encode a path segment (branch names, file paths, tag names)
    pub fn encode_path(segment: &str) -> String {
        urlencoding::encode(segment).to_string()
    }
}

/// Convert an HTTP status and body into the uniform success/error outcome.
///
/// A status in [200, 300) yields the body unchanged. Anything else yields an
/// error whose message concatenates the status line and the raw body text.
pub(crate) fn normalize_response(status: StatusCode, body: String) -> GitLabResult<String> {
    if status.is_success() {
        Ok(body)
    } else {
        Err(GitLabError::from_status(status, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_project() {
        assert_eq!(
            GitLabClient::encode_project("group/project"),
            "group%2Fproject"
        );
        assert_eq!(
            GitLabClient::encode_project("group/subgroup/project"),
            "group%2Fsubgroup%2Fproject"
        );
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(GitLabClient::encode_path("feature/login"), "feature%2Flogin");
        assert_eq!(GitLabClient::encode_path("docs/README.md"), "docs%2FREADME.md");
    }

    #[test]
    fn test_normalize_success_passes_body_through() {
        let result = normalize_response(StatusCode::OK, r#"{"id":1}"#.to_string()).unwrap();
        assert_eq!(result, r#"{"id":1}"#);
    }

    #[test]
    fn test_normalize_204_empty_body() {
        let result = normalize_response(StatusCode::NO_CONTENT, String::new()).unwrap();
        assert_eq!(result, "");
    }

    #[test]
    fn test_normalize_error_includes_status_line_and_body() {
        let err = normalize_response(
            StatusCode::NOT_FOUND,
            r#"{"message":"404 Not Found"}"#.to_string(),
        )
        .unwrap_err();

        let text = err.to_string();
        assert!(text.contains("404 Not Found"));
        assert!(text.contains(r#"{"message":"404 Not Found"}"#));
    }

    #[test]
    fn test_normalize_error_empty_body() {
        let err = normalize_response(StatusCode::INTERNAL_SERVER_ERROR, String::new()).unwrap_err();
        assert!(matches!(err, GitLabError::Http { status: 500, .. }));
    }
}
