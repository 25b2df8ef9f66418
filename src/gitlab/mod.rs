//! GitLab API access
//!
//! HTTP client and response normalization for the GitLab REST API v4.

mod client;

pub use client::GitLabClient;
