//! GitLab MCP Server
//!
//! A Model Context Protocol server exposing the GitLab REST API v4 surface as
//! typed, schema-validated tools.
//!
//! ## Features
//!
//! - **100+ GitLab tools** covering issues, merge requests, pipelines, jobs,
//!   repositories, and more, each with a generated JSON Schema
//! - **Read-only mode** that excludes the whole mutating (POST/PUT/DELETE)
//!   surface from the registry at startup
//! - **Uniform result envelopes**: raw GitLab response text on success, the
//!   HTTP status line plus the raw body on failure
//! - **Multiple transports** - stdio for local clients, HTTP/SSE for web
//!   integrations
//! - **Flexible configuration** via TOML files and environment variables
//!
//! ## Example Configuration
//!
//! ```toml
//! [gitlab]
//! url = "https://gitlab.com"
//! # token from GITLAB_TOKEN env var
//!
//! [server]
//! read_only = true    # expose only the read surface
//! ```

pub mod auth;
pub mod config;
pub mod error;
pub mod gitlab;
pub mod params;
pub mod server;
pub mod tools;
pub mod transport;
pub mod util;

// Re-export main types
pub use config::{AppConfig, load_config};
pub use error::{AppError, Result};
pub use server::GitLabMcpHandler;
