//! Tool definitions
//!
//! This module contains all GitLab MCP tool implementations, grouped by
//! resource area. Each tool self-registers through the `#[gitlab_tool]`
//! macro; `ToolRegistry::discover` picks them up at startup.

pub mod branches;
pub mod commits;
pub mod groups;
pub mod issue_notes;
pub mod issues;
pub mod jobs;
pub mod labels;
pub mod merge_requests;
pub mod milestones;
pub mod mr_discussions;
pub mod namespaces;
pub mod pipelines;
pub mod projects;
pub mod releases;
pub mod repository;
pub mod search;
pub mod tags;
pub mod users;
pub mod wiki;
