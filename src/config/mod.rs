//! Configuration module
//!
//! Loading and validation of marmot-mcp configuration.

mod loader;
mod types;

pub use loader::{load_config, load_config_from_str};
pub use types::{AppConfig, GitLabConfig, LogFormat, LoggingConfig, ServerConfig, TransportMode};
