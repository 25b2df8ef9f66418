//! Configuration loader with layered sources
//!
//! Loads configuration from multiple sources with the following precedence
//! (highest to lowest):
//! 1. Environment variables (MARMOT_MCP_*)
//! 2. Configuration file (TOML)
//! 3. Default values

use crate::config::types::AppConfig;
use crate::error::ConfigError;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use tracing::warn;

/// Default configuration file paths to check (in order)
const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "marmot-mcp.toml",
    ".marmot-mcp.toml",
    "~/.config/marmot-mcp/config.toml",
    "/etc/marmot-mcp/config.toml",
];

/// Load configuration from a TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::from_str(toml_str, FileFormat::Toml))
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// Load configuration from files and environment
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. Defaults are handled by serde defaults on AppConfig

    // 2. Add configuration file
    if let Some(path) = config_path {
        // Explicit path provided - must exist
        if !Path::new(path).exists() {
            return Err(ConfigError::Load(format!(
                "Configuration file not found: {}",
                path
            )));
        }
        builder = builder.add_source(File::new(path, FileFormat::Toml));
    } else {
        // Try default paths (first existing one wins)
        for path in DEFAULT_CONFIG_PATHS {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                builder = builder.add_source(File::new(&expanded, FileFormat::Toml));
                break;
            }
        }
    }

    // 3. Add environment variables with MARMOT_MCP_ prefix
    // e.g., MARMOT_MCP_GITLAB__URL, MARMOT_MCP_SERVER__READ_ONLY
    // Double underscore (__) maps to nested keys (gitlab.url)
    builder = builder.add_source(
        Environment::with_prefix("MARMOT_MCP")
            .separator("__")
            .try_parsing(true),
    );

    // 4. Handle common GitLab token environment variables,
    // checked in order of precedence
    for env_var in &[
        "GITLAB_TOKEN",
        "GITLAB_PRIVATE_TOKEN",
        "GITLAB_ACCESS_TOKEN",
    ] {
        if let Ok(token) = std::env::var(env_var) {
            builder = builder
                .set_override("gitlab.token", token)
                .map_err(|e| ConfigError::Load(e.to_string()))?;
            break;
        }
    }

    // 5. Handle GITLAB_URL if set (common convention)
    if let Ok(url) = std::env::var("GITLAB_URL") {
        builder = builder
            .set_override("gitlab.url", url)
            .map_err(|e| ConfigError::Load(e.to_string()))?;
    }

    let config = builder
        .build()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::Load(e.to_string()))?;

    validate_config(&app_config)?;

    if app_config.gitlab.token.is_none() {
        // Not fatal: invocations will report the missing token individually
        warn!("No GitLab token configured; tool calls will fail until GITLAB_TOKEN is set");
    }

    Ok(app_config)
}

/// Validate configuration values
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.gitlab.url.is_empty() {
        return Err(ConfigError::Missing {
            field: "gitlab.url".to_string(),
        });
    }

    if !config.gitlab.url.starts_with("http://") && !config.gitlab.url.starts_with("https://") {
        return Err(ConfigError::Invalid {
            message: format!(
                "gitlab.url must start with http:// or https://, got: {}",
                config.gitlab.url
            ),
        });
    }

    if config.gitlab.timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            message: "gitlab.timeout_secs must be greater than 0".to_string(),
        });
    }

    if config.server.port == 0 {
        return Err(ConfigError::Invalid {
            message: "server.port must be greater than 0".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_from_str_basic() {
        let toml = r#"
[server]
name = "test-server"

[gitlab]
url = "https://gitlab.example.com"
token = "test-token"
"#;

        let config = load_config_from_str(toml).unwrap();
        assert_eq!(config.gitlab.url, "https://gitlab.example.com");
        assert_eq!(
            config.gitlab.token.as_ref().map(|t| t.expose_secret()),
            Some("test-token")
        );
        assert_eq!(config.server.name, "test-server");
    }

    #[test]
    fn test_load_config_read_only_flag() {
        let toml = r#"
[gitlab]
url = "https://gitlab.com"

[server]
read_only = true
"#;

        let config = load_config_from_str(toml).unwrap();
        assert!(config.server.read_only);
    }

    #[test]
    fn test_missing_token_is_not_fatal() {
        let toml = r#"
[gitlab]
url = "https://gitlab.com"
"#;

        let config = load_config_from_str(toml).unwrap();
        assert!(config.gitlab.token.is_none());
    }

    #[test]
    fn test_invalid_url_error() {
        let toml = r#"
[gitlab]
url = "not-a-url"
"#;

        assert!(load_config_from_str(toml).is_err());
    }

    #[test]
    fn test_empty_url_error() {
        let toml = r#"
[gitlab]
url = ""
"#;

        let result = load_config_from_str(toml);
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_zero_timeout_error() {
        let toml = r#"
[gitlab]
url = "https://gitlab.com"
timeout_secs = 0
"#;

        assert!(load_config_from_str(toml).is_err());
    }
}
