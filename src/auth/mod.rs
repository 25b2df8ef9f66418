//! Authentication module
//!
//! Provides authentication for GitLab API access via Personal Access Tokens.
//!
//! A missing token does not abort startup: `create_auth_provider` falls back
//! to an [`Unauthenticated`] provider whose header lookup fails, so each tool
//! invocation reports the configuration problem in its own error result.

mod provider;
mod token;

pub use provider::{AuthHeader, AuthProvider, BoxedAuthProvider, Unauthenticated};
pub use token::PatProvider;

use crate::config::GitLabConfig;
use tracing::warn;

/// Create an auth provider from configuration.
pub fn create_auth_provider(config: &GitLabConfig) -> BoxedAuthProvider {
    if let Some(token) = &config.token
        && !token.is_empty()
    {
        return Box::new(PatProvider::new(token.clone()));
    }

    match PatProvider::from_env() {
        Some(provider) => Box::new(provider),
        None => {
            warn!("No GitLab token available; requests will fail until one is configured");
            Box::new(Unauthenticated)
        }
    }
}
