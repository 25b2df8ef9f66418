//! Personal Access Token authentication

use crate::auth::provider::{AuthHeader, AuthProvider};
use crate::error::AuthError;
use crate::util::SecretString;
use async_trait::async_trait;

/// Personal Access Token authentication provider
#[derive(Debug, Clone)]
pub struct PatProvider {
    token: SecretString,
}

impl PatProvider {
    /// Create a new PAT provider
    pub fn new(token: SecretString) -> Self {
        Self { token }
    }

    /// Create from environment variables.
    ///
    /// Checks GITLAB_TOKEN, GITLAB_PRIVATE_TOKEN, and GITLAB_ACCESS_TOKEN
    /// in order of precedence. Returns None when none is set.
    pub fn from_env() -> Option<Self> {
        for var in &[
            "GITLAB_TOKEN",
            "GITLAB_PRIVATE_TOKEN",
            "GITLAB_ACCESS_TOKEN",
        ] {
            if let Ok(token) = std::env::var(var)
                && !token.is_empty()
            {
                return Some(Self::new(SecretString::new(token)));
            }
        }

        None
    }
}

#[async_trait]
impl AuthProvider for PatProvider {
    async fn get_auth_header(&self) -> Result<AuthHeader, AuthError> {
        if self.token.is_empty() {
            return Err(AuthError::InvalidToken);
        }
        Ok(AuthHeader::PrivateToken(
            self.token.expose_secret().to_string(),
        ))
    }

    fn auth_type(&self) -> &'static str {
        "Personal Access Token"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pat_provider_auth_header() {
        let provider = PatProvider::new(SecretString::new("test-token"));
        let header = provider.get_auth_header().await.unwrap();

        assert_eq!(header.header_name(), "PRIVATE-TOKEN");
        assert_eq!(header.header_value(), "test-token");
    }

    #[tokio::test]
    async fn test_pat_provider_empty_token() {
        let provider = PatProvider::new(SecretString::new(""));
        let result = provider.get_auth_header().await;
        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_pat_provider_debug_redacts_token() {
        let provider = PatProvider::new(SecretString::new("glpat-secret"));
        assert!(!format!("{:?}", provider).contains("glpat-secret"));
    }
}
