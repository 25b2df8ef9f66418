//! Authentication provider trait

use crate::error::AuthError;
// async_trait required for dyn-compatibility with Box<dyn AuthProvider>
use async_trait::async_trait;

/// Authentication provider trait
///
/// Implementations supply the credential header for GitLab API requests.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Get the authentication header for a request.
    ///
    /// Fails with [`AuthError::NotConfigured`] when no credential is
    /// available; the failure is surfaced in that invocation's result.
    async fn get_auth_header(&self) -> Result<AuthHeader, AuthError>;

    /// Get a description of the auth method (for logging)
    fn auth_type(&self) -> &'static str;
}

/// Authentication header to use with requests
#[derive(Debug, Clone)]
pub enum AuthHeader {
    /// Bearer token (OAuth-style)
    Bearer(String),
    /// Private token (Personal Access Token)
    PrivateToken(String),
}

impl AuthHeader {
    /// Get the header name for this auth type
    pub fn header_name(&self) -> &'static str {
        match self {
            AuthHeader::Bearer(_) => "Authorization",
            AuthHeader::PrivateToken(_) => "PRIVATE-TOKEN",
        }
    }

    /// Get the header value for this auth type
    pub fn header_value(&self) -> String {
        match self {
            AuthHeader::Bearer(token) => format!("Bearer {}", token),
            AuthHeader::PrivateToken(token) => token.clone(),
        }
    }
}

/// Provider used when no token was configured anywhere.
///
/// Every header lookup fails, turning each tool call into a configuration
/// error result instead of a process-level failure.
pub struct Unauthenticated;

#[async_trait]
impl AuthProvider for Unauthenticated {
    async fn get_auth_header(&self) -> Result<AuthHeader, AuthError> {
        Err(AuthError::NotConfigured)
    }

    fn auth_type(&self) -> &'static str {
        "unauthenticated"
    }
}

/// Box type alias for auth providers
pub type BoxedAuthProvider = Box<dyn AuthProvider>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let header = AuthHeader::Bearer("tok".to_string());
        assert_eq!(header.header_name(), "Authorization");
        assert_eq!(header.header_value(), "Bearer tok");
    }

    #[test]
    fn test_private_token_header() {
        let header = AuthHeader::PrivateToken("glpat-x".to_string());
        assert_eq!(header.header_name(), "PRIVATE-TOKEN");
        assert_eq!(header.header_value(), "glpat-x");
    }

    #[tokio::test]
    async fn test_unauthenticated_fails_per_call() {
        let result = Unauthenticated.get_auth_header().await;
        assert!(matches!(result, Err(AuthError::NotConfigured)));
    }
}
