//! Utility functions shared across the application.

mod secret;

pub use secret::SecretString;

use std::fmt::Display;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::warn;

/// Builder for URL query parameters.
///
/// Provides a fluent API for constructing query strings with proper URL
/// encoding. Optional parameters that are `None` are left out entirely, so
/// omission round-trips to "absent" rather than an empty value.
///
/// # Example
/// ```ignore
/// let query = QueryBuilder::new()
///     .param("page", 1)
///     .optional("state", Some("opened"))
///     .optional("labels", None::<&str>)
///     .build();
/// // Returns "?page=1&state=opened"
/// ```
#[derive(Default)]
pub struct QueryBuilder {
    params: Vec<(String, String)>,
}

impl QueryBuilder {
    /// Create a new empty query builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required parameter (always included).
    pub fn param(mut self, key: &str, value: impl Display) -> Self {
        self.params.push((
            key.to_string(),
            urlencoding::encode(&value.to_string()).into_owned(),
        ));
        self
    }

    /// Add an optional parameter (only included if Some).
    pub fn optional<T: Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    /// Add an optional string parameter with URL encoding.
    pub fn optional_encoded<T: AsRef<str>>(mut self, key: &str, value: Option<T>) -> Self {
        if let Some(v) = value {
            self.params.push((
                key.to_string(),
                urlencoding::encode(v.as_ref()).into_owned(),
            ));
        }
        self
    }

    /// Add an optional list parameter, joined with commas the way the GitLab
    /// API expects (`labels=a,b,c`). An empty list is left out.
    pub fn optional_list(self, key: &str, value: Option<&[String]>) -> Self {
        match value {
            Some(items) if !items.is_empty() => {
                let joined = items.join(",");
                self.optional_encoded(key, Some(joined))
            }
            _ => self,
        }
    }

    /// Build the query string.
    ///
    /// Returns an empty string if no parameters were added,
    /// otherwise returns "?key1=value1&key2=value2...".
    pub fn build(self) -> String {
        if self.params.is_empty() {
            String::new()
        } else {
            format!(
                "?{}",
                self.params
                    .into_iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join("&")
            )
        }
    }
}

/// Find an available port, starting from the preferred port.
///
/// Tries the preferred port, then the next 10 consecutive ports, then lets
/// the OS assign one.
pub async fn find_available_port(host: &str, preferred: u16) -> std::io::Result<u16> {
    let parse_addr = |port: u16| -> std::io::Result<SocketAddr> {
        format!("{}:{}", host, port)
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    };

    if let Ok(listener) = TcpListener::bind(parse_addr(preferred)?).await {
        drop(listener);
        return Ok(preferred);
    }

    for offset in 1..=10 {
        let port = preferred.saturating_add(offset);
        if let Ok(listener) = TcpListener::bind(parse_addr(port)?).await {
            drop(listener);
            warn!(
                preferred,
                actual = port,
                "Preferred port unavailable, using alternate"
            );
            return Ok(port);
        }
    }

    let listener = TcpListener::bind(parse_addr(0)?).await?;
    let port = listener.local_addr()?.port();
    drop(listener);
    warn!(preferred, actual = port, "Using OS-assigned port");
    Ok(port)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query() {
        assert_eq!(QueryBuilder::new().build(), "");
    }

    #[test]
    fn test_required_params() {
        let query = QueryBuilder::new()
            .param("page", 1)
            .param("per_page", 20)
            .build();
        assert_eq!(query, "?page=1&per_page=20");
    }

    #[test]
    fn test_optional_none_is_absent() {
        let query = QueryBuilder::new()
            .param("page", 1)
            .optional("state", None::<&str>)
            .optional_encoded("search", None::<&str>)
            .build();
        assert_eq!(query, "?page=1");
    }

    #[test]
    fn test_optional_some_is_included() {
        let query = QueryBuilder::new()
            .optional("state", Some("opened"))
            .build();
        assert_eq!(query, "?state=opened");
    }

    #[test]
    fn test_encoding() {
        let query = QueryBuilder::new()
            .optional_encoded("search", Some("hello world"))
            .build();
        assert_eq!(query, "?search=hello%20world");
    }

    #[test]
    fn test_optional_list_joined_with_commas() {
        let labels = vec!["bug".to_string(), "p1".to_string(), "backend".to_string()];
        let query = QueryBuilder::new()
            .optional_list("labels", Some(&labels))
            .build();
        assert_eq!(query, "?labels=bug%2Cp1%2Cbackend");
    }

    #[test]
    fn test_optional_list_empty_is_absent() {
        let query = QueryBuilder::new()
            .optional_list("labels", Some(&[]))
            .optional_list("topics", None)
            .build();
        assert_eq!(query, "");
    }

    #[tokio::test]
    async fn test_find_available_port_preferred() {
        let preferred = 49152;
        let port = find_available_port("127.0.0.1", preferred).await.unwrap();
        assert!(port >= preferred);
    }

    #[tokio::test]
    async fn test_find_available_port_fallback() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let bound_port = listener.local_addr().unwrap().port();

        let port = find_available_port("127.0.0.1", bound_port).await.unwrap();
        assert_ne!(port, bound_port);

        drop(listener);
    }
}
