//! Transport implementations
//!
//! MCP can run over stdio (the default, for local clients) or HTTP/SSE.

mod http;
mod stdio;

pub use http::{DEFAULT_HTTP_PORT, HttpConfig, run_http, run_http_blocking};
pub use stdio::run_stdio;
