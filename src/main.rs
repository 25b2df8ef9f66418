//! GitLab MCP Server
//!
//! A Model Context Protocol server exposing GitLab REST API v4 as typed tools.

use clap::Parser;
use marmot_mcp::{
    auth::create_auth_provider,
    config::{AppConfig, LogFormat, TransportMode, load_config},
    gitlab::GitLabClient,
    server::GitLabMcpHandler,
    transport::{DEFAULT_HTTP_PORT, HttpConfig, run_http_blocking, run_stdio},
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// GitLab MCP Server - the GitLab REST API v4 surface as typed tools
#[derive(Parser, Debug)]
#[command(name = "marmot-mcp")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "MARMOT_MCP_CONFIG")]
    config: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "MARMOT_MCP_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Transport mode (stdio, http)
    #[arg(long, env = "MARMOT_MCP_TRANSPORT")]
    transport: Option<String>,

    /// HTTP server host (for http transport)
    #[arg(long, env = "MARMOT_MCP_HTTP_HOST", default_value = "127.0.0.1")]
    http_host: String,

    /// HTTP server port (for http transport)
    #[arg(long, env = "MARMOT_MCP_HTTP_PORT", default_value_t = DEFAULT_HTTP_PORT)]
    http_port: u16,

    /// Register only read tools; the mutating surface is left out entirely
    #[arg(long, env = "MARMOT_MCP_READ_ONLY")]
    read_only: bool,
}

fn init_logging(args: &Args, config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&args.log_level))
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.logging.format {
        LogFormat::Pretty => registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Load configuration
    let mut config = load_config(args.config.as_deref())?;
    if args.read_only {
        config.server.read_only = true;
    }

    init_logging(&args, &config);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        read_only = config.server.read_only,
        "Starting GitLab MCP server"
    );

    // Create auth provider and GitLab client
    let auth = create_auth_provider(&config.gitlab);
    let gitlab = Arc::new(
        GitLabClient::new(&config.gitlab, auth)
            .inspect_err(|e| error!(error = %e, "Failed to create GitLab client"))?,
    );

    // Determine transport mode
    let transport = args
        .transport
        .as_deref()
        .map(|t| match t {
            "stdio" => TransportMode::Stdio,
            "http" => TransportMode::Http,
            _ => config.server.transport,
        })
        .unwrap_or(config.server.transport);

    match transport {
        TransportMode::Stdio => {
            let handler = GitLabMcpHandler::new(&config, gitlab);
            run_stdio(handler).await?;
        }
        TransportMode::Http => {
            let http_config = HttpConfig::from_host_port(&args.http_host, args.http_port)?;
            let config = Arc::new(config);

            run_http_blocking(
                move || GitLabMcpHandler::new(&config, gitlab.clone()),
                http_config,
            )
            .await?;
        }
    }

    Ok(())
}
