use std::sync::Arc;

use anyhow::Context;
use hollaex_provider::config::{server::parse_port, ExchangeSettings, ServerConfig, TransportMode};
use hollaex_provider::hollaex::HollaexConnector;
use hollaex_provider::tools::ToolRegistry;

/// Transport overrides given on the command line
#[derive(Debug, Default)]
struct CliArgs {
    mode: Option<TransportMode>,
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the process environment still applies
    dotenvy::dotenv().ok();

    // Parse command-line arguments first to determine mode
    let args: Vec<String> = std::env::args().collect();
    let cli = parse_args(&args)?;

    // Initialize tracing/logging
    // For stdio mode, output to stderr (stdout is reserved for MCP protocol)
    tracing_subscriber::fmt()
        .with_target(false)
        .with_thread_ids(false)
        .with_level(true)
        .with_writer(std::io::stderr) // Always write to stderr for MCP compatibility
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut server = ServerConfig::from_env().context("invalid transport configuration")?;
    if let Some(mode) = cli.mode {
        server.mode = mode;
    }
    if let Some(port) = cli.port {
        server.port = port;
    }

    let settings = Arc::new(ExchangeSettings::from_env());
    tracing::info!(
        api_url = %settings.api_url,
        base_path = %settings.base_path,
        "Starting HollaEx Provider in {} mode...",
        server.mode
    );

    if settings.has_credentials() {
        tracing::info!("API credentials found - account and trading tools enabled");
    } else {
        tracing::warn!("API credentials not found - only public market data tools will work");
        tracing::warn!("Set HOLLAEX_API_KEY and HOLLAEX_API_SECRET for full functionality");
    }

    let registry = Arc::new(ToolRegistry::new(settings, Arc::new(HollaexConnector)));

    match server.mode {
        TransportMode::Stdio => run_stdio_server(registry).await,
        TransportMode::Http => {
            let (host, port) = server.bind_target();
            run_http_server(&host, port, registry).await
        }
    }
}

/// Parse command-line arguments
fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--mode" => {
                let value = args.get(i + 1).context("--mode needs a value")?;
                cli.mode = Some(value.parse()?);
                i += 1;
            }
            "--http" => cli.mode = Some(TransportMode::Http),
            "--stdio" => cli.mode = Some(TransportMode::Stdio),
            "--port" => {
                let value = args.get(i + 1).context("--port needs a value")?;
                cli.port = Some(parse_port("--port", value)?);
                i += 1;
            }
            "--help" | "-h" => {
                print_usage();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    Ok(cli)
}

/// Print usage information
///
/// Written to stderr so it never mixes with stdio protocol traffic.
fn print_usage() {
    eprintln!("HollaEx Provider - MCP server for HollaEx exchange trading and market data");
    eprintln!();
    eprintln!("USAGE:");
    eprintln!("    hollaex-provider [OPTIONS]");
    eprintln!();
    eprintln!("OPTIONS:");
    eprintln!("    --mode <MODE>       Transport mode: stdio or http (default: stdio)");
    eprintln!("    --stdio             Run in stdio MCP mode (shortcut for --mode stdio)");
    eprintln!("    --http              Run in HTTP mode (shortcut for --mode http)");
    eprintln!("    --port <PORT>       Port to listen on in HTTP mode (default: 3000)");
    eprintln!("    --help, -h          Print this help message");
    eprintln!();
    eprintln!("ENVIRONMENT VARIABLES:");
    eprintln!("    HOLLAEX_API_URL               Exchange REST origin (default: https://api.hollaex.com)");
    eprintln!("    HOLLAEX_BASE_PATH             API path prefix (default: /v2)");
    eprintln!("    HOLLAEX_WS_URL                Streaming endpoint (default: wss://api.hollaex.com/stream)");
    eprintln!("    HOLLAEX_API_KEY               API key (required for private tools)");
    eprintln!("    HOLLAEX_API_SECRET            API secret (required for private tools)");
    eprintln!("    HOLLAEX_API_EXPIRES_AFTER     Signature expiry window in seconds (default: 60)");
    eprintln!("    HOLLAEX_REQUEST_TIMEOUT_SECS  Exchange request timeout in seconds (default: 30)");
    eprintln!("    MCP_TRANSPORT                 stdio or http (default: stdio)");
    eprintln!("    HTTP_HOST                     HTTP bind host (default: 0.0.0.0)");
    eprintln!("    PORT                          HTTP listen port (default: 3000)");
    eprintln!("    RUST_LOG                      Logging level (default: info)");
    eprintln!();
    eprintln!("EXAMPLES:");
    eprintln!("    # Start in stdio mode");
    eprintln!("    hollaex-provider --stdio");
    eprintln!();
    eprintln!("    # Start HTTP server on custom port");
    eprintln!("    hollaex-provider --mode http --port 8080");
}

/// Run the provider in HTTP mode
#[cfg(feature = "http_transport")]
async fn run_http_server(host: &str, port: u16, registry: Arc<ToolRegistry>) -> anyhow::Result<()> {
    hollaex_provider::transport::http::start_http_server(host, port, registry).await
}

#[cfg(not(feature = "http_transport"))]
async fn run_http_server(_host: &str, _port: u16, _registry: Arc<ToolRegistry>) -> anyhow::Result<()> {
    anyhow::bail!("HTTP transport not available - compile with 'http_transport' feature")
}

/// Run the provider in stdio MCP mode
#[cfg(feature = "mcp_server")]
async fn run_stdio_server(registry: Arc<ToolRegistry>) -> anyhow::Result<()> {
    hollaex_provider::transport::stdio::run_stdio_server(registry).await
}

#[cfg(not(feature = "mcp_server"))]
async fn run_stdio_server(_registry: Arc<ToolRegistry>) -> anyhow::Result<()> {
    anyhow::bail!("stdio mode not available - compile with 'mcp_server' feature")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("hollaex-provider")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_parse_args_overrides() {
        let cli = parse_args(&args(&["--http", "--port", "8080"])).unwrap();
        assert_eq!(cli.mode, Some(TransportMode::Http));
        assert_eq!(cli.port, Some(8080));

        let cli = parse_args(&args(&["--mode", "stdio"])).unwrap();
        assert_eq!(cli.mode, Some(TransportMode::Stdio));
        assert_eq!(cli.port, None);
    }

    #[test]
    fn test_parse_args_rejects_bad_values() {
        assert!(parse_args(&args(&["--port", "http"])).is_err());
        assert!(parse_args(&args(&["--mode", "grpc"])).is_err());
        assert!(parse_args(&args(&["--port"])).is_err());
    }
}
