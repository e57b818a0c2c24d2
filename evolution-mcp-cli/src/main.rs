use clap::Parser;
use evolution_api::{API_URL_ENV, ApiConfig, EvolutionClient};
use evolution_mcp::EvolutionMcpServer;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "evolution-mcp", version)]
#[command(about = "MCP server exposing Evolution API WhatsApp tools over stdio")]
#[command(
    after_help = "Environment:\n  EVOLUTION_API_KEY  gateway token (required)\n  EVOLUTION_API_URL  gateway base address (default: http://localhost:8080)\n  RUST_LOG           log filter, overrides --log-level"
)]
struct Cli {
    /// Gateway base address
    #[arg(long, value_name = "URL", env = API_URL_ENV)]
    base_url: Option<String>,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

/// JSON logs on stderr; stdout belongs to the MCP transport.
fn init_logging(default_level: &str) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .json()
        .try_init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let config = match ApiConfig::from_env_with_base_url(cli.base_url.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Refusing to start");
            std::process::exit(1);
        }
    };

    let client = match EvolutionClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create Evolution API client");
            std::process::exit(1);
        }
    };

    tracing::info!(base_url = %config.base_url, "Using Evolution API gateway");

    if let Err(e) = EvolutionMcpServer::new(client).serve_stdio().await {
        tracing::error!(error = %e, "MCP server failed");
        std::process::exit(1);
    }
}
