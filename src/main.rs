//! # Assistant Gateway
//!
//! HTTP gateway that answers end-user questions about solar energy through
//! the Gemini generative-text API.
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (port 3001, key from GEMINI_API_KEY)
//! assistant-gateway
//!
//! # Start with a config file
//! assistant-gateway --config /path/to/config.yaml
//!
//! # Start with environment overrides
//! GATEWAY_PORT=9000 GEMINI_MODEL=gemini-1.5-pro assistant-gateway
//! ```

use anyhow::Context;
use clap::Parser;
use gateway_config::{load_config, GatewayConfig, LogFormat};
use gateway_providers::{GeminiConfig, GeminiProvider};
use gateway_server::{AppState, Server, ServerConfig};
use gateway_telemetry::{init_logging, LoggingConfig, Metrics, MetricsConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(name = "assistant-gateway", version, about)]
struct Args {
    /// Path to a YAML or TOML configuration file
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind, overriding configuration
    #[arg(long)]
    host: Option<String>,

    /// Port to bind, overriding configuration
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())
        .await
        .context("Failed to load configuration")?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }

    let logging = LoggingConfig::new()
        .with_level(&config.logging.level)
        .with_json(config.logging.format == LogFormat::Json);
    if let Err(e) = init_logging(&logging) {
        eprintln!("Failed to initialize logging: {e}");
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Starting assistant gateway"
    );

    run(config).await
}

async fn run(config: GatewayConfig) -> anyhow::Result<()> {
    let metrics = Arc::new(
        Metrics::new(&MetricsConfig::default()).context("Failed to initialize metrics")?,
    );

    let provider = GeminiProvider::new(gemini_config(&config))
        .context("Failed to initialize Gemini provider")?;

    match config.fallback_api_key() {
        Some(key) => info!(api_key = %key.masked(), "Configured API key available"),
        None => warn!("No API key configured; requests must supply apiKey"),
    }

    let state = AppState::new(&config, Arc::new(provider), metrics);
    let server = Server::new(
        ServerConfig {
            host: config.server.host.clone(),
            port: config.server.port,
        },
        state,
    );

    server.run().await.context("Server terminated with an error")?;
    Ok(())
}

fn gemini_config(config: &GatewayConfig) -> GeminiConfig {
    let settings = &config.provider;
    GeminiConfig::new()
        .with_base_url(&settings.base_url)
        .with_model(&settings.model)
        .with_timeout(settings.timeout)
        .with_system_prompt(&settings.system_prompt)
        .with_generation(settings.max_output_tokens, settings.temperature)
}
