//! Greeting relay.
//!
//! ```text
//!   caller ── GET /greeting ──▶ relay ── GET /hello ──▶ downstream
//!                               │
//!                               ├─ LoggingInterceptor
//!                               ├─ TracePropagationInterceptor (trace_id, span_id)
//!                               └─ RetryInterceptor (429 → retry, 3 attempts)
//! ```

use std::path::PathBuf;

use clap::Parser;

use greeting_relay::config::{load_config, validate_config, ConfigError, RelayConfig};
use greeting_relay::lifecycle::startup;
use greeting_relay::observability::logging::init_logging;

#[derive(Parser)]
#[command(name = "greeting-relay")]
#[command(about = "Relays GET /greeting to a downstream GET /hello", long_about = None)]
struct Cli {
    /// TOML configuration file; defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override downstream.base_url.
    #[arg(long)]
    base_url: Option<String>,

    /// Override listener.bind_address.
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RelayConfig::default(),
    };
    if let Some(base_url) = cli.base_url {
        config.downstream.base_url = base_url;
    }
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        downstream = %config.downstream.base_url,
        connect_timeout_secs = config.timeouts.connect_secs,
        read_timeout_secs = config.timeouts.read_secs,
        max_attempts = config.retries.max_attempts,
        "Configuration loaded"
    );

    startup::run(config).await?;
    Ok(())
}
