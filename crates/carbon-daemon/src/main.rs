//! Carbon prediction daemon
//!
//! The daemon provides:
//! - Footprint prediction from daily lifestyle inputs
//! - Threshold-keyed reduction recommendations
//! - Per-activity emission calculations

use std::net::SocketAddr;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use carbon_daemon::config::DaemonConfig;
use carbon_daemon::error::{DaemonError, DaemonResult};
use carbon_daemon::server::Server;

/// Carbon daemon CLI
#[derive(Parser)]
#[command(name = "carbond")]
#[command(about = "Carbon footprint prediction daemon", long_about = None)]
#[command(version)]
struct Cli {
    /// Listen host
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    /// Listen port
    #[arg(short, long, env = "PORT", default_value_t = carbon_daemon::config::DEFAULT_PORT)]
    port: u16,

    /// Log level
    #[arg(long, env = "CARBON_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Enable JSON logging
    #[arg(long, env = "CARBON_LOG_JSON")]
    json: bool,

    /// Disable permissive CORS
    #[arg(long)]
    no_cors: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    if cli.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let mut config = DaemonConfig::default();
    let host = cli
        .host
        .parse()
        .map_err(|e| DaemonError::Config(format!("Invalid listen host: {}", e)))?;
    config.server.listen_addr = SocketAddr::new(host, cli.port);
    config.server.enable_cors = !cli.no_cors;

    println!(
        "carbond {} (ml-carbon-predictor)\n  Listening: {}",
        env!("CARGO_PKG_VERSION"),
        config.server.listen_addr
    );

    let server = Server::new(config);
    server.run().await
}
