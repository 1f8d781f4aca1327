//! # Code Analyzer Relay
//!
//! Command-line entry point that loads configuration from the environment
//! (and an optional `.env` file), initializes logging, and serves the relay
//! endpoints together with the Selection UI.

mod telemetry;

use anyhow::Context;
use clap::Parser;
use code_analyzer::Config;
use code_analyzer::server::{DEFAULT_PORT, Server, ServerOptions};
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use telemetry::TelemetryOptions;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(author, version, about = "Relay that analyzes GitHub repository files with Gemini", long_about = None)]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "HOST", default_value = "127.0.0.1")]
    host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Directory containing the web UI
    #[arg(long, default_value = "static")]
    static_dir: PathBuf,

    /// Also write logs to a daily rolling file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Export traces and metrics over OTLP
    #[arg(long)]
    otel: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; variables may come from the environment
    let dotenv = dotenvy::dotenv();

    let cli = Cli::parse();

    let _telemetry = telemetry::init_tracing_subscriber(TelemetryOptions {
        log_dir: cli.log_dir.as_deref(),
        otel: cli.otel,
    })?;

    if let Ok(path) = dotenv {
        info!("Loaded environment from {}", path.display());
    }

    let config = Config::from_env().context("failed to load configuration")?;
    info!("Using model {}", config.model);

    let static_dir = if cli.static_dir.is_dir() {
        Some(cli.static_dir)
    } else {
        warn!(
            "Static directory {} not found, serving API only",
            cli.static_dir.display()
        );
        None
    };

    let options = ServerOptions {
        bind_addr: SocketAddr::new(cli.host, cli.port),
        static_dir,
    };

    let server = Server::new(&config, options)?;
    info!("Starting relay on {}", server.addr());
    server.run().await?;

    Ok(())
}
