//! bucket Server Binary
//!
//! Starts the TCP server. Settings come from `BUCKET_*` environment
//! variables; flags override them.

use clap::Parser;
use bucket::network::Server;
use bucket::Config;
use tracing_subscriber::{fmt, EnvFilter};

/// bucket Server
#[derive(Parser, Debug)]
#[command(name = "bucket-server")]
#[command(about = "File-backed key/value blob store")]
#[command(version)]
struct Args {
    /// Bind host (overrides BUCKET_SERVER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides BUCKET_SERVER_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Storage root directory (overrides BUCKET_ROOT)
    #[arg(short, long)]
    root: Option<String>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,bucket=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(true)
        .init();

    let args = Args::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }
    if let Some(root) = args.root {
        config.root = root.into();
    }

    tracing::info!("bucket server v{}", bucket::VERSION);
    tracing::info!("Storage root: {}", config.root.display());

    let server = match Server::bind(&config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!("Failed to start server on {}: {}", config.server_addr(), e);
            std::process::exit(1);
        }
    };

    if let Err(e) = server.run() {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
