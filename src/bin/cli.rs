//! bucket CLI Client
//!
//! Command-line interface for interacting with a bucket server.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use bucket::{Client, Config, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

/// bucket CLI
#[derive(Parser, Debug)]
#[command(name = "bucket-cli")]
#[command(about = "CLI for the bucket blob store")]
struct Args {
    /// Server host (overrides BUCKET_CLIENT_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Server port (overrides BUCKET_CLIENT_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Get a value by key and write it to stdout
    Get {
        /// The key to get
        key: String,
    },

    /// Set a key to a value
    Set {
        /// The key to set
        key: String,

        /// The value to set
        #[arg(required_unless_present = "file")]
        value: Option<String>,

        /// Read the value from a file instead
        #[arg(short, long, conflicts_with = "value")]
        file: Option<PathBuf>,
    },

    /// Delete a key
    Delete {
        /// The key to delete
        key: String,
    },
}

fn main() -> ExitCode {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match run(args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode> {
    let mut config = Config::from_env()?.client;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    let client = Client::from_config(&config);

    match args.command {
        Commands::Get { key } => match client.get(&key)? {
            Some(value) => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(&value)?;
                stdout.flush()?;
            }
            None => {
                eprintln!("{key}: not found");
                return Ok(ExitCode::FAILURE);
            }
        },
        Commands::Set { key, value, file } => {
            let value = match file {
                Some(path) => std::fs::read(path)?,
                None => value.unwrap_or_default().into_bytes(),
            };
            client.set(&key, &value)?;
            println!("ok");
        }
        Commands::Delete { key } => {
            client.delete(&key)?;
            println!("ok");
        }
    }

    Ok(ExitCode::SUCCESS)
}
