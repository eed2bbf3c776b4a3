use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use ecbfx_relay::api::FrankfurterClient;
use ecbfx_relay::config::Config;
use ecbfx_relay::exchange_rates::export_rate_series_csv;
use ecbfx_relay::server::{self, AppState};

#[derive(Parser)]
#[command(name = "ecbfx-relay", version, about = "ECB exchange rate tables for spreadsheet add-ins")]
struct Cli {
    /// Path to the TOML config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP relay
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fetch one series and write it to CSV
    Fetch {
        /// Target currency code, e.g. USD
        #[arg(long)]
        to: String,
        /// First date (YYYY-MM-DD)
        #[arg(long)]
        start: NaiveDate,
        /// Last date (YYYY-MM-DD)
        #[arg(long)]
        end: NaiveDate,
        /// Output file; defaults to output/rates_*.csv
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    run(Cli::parse()).await
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref())?;
    let client = FrankfurterClient::new(config.upstream.base_url.clone(), config.upstream.timeout())?;

    match cli.command.unwrap_or(Command::Serve { host: None, port: None }) {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            server::serve(AppState::new(config, Arc::new(client))).await
        }
        Command::Fetch { to, start, end, output } => {
            let path = export_rate_series_csv(&client, &to, start, end, output.as_deref()).await?;
            println!("✅ Rates written to {}", path.display());
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
