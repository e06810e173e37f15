mod search;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "gfinder-cli")]
#[command(about = "G-Finder lead search from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Find businesses near a location and collect their phone numbers
    Search {
        /// Postal code or free-text address to search around
        #[arg(long)]
        location: String,
        /// Business category or search term (e.g., padaria)
        #[arg(long)]
        keyword: String,
        /// Number of results wanted; at most 20 are enriched
        #[arg(long, default_value = "20", allow_negative_numbers = true)]
        count: i64,
        /// Write an .xlsx export to this file, or into this directory with
        /// a dated filename
        #[arg(long)]
        export: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = gfinder_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            location,
            keyword,
            count,
            export,
        } => search::run_search(&config, &location, &keyword, count, export.as_deref()).await,
    }
}
