mod scrape;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::scrape::OutputFormat;

#[derive(Debug, Parser)]
#[command(name = "storescan")]
#[command(about = "Extract catalog, contact and policy data from Shopify storefronts")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape one storefront and print or save the report
    Scrape {
        /// Store URL; `https://` is assumed when no scheme is given
        url: String,
        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormat,
        /// Write the report to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = storescan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Scrape {
            url,
            format,
            output,
        }) => scrape::run_scrape(&config, &url, format, output.as_deref()).await?,
        None => println!("storescan: run `storescan scrape <URL>` to scrape a store"),
    }

    Ok(())
}
