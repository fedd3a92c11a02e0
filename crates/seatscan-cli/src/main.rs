mod scrape;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "seatscan-cli")]
#[command(about = "Seatscan command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape one event listing page and print the records.
    Scrape(scrape::ScrapeArgs),
    /// List the registered vendor adapters.
    Vendors,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = seatscan_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Scrape(args) => scrape::run(&config, args).await,
        Commands::Vendors => {
            for adapter in seatscan_scraper::vendors::all() {
                println!(
                    "{:<18} platform {:>2}  {}  ({:?})",
                    adapter.name, adapter.platform_id, adapter.host, adapter.strategy
                );
            }
            Ok(())
        }
    }
}
