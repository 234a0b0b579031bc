mod catalog;
mod output;
mod shops;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "liiist")]
#[command(about = "Store-locator and catalog scrapers for Italian grocery chains")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Scrape a chain's store list
    Shops {
        #[command(subcommand)]
        command: ShopsCommands,
    },
    /// Crawl the Oasi Tigre online catalog in a browser
    Catalog(CatalogArgs),
}

#[derive(Debug, Subcommand)]
enum ShopsCommands {
    /// Ipertriscount stores from the Cedigros directory, geocoded
    Ipertriscount {
        /// Write the records to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Oasi Tigre pickup stores from the chain's locator API
    Tigre {
        /// Write the records to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Args)]
struct CatalogArgs {
    /// Location typed into the store picker [default: LIIIST_CATALOG_LOCATION]
    #[arg(long)]
    location: Option<String>,
    /// YAML taxonomy to walk instead of the built-in one [default: LIIIST_TAXONOMY_PATH]
    #[arg(long)]
    taxonomy: Option<PathBuf>,
    /// Change the store already selected in the browser profile
    #[arg(long)]
    reselect: bool,
    /// Load-more clicks allowed per panel
    #[arg(long, default_value_t = liiist_scraper::catalog::DEFAULT_MAX_LOAD_MORE)]
    max_load_more: u32,
    /// Write the product records to this file
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = liiist_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Shops {
            command: ShopsCommands::Ipertriscount { output },
        } => shops::run_ipertriscount(&config, output.as_deref()).await,
        Commands::Shops {
            command: ShopsCommands::Tigre { output },
        } => shops::run_tigre(&config, output.as_deref()).await,
        Commands::Catalog(args) => catalog::run_catalog(&config, args).await,
    }
}
