use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use snack_scrape::{
    accumulate, reduce,
    scrape::{DEFAULT_ROW_SELECTOR, DEFAULT_URL},
    OutputFormat, SnackScraperBuilder,
};
use std::{fs, path::PathBuf};

/// Prints the favorite snack of every customer in the candy store's table.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Page to scrape
    #[arg(long, default_value = DEFAULT_URL)]
    url: String,
    /// Read the page from a local file instead of fetching it
    #[arg(long)]
    file: Option<PathBuf>,
    /// CSS selector of the customer rows
    #[arg(long, default_value = DEFAULT_ROW_SELECTOR)]
    selector: String,
    /// Output format: pretty or compact
    #[arg(long, default_value_t = OutputFormat::Pretty)]
    format: OutputFormat,
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init_timed();

    let args = Args::parse();
    let scraper = SnackScraperBuilder::default()
        .url(args.url)
        .selector(args.selector)
        .build()?;

    let rows = match &args.file {
        Some(path) => {
            info!("Reading {}", path.display());
            let html = fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            scraper.parse(&html)?
        }
        None => scraper.scrape().await?,
    };

    let ledger = accumulate(rows)?;
    info!("Accumulated {} customers", ledger.len());

    let summaries = reduce(ledger.customers());
    println!("{}", args.format.render(&summaries)?);
    Ok(())
}
