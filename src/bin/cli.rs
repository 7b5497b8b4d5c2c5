//! confcrawl CLI
//!
//! Sequential, resumable batch crawler for conference virtual-event
//! catalogs. Each phase can be re-run against only its failed items.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use confcrawl::{
    error::Result,
    models::Config,
    pipeline::{self, RunMode},
    services::{HttpTranslator, Translate},
    storage::LocalStorage,
    utils::http::HttpFetcher,
};

/// confcrawl - Conference Catalog Crawler
#[derive(Parser, Debug)]
#[command(
    name = "confcrawl",
    version,
    about = "Conference virtual-event catalog crawler"
)]
struct Cli {
    /// Path to storage directory containing config files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch the catalog page and regenerate the listing snapshot
    Listing,

    /// Fetch author and abstract for each poster
    Details {
        /// Retry only the items in the failure mapping
        #[arg(long)]
        resume: bool,
    },

    /// Translate stored abstracts
    Translate {
        /// Retry only the items in the translation-failure mapping
        #[arg(long)]
        resume: bool,
    },

    /// Write the markdown digest of all stored records
    Export,

    /// Run full pipeline: Listing → Details → Translate → Export
    Pipeline {
        /// Skip the listing fetch, reuse the existing snapshot
        #[arg(long)]
        skip_listing: bool,
    },

    /// Validate configuration files
    Validate,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn mode(resume: bool) -> RunMode {
    if resume { RunMode::Resume } else { RunMode::Fresh }
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("confcrawl starting...");

    let config_path = cli.storage_dir.join("config.toml");
    let config = Config::load_or_default(&config_path);
    config.validate()?;

    log::info!("Loaded configuration from {}", cli.storage_dir.display());

    let storage = LocalStorage::new(&cli.storage_dir, config.paths.clone());
    let fetcher = HttpFetcher::new(&config.crawler)?;

    match cli.command {
        Command::Listing => {
            let listing = pipeline::run_listing(&config, &fetcher, &storage).await?;
            log::info!(
                "Listing complete: {} items, {} posters",
                listing.total_count(),
                listing.posters.len()
            );
        }

        Command::Details { resume } => {
            let outcome =
                pipeline::run_details(&config, &fetcher, &storage, mode(resume)).await?;
            log::info!(
                "Details complete: {}/{} succeeded, {} failed",
                outcome.succeeded,
                outcome.total,
                outcome.failed
            );
        }

        Command::Translate { resume } => {
            let translator = HttpTranslator::new(&config.crawler, &config.translator)?;
            let outcome =
                pipeline::run_translate(&translator, &storage, mode(resume)).await?;
            log::info!(
                "Translation complete: {}/{} succeeded, {} failed",
                outcome.succeeded,
                outcome.total,
                outcome.failed
            );
        }

        Command::Export => {
            let count = pipeline::run_export(&storage, &storage.markdown_path()).await?;
            log::info!("Export complete: {count} records");
        }

        Command::Pipeline { skip_listing } => {
            if skip_listing {
                if !storage.listing_path().exists() {
                    return Err(confcrawl::error::AppError::config(
                        "Cannot skip listing: no snapshot found",
                    ));
                }
                log::info!("Skipping listing fetch, using existing snapshot");
                let outcome =
                    pipeline::run_details(&config, &fetcher, &storage, RunMode::Fresh).await?;
                log::info!("Details: {}/{} succeeded", outcome.succeeded, outcome.total);

                if config.translator.endpoint.is_some() {
                    let translator = HttpTranslator::new(&config.crawler, &config.translator)?;
                    pipeline::run_translate(&translator, &storage, RunMode::Fresh).await?;
                }
                pipeline::run_export(&storage, &storage.markdown_path()).await?;
            } else {
                let translator = config
                    .translator
                    .endpoint
                    .as_ref()
                    .map(|_| HttpTranslator::new(&config.crawler, &config.translator))
                    .transpose()?;
                pipeline::run_pipeline(
                    &config,
                    &fetcher,
                    translator.as_ref().map(|t| t as &dyn Translate),
                    &storage,
                )
                .await?;
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            config.validate()?;
            log::info!("✓ Config OK (crawler, site, selectors, paths)");
        }
    }

    log::info!("Done!");

    Ok(())
}
