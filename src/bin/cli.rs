//! hoops-crawler CLI
//!
//! Local execution entry point. For AWS Lambda, use `hoops-crawler-lambda`.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use hoops_crawler::{
    config::{check_config, load_config},
    error::Result,
    export,
    models::Config,
    pipeline,
    storage::LocalStorage,
    utils::http::HttpFetcher,
};

/// hoops-crawler - NBA box score scraper
#[derive(Parser, Debug)]
#[command(
    name = "hoops-crawler",
    version,
    about = "Scrapes basketball-reference box scores into per-player rows"
)]
struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "storage/config.toml")]
    config: PathBuf,

    /// Snapshot directory (overrides storage.local_dir)
    #[arg(short, long)]
    storage_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Scrape a season and save a snapshot
    Scrape {
        /// Season label, e.g. 2021-22
        #[arg(long)]
        season: String,

        /// First game date (YYYY-MM-DD), defaults to 1 October
        #[arg(long)]
        start: Option<String>,

        /// Last game date (YYYY-MM-DD), defaults to 30 September
        #[arg(long)]
        end: Option<String>,

        /// Scrape without writing a snapshot
        #[arg(long)]
        dry_run: bool,
    },

    /// Show the newest snapshot
    Latest,

    /// Validate configuration
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, config: &Config) {
    let level = if verbose {
        "debug"
    } else {
        config.logging.level.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone();
    let config = Config::load_or_default(&config_path);
    init_logging(cli.verbose, &config);

    log::info!("Loaded configuration from {}", config_path.display());

    let storage_root = cli
        .storage_dir
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.storage.local_dir));
    let storage = LocalStorage::new(&storage_root);

    match cli.command {
        Command::Scrape {
            season,
            start,
            end,
            dry_run,
        } => {
            let config = load_config(&config_path)?;
            let fetcher = HttpFetcher::from_config(&config.scraper)?;

            if dry_run {
                let run = pipeline::run_scrape(
                    &config,
                    &fetcher,
                    &season,
                    start.as_deref(),
                    end.as_deref(),
                )
                .await?;
                log::info!(
                    "Dry run: {} rows scraped, nothing written",
                    run.outcome.rows.len()
                );
            } else {
                let (run, name) = pipeline::run_and_save(
                    &config,
                    &fetcher,
                    &storage,
                    &season,
                    start.as_deref(),
                    end.as_deref(),
                )
                .await?;
                log::info!(
                    "{} rows saved to {}",
                    run.outcome.rows.len(),
                    storage_root.join(&config.storage.bucket).join(name).display()
                );
            }
        }

        Command::Latest => {
            match export::latest_snapshot(&storage, &config.storage.bucket).await? {
                Some((name, rows)) => {
                    let dnp = rows.iter().filter(|r| r.did_not_play()).count();
                    log::info!("Latest snapshot: {}", name);
                    log::info!("Rows: {} ({} did not play)", rows.len(), dnp);
                }
                None => log::info!("No snapshot found yet."),
            }
        }

        Command::Validate => {
            log::info!("Validating {}...", config_path.display());

            if let Err(e) = check_config(&config_path) {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    log::info!("Done!");

    Ok(())
}
