//! `add-license` — pick an open-source license and write it to `LICENSE`.
//!
//! # Flow
//! 1. Parse CLI arguments ([`cli`]) and set up logging.
//! 2. Load config ([`config::load_config`]).
//! 3. Build the HTTP fetcher ([`registry::http`]) and the cache ([`cache`]).
//! 4. `--list`: print the catalogue ([`report`]) and exit.
//! 5. Otherwise run [`workflow::add_license`]: fetch the list, pick, fetch
//!    the text, write `<path>/LICENSE` ([`writer`]).
//! 6. Exit `0` on success or cancellation, `1` on any error.

mod cache;
mod cli;
mod config;
mod error;
mod models;
mod prompt;
mod registry;
mod report;
mod workflow;
mod writer;

#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cache::disk::DiskCache;
use cache::memory::MemoryCache;
use cache::{LicenseCache, NoCache};
use cli::{Cli, ListFormat};
use config::{load_config, CacheMode, Config};
use models::Outcome;
use prompt::TerminalPrompter;
use registry::github::GithubLicenses;
use registry::http::ReqwestFetcher;
use workflow::{add_license, AddOptions};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let path = cli
        .path
        .canonicalize()
        .unwrap_or_else(|_| cli.path.clone());

    let config = load_config(&path, cli.config.as_deref())?;
    debug!(?config, "configuration loaded");

    let fetcher = ReqwestFetcher::new(config.api.user_agent.clone(), config.api.timeout())?;
    let cache = build_cache(&config, cli.no_cache)?;
    let api = GithubLicenses::new(&fetcher, cache.as_ref())
        .with_base_url(config.api.base_url.clone())
        .with_ttl(config.cache.ttl());

    let result = if cli.list {
        list(&api, &cli).await
    } else {
        add(&api, &cli, &path).await
    };

    // Every failure of the flow ends up here and nowhere else.
    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_cache(config: &Config, disabled: bool) -> Result<Box<dyn LicenseCache>> {
    if disabled {
        return Ok(Box::new(NoCache));
    }

    let cache: Box<dyn LicenseCache> = match config.cache.mode {
        CacheMode::Off => Box::new(NoCache),
        CacheMode::Memory => Box::new(MemoryCache::new()),
        CacheMode::Disk => {
            let dir = config
                .cache
                .dir
                .clone()
                .or_else(DiskCache::default_dir)
                .ok_or_else(|| anyhow::anyhow!("no cache directory available; set cache.dir"))?;
            let disk = DiskCache::open(dir)?;
            debug!(dir = %disk.dir().display(), "using disk cache");
            Box::new(disk)
        }
    };
    Ok(cache)
}

async fn list(api: &GithubLicenses<'_>, cli: &Cli) -> Result<()> {
    let licenses = api.list_licenses().await?;
    match cli.format {
        ListFormat::Terminal => println!("{}", report::terminal::render(&licenses, cli.quiet)),
        ListFormat::Json => println!("{}", serde_json::to_string_pretty(&licenses)?),
    }
    Ok(())
}

async fn add(
    api: &GithubLicenses<'_>,
    cli: &Cli,
    path: &std::path::Path,
) -> Result<()> {
    let mut prompter = TerminalPrompter::stdio(!cli.quiet);
    let options = AddOptions {
        license: cli.license.clone(),
        force: cli.yes,
    };

    match add_license(api, &mut prompter, Some(path), &options).await? {
        Outcome::Written(file) => {
            if !cli.quiet {
                println!(
                    "{} License file added to your project: {}",
                    "✓".green(),
                    file.display()
                );
            }
        }
        Outcome::Cancelled => {
            if !cli.quiet {
                println!("{} License addition cancelled.", "→".cyan());
            }
        }
        Outcome::NothingSelected => debug!("no license selected"),
    }

    Ok(())
}
