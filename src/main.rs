//! # Just In News
//!
//! Collects full-text articles from a paginated news listing page (by
//! default the Euronews "Just In" timeline) and writes them to a CSV table.
//!
//! ## Usage
//!
//! ```sh
//! just_in_news --output data/scraped_news.csv
//! ```
//!
//! ## Architecture
//!
//! A run is one full pass:
//! 1. **Listing**: open the listing page and click "load more" up to 50 times
//! 2. **References**: read title, link and timestamp of every entry, skipping videos
//! 3. **Resolution**: visit each article and join its body paragraphs
//! 4. **Reconciliation**: drop empty/failed articles and duplicate URLs
//! 5. **Output**: overwrite the CSV file
//!
//! The process exits successfully whenever the pass completes, even with
//! zero rows; it fails only when the pass itself cannot run.

use clap::Parser;
use std::error::Error;
use std::process::ExitCode;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

mod cli;
mod driver;
mod models;
mod outputs;
mod pipeline;
mod reconcile;
mod scrapers;
mod telemetry;
#[cfg(test)]
mod testing;
mod utils;

use cli::{Cli, DriverKind};
use driver::{BrowserOptions, ChromiumSession, HttpSession, HttpSource, PageSession, SharedSession};
use outputs::table;
use pipeline::{RunOptions, RunReport};
use scrapers::profile::SiteProfile;
use utils::ensure_writable_dir;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Cli::parse();

    if let Err(e) = telemetry::init(&args.log_file) {
        eprintln!("failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, chain = %error_chain(e.as_ref()), details = ?e, "Scraping run failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Cli) -> Result<(), Box<dyn Error>> {
    let start_time = Instant::now();
    info!(output = %args.output.display(), driver = ?args.driver, "just_in_news starting up");

    let profile = match &args.profile {
        Some(path) => SiteProfile::load(path).await?,
        None => SiteProfile::default(),
    };

    // Fail before launching a browser if the output cannot be written.
    if let Some(dir) = args.output.parent().filter(|d| !d.as_os_str().is_empty()) {
        ensure_writable_dir(dir).await?;
    }

    let options = RunOptions {
        max_load_more: args.max_load_more,
        page_load_timeout: Duration::from_secs(args.page_load_timeout_secs),
        accept_cookies: args.accept_cookies,
    };

    let report = match args.driver {
        DriverKind::Chromium => {
            info!("Configuring browser session");
            let browser = BrowserOptions {
                headed: args.headed,
                executable: args.chrome_path.clone(),
                page_load_timeout: options.page_load_timeout,
            };
            let session = ChromiumSession::launch(&browser).await?;
            scrape(session, &profile, &options).await?
        }
        DriverKind::Http => {
            info!("Configuring HTTP session");
            let session = HttpSession::new(HttpSource::new()?);
            scrape(session, &profile, &options).await?
        }
    };

    table::write_articles(&report.articles, &args.output)?;

    let elapsed = start_time.elapsed();
    info!(
        entries = report.entries,
        references = report.references,
        resolved = report.resolved,
        rows = report.articles.len(),
        secs = elapsed.as_secs(),
        "Execution complete"
    );
    Ok(())
}

/// Run the pipeline and tear the session down whatever the outcome.
async fn scrape<S: PageSession>(
    session: S,
    profile: &SiteProfile,
    options: &RunOptions,
) -> Result<RunReport, Box<dyn Error>> {
    let shared = SharedSession::new(session);
    let outcome = pipeline::run(&shared, profile, options).await;

    if let Err(e) = shared.into_inner().close().await {
        warn!(error = %e, "Failed to close page session");
    }
    Ok(outcome?)
}

fn error_chain(e: &dyn Error) -> String {
    let mut chain = e.to_string();
    let mut source = e.source();
    while let Some(cause) = source {
        chain.push_str(": ");
        chain.push_str(&cause.to_string());
        source = cause.source();
    }
    chain
}
