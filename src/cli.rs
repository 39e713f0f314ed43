//! Command-line interface definitions.
//!
//! Every option has a default and can also be set through an environment
//! variable, so running the binary without arguments performs a full pass
//! against the default listing page.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Which page automation backend drives the scrape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DriverKind {
    /// Headless Chrome; supports "load more" pagination.
    Chromium,
    /// Plain HTTP fetches; only server-rendered entries, no pagination.
    Http,
}

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Full pass with defaults
/// just_in_news
///
/// # Custom output and a visible browser window
/// just_in_news --output ./out/news.csv --headed
///
/// # Without a browser, using a site profile
/// just_in_news --driver http --profile ./profile.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// CSV file the article table is written to (replaced on every run)
    #[arg(short, long, env = "JUST_IN_OUTPUT", default_value = "data/scraped_news.csv")]
    pub output: PathBuf,

    /// Log file, appended to alongside console output
    #[arg(long, env = "JUST_IN_LOG_FILE", default_value = "scraping.log")]
    pub log_file: PathBuf,

    /// Page automation backend
    #[arg(long, env = "JUST_IN_DRIVER", value_enum, default_value_t = DriverKind::Chromium)]
    pub driver: DriverKind,

    /// Show the browser window (chromium driver only)
    #[arg(long, env = "JUST_IN_HEADED")]
    pub headed: bool,

    /// Path to the Chrome/Chromium executable (chromium driver only)
    #[arg(long, env = "CHROME_PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Maximum number of "load more" clicks on the listing page
    #[arg(long, env = "JUST_IN_MAX_LOAD_MORE", default_value_t = 50)]
    pub max_load_more: usize,

    /// Page-load timeout in seconds for every navigation
    #[arg(long, env = "JUST_IN_PAGE_LOAD_TIMEOUT", default_value_t = 130)]
    pub page_load_timeout_secs: u64,

    /// Optional YAML site profile overriding selectors and the listing URL
    #[arg(short, long, env = "JUST_IN_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Click the cookie consent banner before expanding the listing
    #[arg(long, env = "JUST_IN_ACCEPT_COOKIES")]
    pub accept_cookies: bool,
}
