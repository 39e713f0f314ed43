//! One full scraping pass over the listing page.
//!
//! 1. **Listing**: load the listing page and expand it
//! 2. **References**: read one reference per loaded entry
//! 3. **Resolution**: visit every reference and extract its body
//! 4. **Reconciliation**: drop failures and duplicates
//!
//! Per-entry and per-article failures never leave this module; only a
//! failure to load or query the listing page itself is returned.

use crate::driver::{DriverError, PageSession, SharedSession};
use crate::models::{Resolution, ResolvedArticle};
use crate::reconcile::reconcile;
use crate::scrapers::profile::SiteProfile;
use crate::scrapers::{article, listing};
use std::time::Duration;
use tracing::{info, instrument};

/// Run-level knobs.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub max_load_more: usize,
    pub page_load_timeout: Duration,
    pub accept_cookies: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            max_load_more: listing::MAX_LOAD_MORE_ATTEMPTS,
            page_load_timeout: article::PAGE_LOAD_TIMEOUT,
            accept_cookies: false,
        }
    }
}

/// What a pass produced, stage by stage.
#[derive(Debug)]
pub struct RunReport {
    pub load_more_attempts: usize,
    pub entries: usize,
    pub references: usize,
    pub resolved: usize,
    pub articles: Vec<ResolvedArticle>,
}

/// Scrape the listing described by `profile` into a deduplicated table.
#[instrument(level = "info", skip_all, fields(listing = %profile.listing_url))]
pub async fn run<S: PageSession>(
    shared: &SharedSession<S>,
    profile: &SiteProfile,
    options: &RunOptions,
) -> Result<RunReport, DriverError> {
    let (load_more_attempts, entries) = {
        let mut session = shared.lock().await;

        info!("Requesting listing page");
        session
            .navigate(&profile.listing_url, options.page_load_timeout)
            .await?;
        if options.accept_cookies {
            listing::accept_cookies(&mut *session, &profile.consent).await;
        }

        info!("Loading more articles");
        let attempts =
            listing::expand(&mut *session, &profile.load_more, options.max_load_more).await?;
        let entries = session.find_elements(None, &profile.entry).await?;
        info!(attempts, entries = entries.len(), "Listing expanded");
        (attempts, entries)
    };

    info!("Extracting articles");
    let references = listing::extract_references(shared, &entries, profile).await;
    let reference_count = references.len();

    info!(count = reference_count, "Resolving article contents");
    let resolutions =
        article::resolve_all(shared, references, &profile.body, options.page_load_timeout).await;
    let resolved = resolutions
        .iter()
        .filter(|r| matches!(r, Resolution::Resolved(_)))
        .count();

    let articles = reconcile(resolutions);
    Ok(RunReport {
        load_more_attempts,
        entries: entries.len(),
        references: reference_count,
        resolved,
        articles,
    })
}
