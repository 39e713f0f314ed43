//! Listing page: pagination and reference extraction.
//!
//! The listing is expanded by clicking its "load more" control a bounded
//! number of times, then every loaded entry is turned into an
//! [`ArticleReference`]. Entries that are videos or miss a sub-element are
//! skipped without affecting their siblings.

use super::FAN_OUT;
use super::profile::SiteProfile;
use crate::driver::{DriverError, PageSession, SharedSession};
use crate::models::ArticleReference;
use futures::stream::{self, StreamExt};
use tracing::{debug, error, info, instrument};

/// Upper bound on "load more" activations.
pub const MAX_LOAD_MORE_ATTEMPTS: usize = 50;

/// Click the "load more" control up to `max_attempts` times.
///
/// Stops at the first attempt where the control is missing or cannot be
/// clicked. Whether new entries actually appeared is not checked.
///
/// # Returns
///
/// The number of activation attempts made, including a failed one.
///
/// # Errors
///
/// Only session failures other than a missing or non-interactable control.
#[instrument(level = "info", skip(session))]
pub async fn expand<S: PageSession>(
    session: &mut S,
    selector: &str,
    max_attempts: usize,
) -> Result<usize, DriverError> {
    let mut attempts = 0;
    while attempts < max_attempts {
        let control = match session.find_element(None, selector).await {
            Ok(control) => control,
            Err(DriverError::ElementMissing { .. }) => {
                debug!(attempts, "Load-more control absent; listing fully expanded");
                break;
            }
            Err(e) => return Err(e),
        };

        attempts += 1;
        match session.activate(&control).await {
            Ok(()) => {}
            Err(DriverError::NotInteractable(reason)) => {
                debug!(attempts, %reason, "Load-more control not clickable; stopping");
                break;
            }
            Err(e) => return Err(e),
        }
    }
    Ok(attempts)
}

/// Best-effort click on the cookie consent banner.
pub async fn accept_cookies<S: PageSession>(session: &mut S, selector: &str) {
    let outcome = match session.find_element(None, selector).await {
        Ok(button) => session.activate(&button).await,
        Err(e) => Err(e),
    };
    match outcome {
        Ok(()) => info!("Accepted cookie consent"),
        Err(e) => debug!(error = %e, "No cookie consent to accept"),
    }
}

/// Turn one listing entry into a reference.
///
/// Returns `None` for video entries and for entries missing any
/// sub-element; the latter are logged.
pub async fn extract_reference<S: PageSession>(
    session: &S,
    entry: &S::Element,
    profile: &SiteProfile,
    index: usize,
) -> Option<ArticleReference> {
    match read_reference(session, entry, profile).await {
        Ok(Some(reference)) => Some(reference),
        Ok(None) => {
            debug!(index, "Skipping video entry");
            None
        }
        Err(e) => {
            error!(index, error = %e, "Listing entry skipped");
            None
        }
    }
}

async fn read_reference<S: PageSession>(
    session: &S,
    entry: &S::Element,
    profile: &SiteProfile,
) -> Result<Option<ArticleReference>, DriverError> {
    let anchor = session.find_element(Some(entry), &profile.link).await?;
    let link = session
        .read_attribute(&anchor, "href")
        .await?
        .filter(|href| !href.is_empty())
        .ok_or_else(|| DriverError::ElementMissing {
            selector: format!("{}[href]", profile.link),
        })?;
    if profile.is_video(&link) {
        return Ok(None);
    }

    let date = session.find_element(Some(entry), &profile.date).await?;
    let date = session.read_text(&date).await?;
    let time = session.find_element(Some(entry), &profile.time).await?;
    let time = session.read_text(&time).await?;
    let heading = session.find_element(Some(entry), &profile.heading).await?;
    let title = session.read_text(&heading).await?;

    Ok(Some(ArticleReference {
        title,
        link,
        published_at: format!("{date} {time}{}", profile.time_suffix),
    }))
}

/// Extract references from all entries, keeping listing order.
#[instrument(level = "info", skip_all, fields(entries = entries.len()))]
pub async fn extract_references<S: PageSession>(
    shared: &SharedSession<S>,
    entries: &[S::Element],
    profile: &SiteProfile,
) -> Vec<ArticleReference> {
    let references: Vec<ArticleReference> = stream::iter(entries.iter().enumerate())
        .map(|(index, entry)| async move {
            let session = shared.lock().await;
            extract_reference(&*session, entry, profile, index).await
        })
        .buffered(FAN_OUT)
        .filter_map(std::future::ready)
        .collect()
        .await;

    info!(count = references.len(), "Extracted article references");
    references
}
