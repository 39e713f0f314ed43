//! Article pages: resolving references to full records.
//!
//! Each reference is visited with the shared session, its body paragraphs
//! are joined with single spaces, and a record with a fresh id is produced.
//! Pages without body text and pages that fail to load are dropped and
//! never retried.
//!
//! # Shared session
//!
//! Resolution navigates the one tab the listing was read from. Every task
//! holds the [`SharedSession`] lock from navigation until the last paragraph
//! is read, so at most one navigation is in flight and no task reads
//! paragraphs of a page another task loaded. Parallel resolution would need
//! one session per in-flight task.

use super::FAN_OUT;
use crate::driver::{DriverError, PageSession, SharedSession};
use crate::models::{ArticleReference, ResolvedArticle, Resolution};
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{error, info, instrument};

/// Page-load timeout used for every article navigation.
pub const PAGE_LOAD_TIMEOUT: Duration = Duration::from_secs(130);

/// Resolve one reference to a record.
#[instrument(level = "info", skip_all, fields(url = %reference.link))]
pub async fn resolve<S: PageSession>(
    shared: &SharedSession<S>,
    reference: ArticleReference,
    body_selector: &str,
    timeout: Duration,
) -> Resolution {
    info!("Extracting article");
    let body = {
        let mut session = shared.lock().await;
        read_body(&mut *session, &reference.link, body_selector, timeout).await
    };

    match body {
        Ok(body) if body.is_empty() => {
            info!("No body in article");
            Resolution::Empty
        }
        Ok(body) => {
            let article = ResolvedArticle::from_reference(reference, body);
            info!(id = %article.id, bytes = article.body.len(), "Article extracted");
            Resolution::Resolved(article)
        }
        Err(e) => {
            error!(error = %e, "Article extraction failed");
            Resolution::Failed
        }
    }
}

/// Load `url` and join the texts of all body paragraphs with single spaces.
///
/// A body made only of whitespace (no paragraphs, or only blank ones) is
/// returned as the empty string.
async fn read_body<S: PageSession>(
    session: &mut S,
    url: &str,
    selector: &str,
    timeout: Duration,
) -> Result<String, DriverError> {
    session.navigate(url, timeout).await?;
    let paragraphs = session.find_elements(None, selector).await?;

    let mut texts = Vec::with_capacity(paragraphs.len());
    for paragraph in &paragraphs {
        texts.push(session.read_text(paragraph).await?);
    }
    let body = texts.join(" ");
    if body.trim().is_empty() {
        return Ok(String::new());
    }
    Ok(body)
}

/// Resolve every reference; position `i` of the result belongs to reference `i`.
#[instrument(level = "info", skip_all, fields(references = references.len()))]
pub async fn resolve_all<S: PageSession>(
    shared: &SharedSession<S>,
    references: Vec<ArticleReference>,
    body_selector: &str,
    timeout: Duration,
) -> Vec<Resolution> {
    let resolutions: Vec<Resolution> = stream::iter(references)
        .map(|reference| resolve(shared, reference, body_selector, timeout))
        .buffered(FAN_OUT)
        .collect()
        .await;

    let resolved = resolutions
        .iter()
        .filter(|r| matches!(r, Resolution::Resolved(_)))
        .count();
    info!(
        total = resolutions.len(),
        resolved,
        dropped = resolutions.len() - resolved,
        "Resolved article contents"
    );
    resolutions
}
