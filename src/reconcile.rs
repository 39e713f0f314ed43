//! Final filtering and deduplication of resolved articles.

use crate::models::{Resolution, ResolvedArticle};
use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

/// Reduce resolution outcomes to the table that gets persisted.
///
/// Empty and failed outcomes are dropped, then records missing a required
/// field, then later records whose URL was already seen. Survivors keep
/// their encounter order. An empty table is a valid result.
#[instrument(level = "info", skip_all)]
pub fn reconcile(candidates: impl IntoIterator<Item = Resolution>) -> Vec<ResolvedArticle> {
    let complete: Vec<ResolvedArticle> = candidates
        .into_iter()
        .filter_map(Resolution::into_article)
        .filter(|article| {
            let ok = article.is_complete();
            if !ok {
                warn!(url = %article.url, "Dropping record with missing fields");
            }
            ok
        })
        .collect();

    let unique_links = complete.iter().map(|a| a.url.as_str()).unique().count();
    info!(records = complete.len(), unique_links, "Unique article links");

    let table: Vec<ResolvedArticle> = complete
        .into_iter()
        .unique_by(|article| article.url.clone())
        .collect();
    debug!(rows = table.len(), "Reconciled article table");
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(id: &str, url: &str, body: &str) -> ResolvedArticle {
        ResolvedArticle {
            id: id.to_string(),
            url: url.to_string(),
            published_at: "06/05/2025 14:30 GMT+1".to_string(),
            headline: format!("Headline {id}"),
            body: body.to_string(),
        }
    }

    #[test]
    fn test_drops_empty_and_failed() {
        let table = reconcile(vec![
            Resolution::Empty,
            Resolution::Resolved(article("1", "https://a", "body")),
            Resolution::Failed,
        ]);
        assert_eq!(table, vec![article("1", "https://a", "body")]);
    }

    #[test]
    fn test_drops_incomplete_records() {
        let table = reconcile(vec![
            Resolution::Resolved(article("1", "", "body")),
            Resolution::Resolved(article("2", "https://b", "")),
            Resolution::Resolved(article("", "https://c", "body")),
            Resolution::Resolved(article("4", "https://d", "body")),
        ]);
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].id, "4");
    }

    #[test]
    fn test_dedup_keeps_first_seen() {
        let table = reconcile(vec![
            Resolution::Resolved(article("1", "https://a", "first")),
            Resolution::Resolved(article("2", "https://b", "b")),
            Resolution::Resolved(article("3", "https://a", "second")),
            Resolution::Resolved(article("4", "https://c", "c")),
            Resolution::Resolved(article("5", "https://b", "b again")),
        ]);
        let ids: Vec<&str> = table.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "4"]);
        assert_eq!(table[0].body, "first");
    }

    #[test]
    fn test_output_size_equals_distinct_urls() {
        let urls = ["u1", "u2", "u1", "u3", "u2", "u1", "u4"];
        let candidates = urls
            .iter()
            .enumerate()
            .map(|(i, u)| Resolution::Resolved(article(&i.to_string(), u, "body")));
        let table = reconcile(candidates);
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let once = reconcile(vec![
            Resolution::Resolved(article("1", "https://a", "x")),
            Resolution::Failed,
            Resolution::Resolved(article("2", "https://a", "y")),
            Resolution::Resolved(article("3", "https://b", "z")),
        ]);
        let twice = reconcile(once.clone().into_iter().map(Resolution::Resolved));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input_is_valid() {
        assert!(reconcile(Vec::new()).is_empty());
    }
}
