//! Data models for listing references and resolved articles.
//!
//! This module defines the records that flow through the pipeline:
//! - [`ArticleReference`]: Lightweight pointer read from one listing entry
//! - [`ResolvedArticle`]: Full article record, one CSV row
//! - [`Resolution`]: Outcome of resolving a single reference
//!
//! The serialized field names of [`ResolvedArticle`] are the CSV column
//! headers, hence the `#[serde(rename = ...)]` attributes.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A candidate article as read from the listing page.
///
/// References are created once per listing entry and consumed by the
/// content resolver. They are never persisted as-is.
///
/// # Fields
///
/// * `title` - Heading text of the entry
/// * `link` - Absolute article URL, the natural dedup key
/// * `published_at` - Display string `"{date} {time} GMT+1"`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleReference {
    /// Heading text of the listing entry.
    pub title: String,
    /// Absolute URL of the article page.
    pub link: String,
    /// Composed date and time as displayed on the listing page.
    pub published_at: String,
}

/// A fully resolved article, serialized as one row of the output table.
///
/// Column order is `Id, Url, Date, Headline, Body`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ResolvedArticle {
    /// Random identifier assigned at resolution time.
    #[serde(rename = "Id")]
    pub id: String,
    /// Article URL, copied from the reference link.
    #[serde(rename = "Url")]
    pub url: String,
    /// Publication display string, copied from the reference.
    #[serde(rename = "Date")]
    pub published_at: String,
    /// Headline, copied from the reference title.
    #[serde(rename = "Headline")]
    pub headline: String,
    /// Body paragraphs joined with single spaces.
    #[serde(rename = "Body")]
    pub body: String,
}

impl ResolvedArticle {
    /// Build a record from its reference and extracted body, assigning a fresh id.
    pub fn from_reference(reference: ArticleReference, body: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            url: reference.link,
            published_at: reference.published_at,
            headline: reference.title,
            body,
        }
    }

    /// Whether every required field carries a value.
    ///
    /// `published_at` and `headline` are display fields and may be empty.
    pub fn is_complete(&self) -> bool {
        !self.id.is_empty() && !self.url.is_empty() && !self.body.is_empty()
    }
}

/// Outcome of resolving one [`ArticleReference`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Body extracted and non-empty.
    Resolved(ResolvedArticle),
    /// The page had no body paragraphs.
    Empty,
    /// Navigation or extraction failed; already logged.
    Failed,
}

impl Resolution {
    pub fn into_article(self) -> Option<ResolvedArticle> {
        match self {
            Resolution::Resolved(article) => Some(article),
            Resolution::Empty | Resolution::Failed => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference() -> ArticleReference {
        ArticleReference {
            title: "Test Article".to_string(),
            link: "https://www.euronews.com/2025/05/06/test-article".to_string(),
            published_at: "06/05/2025 14:30 GMT+1".to_string(),
        }
    }

    #[test]
    fn test_from_reference_copies_fields() {
        let article = ResolvedArticle::from_reference(reference(), "Body text".to_string());
        assert_eq!(article.url, "https://www.euronews.com/2025/05/06/test-article");
        assert_eq!(article.headline, "Test Article");
        assert_eq!(article.published_at, "06/05/2025 14:30 GMT+1");
        assert_eq!(article.body, "Body text");
        assert!(Uuid::parse_str(&article.id).is_ok());
    }

    #[test]
    fn test_ids_are_fresh() {
        let a = ResolvedArticle::from_reference(reference(), "a".to_string());
        let b = ResolvedArticle::from_reference(reference(), "b".to_string());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_is_complete() {
        let mut article = ResolvedArticle::from_reference(reference(), "Body".to_string());
        assert!(article.is_complete());

        article.headline.clear();
        assert!(article.is_complete());

        article.body.clear();
        assert!(!article.is_complete());
    }

    #[test]
    fn test_resolution_into_article() {
        let article = ResolvedArticle::from_reference(reference(), "Body".to_string());
        assert_eq!(
            Resolution::Resolved(article.clone()).into_article(),
            Some(article)
        );
        assert_eq!(Resolution::Empty.into_article(), None);
        assert_eq!(Resolution::Failed.into_article(), None);
    }

    #[test]
    fn test_resolved_article_serialization_uses_column_names() {
        let article = ResolvedArticle::from_reference(reference(), "Body".to_string());
        let json = serde_json::to_string(&article).unwrap();
        assert!(json.contains("\"Id\""));
        assert!(json.contains("\"Headline\":\"Test Article\""));
    }
}
