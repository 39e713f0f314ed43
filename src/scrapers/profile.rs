//! Selectors and constants describing the scraped site.
//!
//! Defaults target the Euronews "Just In" timeline. Any field can be
//! overridden from a YAML file passed with `--profile`; missing keys keep
//! their defaults.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::Path;
use tracing::{info, instrument};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct SiteProfile {
    /// Listing page the run starts from.
    pub listing_url: String,
    /// The "load more" control.
    pub load_more: String,
    /// One listing entry.
    pub entry: String,
    /// Article link inside an entry.
    pub link: String,
    /// Date component inside an entry.
    pub date: String,
    /// Time component inside an entry.
    pub time: String,
    /// Heading inside an entry.
    pub heading: String,
    /// Body paragraphs on the article page.
    pub body: String,
    /// Link fragments that mark an entry as a video.
    pub video_markers: Vec<String>,
    /// Appended to the time component.
    pub time_suffix: String,
    /// Cookie consent button.
    pub consent: String,
}

impl Default for SiteProfile {
    fn default() -> Self {
        Self {
            listing_url: "https://www.euronews.com/just-in".to_string(),
            load_more: "#justin-load-more-button".to_string(),
            entry: ".c-timeline-items__content".to_string(),
            link: ".c-timeline-items__article__link".to_string(),
            date: ".c-item-date".to_string(),
            time: ".c-item-time".to_string(),
            heading: "h2".to_string(),
            body: "#poool-content > p".to_string(),
            video_markers: vec!["/watch-".to_string(), "/video/".to_string()],
            time_suffix: " GMT+1".to_string(),
            consent: "#didomi-notice-agree-button".to_string(),
        }
    }
}

impl SiteProfile {
    /// Whether `link` points at a video rather than an article.
    pub fn is_video(&self, link: &str) -> bool {
        self.video_markers.iter().any(|m| link.contains(m.as_str()))
    }

    /// Load a profile from YAML, falling back to defaults for absent keys.
    #[instrument(level = "info", skip_all, fields(path = %path.display()))]
    pub async fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = tokio::fs::read_to_string(path).await?;
        let profile: SiteProfile = serde_yaml::from_str(&raw)?;
        info!(listing_url = %profile.listing_url, "Loaded site profile");
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_markers() {
        let profile = SiteProfile::default();
        assert!(profile.is_video("https://www.euronews.com/video/2025/05/06/clip"));
        assert!(profile.is_video("https://www.euronews.com/watch-live"));
        assert!(!profile.is_video("https://www.euronews.com/2025/05/06/story"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let profile: SiteProfile = serde_yaml::from_str(
            "listing_url: https://example.test/latest\nvideo_markers: [\"/clips/\"]\n",
        )
        .unwrap();
        assert_eq!(profile.listing_url, "https://example.test/latest");
        assert_eq!(profile.video_markers, vec!["/clips/".to_string()]);
        assert_eq!(profile.body, "#poool-content > p");
        assert_eq!(profile.time_suffix, " GMT+1");
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("profile.yaml");
        tokio::fs::write(&path, "heading: h3\n").await.unwrap();

        let profile = SiteProfile::load(&path).await.unwrap();
        assert_eq!(profile.heading, "h3");
        assert_eq!(profile.entry, SiteProfile::default().entry);
    }
}
