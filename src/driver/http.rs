//! Static-document adapter built on `reqwest` and `scraper`.
//!
//! Pages are fetched once per navigation and queried from the parsed HTML.
//! No scripts run, so controls cannot be activated: pagination stops on the
//! first attempt and only server-rendered entries are seen.

use super::{DriverError, PageSession};
use crate::utils::normalize_whitespace;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Where [`HttpSession`] gets its documents from.
pub trait PageSource {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, DriverError>;
}

/// Fetch documents over HTTP(S).
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Result<Self, DriverError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, DriverError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| classify(url, timeout, e))?;
        let body = response.text().await.map_err(|e| classify(url, timeout, e))?;
        debug!(%url, bytes = body.len(), "Fetched document");
        Ok(body)
    }
}

fn classify(url: &str, timeout: Duration, e: reqwest::Error) -> DriverError {
    if e.is_timeout() {
        DriverError::Timeout {
            url: url.to_string(),
            timeout,
        }
    } else {
        DriverError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        }
    }
}

/// Snapshot of one element of a static document.
#[derive(Debug, Clone)]
pub struct StaticElement {
    html: String,
    text: String,
    attributes: HashMap<String, String>,
}

impl StaticElement {
    fn capture(element: ElementRef<'_>) -> Self {
        let text = element.text().collect::<String>();
        Self {
            html: element.html(),
            text: normalize_whitespace(&text),
            attributes: element
                .value()
                .attrs()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

struct LoadedPage {
    url: Url,
    html: String,
}

/// A [`PageSession`] over static HTML documents.
pub struct HttpSession<P = HttpSource> {
    source: P,
    page: Option<LoadedPage>,
}

impl<P: PageSource> HttpSession<P> {
    pub fn new(source: P) -> Self {
        Self { source, page: None }
    }

    #[cfg(test)]
    pub fn source(&self) -> &P {
        &self.source
    }

    fn select(
        &self,
        scope: Option<&StaticElement>,
        selector: &str,
    ) -> Result<Vec<StaticElement>, DriverError> {
        let parsed = Selector::parse(selector)
            .map_err(|e| DriverError::InvalidSelector(format!("{selector}: {e}")))?;

        match scope {
            Some(parent) => {
                let fragment = Html::parse_fragment(&parent.html);
                let root = fragment.root_element();
                // The fragment's first element is the scope itself; only descendants count.
                let own_id = root.child_elements().next().map(|e| e.id());
                Ok(root
                    .select(&parsed)
                    .filter(|e| Some(e.id()) != own_id)
                    .map(StaticElement::capture)
                    .collect())
            }
            None => {
                let page = self.page.as_ref().ok_or(DriverError::NoDocument)?;
                let document = Html::parse_document(&page.html);
                Ok(document.select(&parsed).map(StaticElement::capture).collect())
            }
        }
    }
}

impl<P: PageSource> PageSession for HttpSession<P> {
    type Element = StaticElement;

    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        let parsed = Url::parse(url).map_err(|e| DriverError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        let html = self.source.fetch(url, timeout).await?;
        self.page = Some(LoadedPage { url: parsed, html });
        Ok(())
    }

    async fn find_elements(
        &self,
        scope: Option<&StaticElement>,
        selector: &str,
    ) -> Result<Vec<StaticElement>, DriverError> {
        self.select(scope, selector)
    }

    async fn read_text(&self, element: &StaticElement) -> Result<String, DriverError> {
        Ok(element.text.clone())
    }

    async fn read_attribute(
        &self,
        element: &StaticElement,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        let Some(value) = element.attributes.get(name) else {
            return Ok(None);
        };
        if name == "href" {
            if let Some(page) = &self.page {
                if let Ok(resolved) = page.url.join(value) {
                    return Ok(Some(resolved.to_string()));
                }
            }
        }
        Ok(Some(value.clone()))
    }

    async fn activate(&mut self, _element: &StaticElement) -> Result<(), DriverError> {
        Err(DriverError::NotInteractable(
            "static documents cannot run page scripts".to_string(),
        ))
    }

    async fn close(self) -> Result<(), DriverError> {
        Ok(())
    }
}
