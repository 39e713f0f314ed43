//! Headless Chrome adapter built on `chromiumoxide`.
//!
//! The browser is launched with the flags needed to run inside containers
//! (`--no-sandbox`, `--disable-dev-shm-usage`). The CDP event handler runs on
//! its own tokio task for the lifetime of the session and is joined on
//! [`close`](PageSession::close).

use super::{DriverError, PageSession};
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use chromiumoxide::error::CdpError;
use chromiumoxide::Page;
use futures::StreamExt;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};

/// Launch options for [`ChromiumSession`].
#[derive(Debug, Clone, Default)]
pub struct BrowserOptions {
    /// Show the browser window instead of running headless.
    pub headed: bool,
    /// Explicit Chrome/Chromium executable; auto-detected when `None`.
    pub executable: Option<PathBuf>,
    /// Longest navigation the run allows.
    pub page_load_timeout: Duration,
}

/// CDP requests must outlive the page-load timeout enforced in `navigate`.
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(5);

/// Deadline for every CDP request, navigations included.
fn request_timeout(options: &BrowserOptions) -> Duration {
    options.page_load_timeout + REQUEST_TIMEOUT_SLACK
}

fn browser_config(options: &BrowserOptions) -> Result<BrowserConfig, DriverError> {
    let mut builder = BrowserConfig::builder()
        .no_sandbox()
        .arg("--disable-dev-shm-usage")
        .request_timeout(request_timeout(options));
    if options.headed {
        builder = builder.with_head();
    }
    if let Some(path) = &options.executable {
        builder = builder.chrome_executable(path);
    }
    builder.build().map_err(DriverError::Launch)
}

/// Wait for the CDP handler task; returns whether it ended normally.
async fn join_handler(handler: JoinHandle<()>) -> bool {
    match handler.await {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "CDP handler task did not finish cleanly");
            false
        }
    }
}

/// A single Chrome tab driven over the DevTools protocol.
pub struct ChromiumSession {
    browser: Browser,
    page: Page,
    handler: JoinHandle<()>,
}

impl ChromiumSession {
    /// Launch a browser and open one blank tab.
    #[instrument(level = "info", skip_all, fields(headed = options.headed))]
    pub async fn launch(options: &BrowserOptions) -> Result<Self, DriverError> {
        let config = browser_config(options)?;

        let (browser, mut handler) = Browser::launch(config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!(error = %e, "CDP handler stopped");
                    break;
                }
            }
        });

        let page = browser.new_page("about:blank").await?;
        info!("Browser session ready");
        Ok(Self {
            browser,
            page,
            handler,
        })
    }
}

impl PageSession for ChromiumSession {
    type Element = Element;

    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), DriverError> {
        match tokio::time::timeout(timeout, self.page.goto(url)).await {
            Ok(Ok(_)) => Ok(()),
            Ok(Err(CdpError::Timeout)) => Err(DriverError::Timeout {
                url: url.to_string(),
                timeout,
            }),
            Ok(Err(e)) => Err(DriverError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            }),
            Err(_) => Err(DriverError::Timeout {
                url: url.to_string(),
                timeout,
            }),
        }
    }

    async fn find_elements(
        &self,
        scope: Option<&Element>,
        selector: &str,
    ) -> Result<Vec<Element>, DriverError> {
        let elements = match scope {
            Some(parent) => parent.find_elements(selector).await?,
            None => self.page.find_elements(selector).await?,
        };
        Ok(elements)
    }

    async fn read_text(&self, element: &Element) -> Result<String, DriverError> {
        let text = element.inner_text().await?.unwrap_or_default();
        Ok(text.trim().to_string())
    }

    async fn read_attribute(
        &self,
        element: &Element,
        name: &str,
    ) -> Result<Option<String>, DriverError> {
        // DOM properties carry the resolved value (absolute `href`).
        if let Some(serde_json::Value::String(value)) = element.property(name).await? {
            return Ok(Some(value));
        }
        Ok(element.attribute(name).await?)
    }

    async fn activate(&mut self, element: &Element) -> Result<(), DriverError> {
        element
            .click()
            .await
            .map(|_| ())
            .map_err(|e| DriverError::NotInteractable(e.to_string()))
    }

    async fn close(mut self) -> Result<(), DriverError> {
        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!(error = %e, "Browser process did not exit cleanly");
        }
        join_handler(self.handler).await;
        closed?;
        info!("Browser session closed");
        Ok(())
    }
}
