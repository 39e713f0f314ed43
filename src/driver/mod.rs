//! Page automation adapters.
//!
//! The scrapers only talk to a page through the [`PageSession`] trait:
//! navigate, query elements by CSS selector, read text and attributes, and
//! activate (click) controls.
//!
//! # Adapters
//!
//! | Adapter | Module | Backend | Pagination |
//! |---------|--------|---------|------------|
//! | [`ChromiumSession`] | [`chromium`] | Headless Chrome over CDP | Yes |
//! | [`HttpSession`] | [`http`] | `reqwest` + `scraper` | No, `activate` always fails |
//!
//! # One navigation at a time
//!
//! A session is one browser tab. `navigate` and `activate` take `&mut self`,
//! so tasks can only share a session through [`SharedSession`], which hands
//! out exclusive access for the whole of a task's interaction with the page.

use std::time::Duration;
use thiserror::Error;
use tokio::sync::{Mutex, MutexGuard};

pub mod chromium;
pub mod http;

pub use chromium::{BrowserOptions, ChromiumSession};
pub use http::{HttpSession, HttpSource, PageSource};

/// Failures reported by a [`PageSession`].
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("no element matches selector `{selector}`")]
    ElementMissing { selector: String },

    #[error("element is not interactable: {0}")]
    NotInteractable(String),

    #[error("navigation to {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("navigation to {url} failed: {reason}")]
    Navigation { url: String, reason: String },

    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    #[error("no document loaded")]
    NoDocument,

    #[error("failed to launch browser: {0}")]
    Launch(String),

    #[error("browser protocol error: {0}")]
    Browser(#[from] chromiumoxide::error::CdpError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A navigable page that can be queried by CSS selector.
///
/// `scope = None` queries the whole document, `Some(element)` only its
/// descendants.
pub trait PageSession {
    /// Handle to an element of the current document.
    type Element;

    /// Load `url`, failing with [`DriverError::Timeout`] after `timeout`.
    async fn navigate(&mut self, url: &str, timeout: Duration) -> Result<(), DriverError>;

    /// All elements matching `selector`, empty if none.
    async fn find_elements(
        &self,
        scope: Option<&Self::Element>,
        selector: &str,
    ) -> Result<Vec<Self::Element>, DriverError>;

    /// First element matching `selector`, or [`DriverError::ElementMissing`].
    async fn find_element(
        &self,
        scope: Option<&Self::Element>,
        selector: &str,
    ) -> Result<Self::Element, DriverError> {
        self.find_elements(scope, selector)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DriverError::ElementMissing {
                selector: selector.to_string(),
            })
    }

    /// Rendered text of the element, trimmed.
    async fn read_text(&self, element: &Self::Element) -> Result<String, DriverError>;

    /// Attribute value; `href` is returned as an absolute URL.
    async fn read_attribute(
        &self,
        element: &Self::Element,
        name: &str,
    ) -> Result<Option<String>, DriverError>;

    /// Click the element, failing with [`DriverError::NotInteractable`].
    async fn activate(&mut self, element: &Self::Element) -> Result<(), DriverError>;

    /// Tear the session down.
    async fn close(self) -> Result<(), DriverError>
    where
        Self: Sized;
}

/// Single-owner wrapper that serializes all access to one session.
pub struct SharedSession<S> {
    inner: Mutex<S>,
}

impl<S: PageSession> SharedSession<S> {
    pub fn new(session: S) -> Self {
        Self {
            inner: Mutex::new(session),
        }
    }

    /// Exclusive access to the session until the guard is dropped.
    pub async fn lock(&self) -> MutexGuard<'_, S> {
        self.inner.lock().await
    }

    pub fn into_inner(self) -> S {
        self.inner.into_inner()
    }
}
