//! Test doubles shared by the module tests.

use crate::driver::{DriverError, PageSource};
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

enum Fixture {
    Html(String),
    TimesOut,
}

/// Serves canned documents by URL and records every fetch.
#[derive(Default)]
pub struct FixtureSource {
    pages: HashMap<String, Fixture>,
    requests: Mutex<Vec<String>>,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), Fixture::Html(html.to_string()));
        self
    }

    pub fn with_timeout(mut self, url: &str) -> Self {
        self.pages.insert(url.to_string(), Fixture::TimesOut);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }

    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

impl PageSource for FixtureSource {
    async fn fetch(&self, url: &str, timeout: Duration) -> Result<String, DriverError> {
        self.requests.lock().unwrap().push(url.to_string());
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);
        // Give any other task a chance to start a fetch concurrently.
        tokio::task::yield_now().await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        match self.pages.get(url) {
            Some(Fixture::Html(html)) => Ok(html.clone()),
            Some(Fixture::TimesOut) => Err(DriverError::Timeout {
                url: url.to_string(),
                timeout,
            }),
            None => Err(DriverError::Navigation {
                url: url.to_string(),
                reason: "404 Not Found".to_string(),
            }),
        }
    }
}
