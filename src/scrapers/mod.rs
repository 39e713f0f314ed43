//! Scrapers for the listing page and the article pages it links to.
//!
//! Scraping happens in two phases, both driven through one
//! [`PageSession`](crate::driver::PageSession):
//!
//! 1. **Listing**: expand the paginated listing, then read one
//!    [`ArticleReference`](crate::models::ArticleReference) per entry
//! 2. **Articles**: visit each reference and extract its body text
//!
//! # Modules
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`profile`] | Selectors and site constants |
//! | [`listing`] | "Load more" expansion, reference extraction |
//! | [`article`] | Body extraction, record creation |
//!
//! Failures are contained per entry and per article: they are logged and
//! the item is skipped.

pub mod article;
pub mod listing;
pub mod profile;

/// Number of per-item tasks driven concurrently within a phase.
pub const FAN_OUT: usize = 12;
