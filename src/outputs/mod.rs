//! Output generation for the reconciled article table.
//!
//! # Submodules
//!
//! - [`table`]: Writes the articles as a CSV file
//!
//! # Output Structure
//!
//! ```text
//! data/
//! └── scraped_news.csv   # Id,Url,Date,Headline,Body
//! ```
//!
//! The file is replaced on every run.

pub mod table;
