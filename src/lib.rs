//! zoom-pull - pull Zoom cloud recordings into a dated directory tree.
//!
//! This library lists an account's cloud recordings, narrows them with meeting
//! filters, and downloads each selected meeting at most once.
//!
//! # Features
//!
//! - Paginated catalog listing by date range or from the trash
//! - Topic, host email and meeting id filters
//! - Exactly-once download gated on the meeting directory
//! - Append-only tab-separated audit log of written files
//! - Trash after download and restore from trash
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use chrono::NaiveDate;
//! use zoom_pull::{catalog::CatalogQuery, commands::list_records, Config, ZoomApi};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("config.toml"))?;
//!     let api = ZoomApi::new(&config)?;
//!
//!     let query = CatalogQuery::DateRange {
//!         from: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
//!         to: NaiveDate::from_ymd_opt(2021, 3, 31).unwrap(),
//!     };
//!     list_records(&api, query, None, &mut std::io::stdout()).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod download;
pub mod error;
pub mod filter;
pub mod fs;
pub mod lifecycle;
pub mod output;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use api::{Meeting, RecordingsApi, ZoomApi};
pub use config::Config;
pub use download::{DownloadOutcome, MeetingDownloader, RunSummary};
pub use error::{Error, Result};
pub use filter::{FilterSelection, MeetingFilter};
pub use fs::PathNamingScheme;
