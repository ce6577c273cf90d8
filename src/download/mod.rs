//! Download module for meeting recordings.
//!
//! This module provides:
//! - Exactly-once download of a meeting, gated on its directory
//! - The append-only audit log
//! - Byte transfer backends
//! - Run statistics

pub mod audit;
pub mod meeting;
pub mod state;
pub mod transfer;

pub use audit::{AuditLog, AuditRecord};
pub use meeting::{downloadable_files, filename_from_location, DownloadOutcome, MeetingDownloader};
pub use state::RunSummary;
pub use transfer::{transfer_for, CurlTransfer, FileTransfer, HttpTransfer};
