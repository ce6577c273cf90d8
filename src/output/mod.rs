//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console messages
//! - Per-meeting report lines
//! - Progress bars
//! - Run statistics

pub mod console;
pub mod progress;
pub mod report;
pub mod stats;

pub use self::console::{print_error, print_info, print_run_settings, print_warning};
pub use progress::{create_download_bar, create_spinner};
pub use report::{error_status, meeting_line, status_line};
pub use stats::print_run_summary;
