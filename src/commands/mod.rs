//! Subcommand implementations.
//!
//! Each command fetches the catalog, narrows it with a [`MeetingFilter`], and
//! writes one report line per selected meeting. A failure for one meeting is
//! reported in its line and the run moves on; only catalog and setup failures
//! abort the command.
//!
//! [`MeetingFilter`]: crate::filter::MeetingFilter

pub mod download;
pub mod list;
pub mod restore;

pub use download::{download_records, DownloadRequest};
pub use list::list_records;
pub use restore::restore_trashed_records;

use crate::api::{Meeting, RecordingsApi};
use crate::catalog::{fetch_all_meetings, CatalogQuery};
use crate::error::Result;
use crate::filter::MeetingFilter;
use crate::output::create_spinner;

/// Fetch the catalog and keep the meetings the filter selects.
async fn fetch_selected(
    api: &dyn RecordingsApi,
    query: CatalogQuery,
    filter: Option<&MeetingFilter>,
) -> Result<Vec<Meeting>> {
    let spinner = create_spinner("Fetching recordings catalog...");
    let fetched = fetch_all_meetings(api, query).await;
    spinner.finish_and_clear();

    let all_meetings = fetched?;
    let total = all_meetings.len();

    let selected: Vec<Meeting> = match filter {
        Some(filter) => all_meetings
            .into_iter()
            .filter(|m| filter.evaluate(m))
            .collect(),
        None => all_meetings,
    };

    tracing::info!("Selected {} of {} meetings", selected.len(), total);
    Ok(selected)
}
