//! `restore-trashed`: recover selected meetings from the trash.

use std::io::Write;

use crate::api::RecordingsApi;
use crate::catalog::CatalogQuery;
use crate::commands::fetch_selected;
use crate::download::RunSummary;
use crate::error::Result;
use crate::filter::MeetingFilter;
use crate::lifecycle::restore_meeting;
use crate::output::{error_status, status_line};

/// Restore every trashed meeting the filter selects.
pub async fn restore_trashed_records(
    api: &dyn RecordingsApi,
    filter: &MeetingFilter,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let meetings = fetch_selected(api, CatalogQuery::Trash, Some(filter)).await?;
    let mut summary = RunSummary::default();

    for (idx, meeting) in meetings.iter().enumerate() {
        summary.mark_selected();

        let status = match restore_meeting(api, meeting).await {
            Ok(outcome) => {
                summary.mark_lifecycle_change();
                outcome.to_string()
            }
            Err(e) => {
                tracing::error!("Restoring {} failed: {}", meeting.uuid, e);
                summary.mark_failed();
                error_status(&e)
            }
        };

        writeln!(out, "{}", status_line(idx + 1, meeting, &status))?;
    }

    Ok(summary)
}
