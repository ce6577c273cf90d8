//! `list`: print the selected part of the catalog.

use std::io::Write;

use crate::api::RecordingsApi;
use crate::catalog::CatalogQuery;
use crate::commands::fetch_selected;
use crate::error::Result;
use crate::filter::MeetingFilter;
use crate::output::meeting_line;

/// Print one line per selected meeting and return how many were printed.
pub async fn list_records(
    api: &dyn RecordingsApi,
    query: CatalogQuery,
    filter: Option<&MeetingFilter>,
    out: &mut dyn Write,
) -> Result<usize> {
    let meetings = fetch_selected(api, query, filter).await?;

    for (idx, meeting) in meetings.iter().enumerate() {
        writeln!(out, "{}", meeting_line(idx + 1, meeting))?;
    }

    Ok(meetings.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{meeting, page, FakeApi};

    #[tokio::test]
    async fn test_list_filters_after_fetch() {
        let api = FakeApi::default();
        api.push_page(Ok(page(
            vec![
                meeting("a", "1", "Algebra", "2021-03-01T10:00:00Z"),
                meeting("b", "2", "Biology", "2021-03-02T10:00:00Z"),
            ],
            Some("next"),
        )));
        api.push_page(Ok(page(
            vec![meeting("c", "3", "Linear algebra", "2021-03-03T10:00:00Z")],
            None,
        )));

        let filter = MeetingFilter::topic_contains(["ALGEBRA"]);
        let mut out = Vec::new();
        let count = list_records(&api, CatalogQuery::Trash, Some(&filter), &mut out)
            .await
            .unwrap();

        assert_eq!(count, 2);
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  1 | MeetingID 1 | 2021-03-01 10:00:00+00:00 | Algebra");
        assert_eq!(lines[1], "  2 | MeetingID 3 | 2021-03-03 10:00:00+00:00 | Linear algebra");
    }
}
