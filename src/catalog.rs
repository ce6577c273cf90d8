//! Paginated retrieval of the recordings catalog.

use chrono::NaiveDate;

use crate::api::{ListRecordingsRequest, Meeting, RecordingsApi, PAGE_SIZE};
use crate::error::Result;

/// Value of `trash_type` selecting meeting recordings.
const TRASH_TYPE_MEETING_RECORDINGS: &str = "meeting_recordings";

/// Which part of the catalog to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogQuery {
    /// Recordings started within an inclusive date range.
    DateRange { from: NaiveDate, to: NaiveDate },
    /// Recordings currently in the trash.
    Trash,
}

impl CatalogQuery {
    fn request(&self, cursor: Option<String>) -> ListRecordingsRequest {
        let mut request = ListRecordingsRequest {
            page_size: Some(PAGE_SIZE),
            next_page_token: cursor,
            ..Default::default()
        };

        match *self {
            CatalogQuery::DateRange { from, to } => {
                request.from_date = Some(from);
                request.to_date = Some(to);
            }
            CatalogQuery::Trash => {
                request.trash = Some(true);
                request.trash_type = Some(TRASH_TYPE_MEETING_RECORDINGS);
            }
        }

        request
    }
}

/// Walks the listing one page at a time. Single use: once exhausted it stays exhausted.
pub struct CatalogCursor<'a> {
    api: &'a dyn RecordingsApi,
    query: CatalogQuery,
    cursor: Option<String>,
    exhausted: bool,
    pages_fetched: u32,
}

impl<'a> CatalogCursor<'a> {
    pub fn new(api: &'a dyn RecordingsApi, query: CatalogQuery) -> Self {
        Self {
            api,
            query,
            cursor: None,
            exhausted: false,
            pages_fetched: 0,
        }
    }

    /// Fetch the next page, or `None` once the provider reported no continuation.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Meeting>>> {
        if self.exhausted {
            return Ok(None);
        }

        let request = self.query.request(self.cursor.take());
        let page = self.api.list_recordings(&request).await?;
        self.pages_fetched += 1;

        tracing::debug!("Page size: {}", page.page_size);
        tracing::info!("Total records: {}", page.total_records);
        if let (Some(from), Some(to)) = (page.from_date, page.to_date) {
            tracing::debug!("Listing range: {} .. {}", from, to);
        }

        match page.continuation() {
            Some(token) => self.cursor = Some(token.to_string()),
            None => self.exhausted = true,
        }

        Ok(Some(page.meetings))
    }

    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }
}

/// Fetch the full catalog for a query, in provider order.
///
/// Any failing page fails the whole fetch; no partial catalog is returned.
pub async fn fetch_all_meetings(
    api: &dyn RecordingsApi,
    query: CatalogQuery,
) -> Result<Vec<Meeting>> {
    let mut cursor = CatalogCursor::new(api, query);
    let mut meetings = Vec::new();

    while let Some(batch) = cursor.next_page().await? {
        meetings.extend(batch);
    }

    tracing::debug!(
        "Fetched {} meetings in {} pages",
        meetings.len(),
        cursor.pages_fetched()
    );

    Ok(meetings)
}
