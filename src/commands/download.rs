//! `download`: fetch selected meetings into the dated directory layout.

use std::io::Write;
use std::path::PathBuf;

use crate::api::{Meeting, RecordingsApi};
use crate::catalog::CatalogQuery;
use crate::commands::fetch_selected;
use crate::config::Config;
use crate::download::{AuditLog, DownloadOutcome, FileTransfer, MeetingDownloader, RunSummary};
use crate::error::{Error, Result};
use crate::filter::MeetingFilter;
use crate::fs::PathNamingScheme;
use crate::lifecycle::trash_meeting;
use crate::output::{error_status, status_line};

/// Everything a `download` run needs besides its collaborators.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub query: CatalogQuery,
    pub filter: MeetingFilter,
    pub downloads_dir: PathBuf,
    pub trash_after_download: bool,
    pub csv_log_path: PathBuf,
    pub csv_paths_relative_to: PathBuf,
}

/// Download every selected meeting, optionally trashing it afterwards.
pub async fn download_records(
    api: &dyn RecordingsApi,
    transfer: &dyn FileTransfer,
    config: &Config,
    request: &DownloadRequest,
    out: &mut dyn Write,
) -> Result<RunSummary> {
    let meetings = fetch_selected(api, request.query, Some(&request.filter)).await?;

    let naming = PathNamingScheme::new(&request.downloads_dir, config.options.month_names);
    let collisions = naming.find_collisions(&meetings);

    let mut audit = AuditLog::open(&request.csv_log_path, &request.csv_paths_relative_to).await?;
    tracing::debug!("Audit log: {}", audit.path().display());

    let mut downloader = MeetingDownloader::new(api, transfer, &naming, config, &mut audit);
    let mut summary = RunSummary::default();

    for (idx, meeting) in meetings.iter().enumerate() {
        summary.mark_selected();

        let status = match collisions.get(&meeting.uuid) {
            Some(owner) => {
                summary.mark_collision();
                let err = Error::PathCollision {
                    path: naming.meeting_dir(meeting).display().to_string(),
                    other_uuid: owner.clone(),
                };
                format!("Skipped: {}", err)
            }
            None => {
                let outcome = downloader.download_one(meeting).await;
                settle(api, meeting, outcome, request.trash_after_download, &mut summary).await
            }
        };

        writeln!(out, "{}", status_line(idx + 1, meeting, &status))?;
    }

    Ok(summary)
}

/// Turn a download result into a status, trashing the meeting when asked.
async fn settle(
    api: &dyn RecordingsApi,
    meeting: &Meeting,
    outcome: Result<DownloadOutcome>,
    trash_after_download: bool,
    summary: &mut RunSummary,
) -> String {
    let outcome = match outcome {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Downloading {} failed: {}", meeting.uuid, e);
            summary.mark_failed();
            return error_status(&e);
        }
    };

    summary.add_outcome(outcome);
    let mut status = outcome.to_string();

    if trash_after_download && outcome.is_on_disk() {
        let trashed = match trash_meeting(api, meeting).await {
            Ok(lifecycle) => {
                summary.mark_lifecycle_change();
                lifecycle.to_string()
            }
            Err(e) => {
                tracing::error!("Trashing {} failed: {}", meeting.uuid, e);
                summary.mark_failed();
                error_status(&e)
            }
        };
        status.push_str(" / ");
        status.push_str(&trashed);
    }

    status
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FileType;
    use crate::test_support::{meeting, page, recording_file, FakeApi, FakeTransfer};
    use chrono::NaiveDate;

    struct Fixture {
        _root: tempfile::TempDir,
        request: DownloadRequest,
    }

    fn fixture(filter: MeetingFilter, trash_after_download: bool) -> Fixture {
        let root = tempfile::tempdir().unwrap();
        let downloads_dir = root.path().join("downloads");
        let request = DownloadRequest {
            query: CatalogQuery::DateRange {
                from: NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
                to: NaiveDate::from_ymd_opt(2021, 3, 31).unwrap(),
            },
            filter,
            csv_log_path: root.path().join("log").join("downloads.tsv"),
            csv_paths_relative_to: root.path().to_path_buf(),
            downloads_dir,
            trash_after_download,
        };
        Fixture {
            _root: root,
            request,
        }
    }

    fn with_video(uuid: &str, id: &str, topic: &str, start: &str) -> Meeting {
        let mut m = meeting(uuid, id, topic, start);
        m.recording_files = vec![recording_file(
            FileType::Mp4,
            "completed",
            Some(&format!("https://zoom.test/rec/{}", id)),
        )];
        m
    }

    fn redirect(api: &FakeApi, id: &str) {
        api.push_redirect(
            &format!("https://zoom.test/rec/{}", id),
            302,
            Some(&format!("https://storage.test/{}.mp4", id)),
        );
    }

    fn lines(out: Vec<u8>) -> Vec<String> {
        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn test_download_reports_each_selected_meeting() {
        let fx = fixture(MeetingFilter::id_in(["1", "2", "3"]), false);
        let api = FakeApi::default();
        let transfer = FakeTransfer::default();
        let no_files = meeting("c", "3", "Empty", "2021-03-03T10:00:00Z");
        api.push_page(Ok(page(
            vec![
                with_video("a", "1", "One", "2021-03-01T10:00:00Z"),
                with_video("b", "2", "Two", "2021-03-02T10:00:00Z"),
                no_files,
                with_video("d", "4", "Other", "2021-03-04T10:00:00Z"),
            ],
            None,
        )));
        redirect(&api, "1");
        api.push_redirect("https://zoom.test/rec/2", 200, None);

        let mut out = Vec::new();
        let summary = download_records(&api, &transfer, &Config::default(), &fx.request, &mut out)
            .await
            .unwrap();

        let lines = lines(out);
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("| One | Fetched 1 files"));
        assert!(lines[1].ends_with(
            "| Two | Unhandled exception: Expected redirect for https://zoom.test/rec/2, got HTTP 200"
        ));
        assert!(lines[2].ends_with("| Empty | No downloadable files"));

        assert_eq!(summary.meetings_selected, 3);
        assert_eq!(summary.meetings_fetched, 1);
        assert_eq!(summary.without_files, 1);
        assert_eq!(summary.failures, 1);

        let log = std::fs::read_to_string(&fx.request.csv_log_path).unwrap();
        assert_eq!(log.lines().count(), 1);
        assert!(log.lines().next().unwrap().ends_with("/1.mp4"));
        assert!(log.contains("\tdownloads/"));
    }

    #[tokio::test]
    async fn test_trash_only_after_files_are_on_disk() {
        let fx = fixture(MeetingFilter::topic_contains(["lecture"]), true);
        let api = FakeApi::default();
        let transfer = FakeTransfer::default();
        api.push_page(Ok(page(
            vec![
                with_video("a", "1", "Lecture 1", "2021-03-01T10:00:00Z"),
                meeting("b", "2", "Lecture 2", "2021-03-02T10:00:00Z"),
            ],
            None,
        )));
        redirect(&api, "1");
        api.push_lifecycle_reply(204, "");

        let mut out = Vec::new();
        let summary = download_records(&api, &transfer, &Config::default(), &fx.request, &mut out)
            .await
            .unwrap();

        let lines = lines(out);
        assert!(lines[0].ends_with("| Fetched 1 files / Trashed"));
        assert!(lines[1].ends_with("| No downloadable files"));
        assert_eq!(api.lifecycle_requests(), [("trash".to_string(), "a".to_string())]);
        assert_eq!(summary.lifecycle_changes, 1);
    }

    #[tokio::test]
    async fn test_second_run_trashes_already_downloaded() {
        let fx = fixture(MeetingFilter::id_in(["1"]), false);
        let api = FakeApi::default();
        let transfer = FakeTransfer::default();
        let m = with_video("a", "1", "One", "2021-03-01T10:00:00Z");
        api.push_page(Ok(page(vec![m.clone()], None)));
        api.push_page(Ok(page(vec![m], None)));
        redirect(&api, "1");
        api.push_lifecycle_reply(200, r#"{"code": 3301, "message": "gone"}"#);

        let mut out = Vec::new();
        download_records(&api, &transfer, &Config::default(), &fx.request, &mut out)
            .await
            .unwrap();

        let mut request = fx.request.clone();
        request.trash_after_download = true;
        let mut out = Vec::new();
        let summary = download_records(&api, &transfer, &Config::default(), &request, &mut out)
            .await
            .unwrap();

        let lines = lines(out);
        assert!(lines[0].ends_with(
            "| Already downloaded / Unhandled exception: API error for uuid a, details: gone (code 3301)"
        ));
        assert_eq!(summary.already_downloaded, 1);
        assert_eq!(summary.failures, 1);
        assert_eq!(transfer.transfers().len(), 1);
    }

    #[tokio::test]
    async fn test_colliding_meeting_is_skipped() {
        let fx = fixture(MeetingFilter::topic_contains(["same"]), false);
        let api = FakeApi::default();
        let transfer = FakeTransfer::default();
        api.push_page(Ok(page(
            vec![
                with_video("first", "1", "Same", "2021-03-01T10:00:00Z"),
                with_video("second", "1", "Same", "2021-03-01T10:00:00Z"),
            ],
            None,
        )));
        redirect(&api, "1");

        let mut out = Vec::new();
        let summary = download_records(&api, &transfer, &Config::default(), &fx.request, &mut out)
            .await
            .unwrap();

        let lines = lines(out);
        assert!(lines[0].ends_with("| Fetched 1 files"));
        assert!(lines[1].contains("| Skipped: Directory "));
        assert!(lines[1].ends_with("is shared with meeting first"));
        assert_eq!(summary.collisions, 1);
        assert_eq!(api.download_requests().len(), 1);
    }

    #[tokio::test]
    async fn test_catalog_failure_aborts_before_writing() {
        let fx = fixture(MeetingFilter::id_in(["1"]), false);
        let api = FakeApi::default();
        let transfer = FakeTransfer::default();
        api.push_page(Ok(page(Vec::new(), Some("next"))));
        api.push_page(Err(Error::RemoteApi {
            status: 500,
            body: "boom".into(),
        }));

        let mut out = Vec::new();
        let result = download_records(&api, &transfer, &Config::default(), &fx.request, &mut out).await;

        assert!(matches!(result, Err(Error::RemoteApi { status: 500, .. })));
        assert!(out.is_empty());
        assert!(!fx.request.csv_log_path.exists());
    }
}
