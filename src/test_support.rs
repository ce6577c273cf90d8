//! Shared fixtures and in-memory fakes for unit tests.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::DateTime;

use crate::api::{
    ApiReply, FileType, ListRecordingsRequest, Meeting, RecordingFile, RecordingsApi,
    RecordingsPage, RedirectReply,
};
use crate::download::FileTransfer;
use crate::error::{Error, Result};

pub fn meeting(uuid: &str, id: &str, topic: &str, start_time: &str) -> Meeting {
    Meeting {
        uuid: uuid.to_string(),
        id: id.to_string(),
        account_id: None,
        host_id: None,
        host_email: String::new(),
        topic: topic.to_string(),
        start_time: DateTime::parse_from_rfc3339(start_time).unwrap(),
        duration: None,
        total_size: None,
        meeting_type: None,
        recording_count: None,
        recording_files: Vec::new(),
    }
}

pub fn recording_file(file_type: FileType, status: &str, download_url: Option<&str>) -> RecordingFile {
    RecordingFile {
        id: None,
        meeting_id: None,
        recording_start: None,
        recording_end: None,
        file_type: Some(file_type),
        file_size: None,
        play_url: None,
        download_url: download_url.map(str::to_string),
        status: Some(status.to_string()),
        recording_type: None,
    }
}

pub fn page(meetings: Vec<Meeting>, next_page_token: Option<&str>) -> RecordingsPage {
    RecordingsPage {
        from_date: None,
        to_date: None,
        page_size: 100,
        total_records: meetings.len() as u64,
        next_page_token: next_page_token.map(str::to_string),
        meetings,
    }
}

/// Scripted remote API that records every call.
#[derive(Default)]
pub struct FakeApi {
    pages: Mutex<VecDeque<Result<RecordingsPage>>>,
    list_requests: Mutex<Vec<ListRecordingsRequest>>,
    redirects: Mutex<HashMap<String, RedirectReply>>,
    download_requests: Mutex<Vec<String>>,
    lifecycle_replies: Mutex<VecDeque<ApiReply>>,
    lifecycle_requests: Mutex<Vec<(String, String)>>,
}

impl FakeApi {
    pub fn push_page(&self, page: Result<RecordingsPage>) {
        self.pages.lock().unwrap().push_back(page);
    }

    pub fn push_redirect(&self, url: &str, status: u16, location: Option<&str>) {
        self.redirects.lock().unwrap().insert(
            url.to_string(),
            RedirectReply {
                status,
                location: location.map(str::to_string),
                body: String::new(),
            },
        );
    }

    pub fn push_lifecycle_reply(&self, status: u16, body: &str) {
        self.lifecycle_replies.lock().unwrap().push_back(ApiReply {
            status,
            body: body.to_string(),
        });
    }

    pub fn list_requests(&self) -> Vec<ListRecordingsRequest> {
        self.list_requests.lock().unwrap().clone()
    }

    pub fn download_requests(&self) -> Vec<String> {
        self.download_requests.lock().unwrap().clone()
    }

    /// `(action, uuid)` pairs in call order.
    pub fn lifecycle_requests(&self) -> Vec<(String, String)> {
        self.lifecycle_requests.lock().unwrap().clone()
    }

    fn lifecycle(&self, action: &str, uuid: &str) -> Result<ApiReply> {
        self.lifecycle_requests
            .lock()
            .unwrap()
            .push((action.to_string(), uuid.to_string()));
        self.lifecycle_replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Transfer(format!("unexpected {} call", action)))
    }
}

#[async_trait]
impl RecordingsApi for FakeApi {
    async fn list_recordings(&self, request: &ListRecordingsRequest) -> Result<RecordingsPage> {
        self.list_requests.lock().unwrap().push(request.clone());
        self.pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(page(Vec::new(), None)))
    }

    async fn request_download(&self, download_url: &str) -> Result<RedirectReply> {
        self.download_requests
            .lock()
            .unwrap()
            .push(download_url.to_string());
        Ok(self
            .redirects
            .lock()
            .unwrap()
            .get(download_url)
            .cloned()
            .unwrap_or(RedirectReply {
                status: 404,
                location: None,
                body: "not found".to_string(),
            }))
    }

    async fn trash_recordings(&self, meeting_uuid: &str) -> Result<ApiReply> {
        self.lifecycle("trash", meeting_uuid)
    }

    async fn recover_recordings(&self, meeting_uuid: &str) -> Result<ApiReply> {
        self.lifecycle("recover", meeting_uuid)
    }
}

/// Transfer that writes the source URL as file content.
#[derive(Default)]
pub struct FakeTransfer {
    fail_on: Option<String>,
    transfers: Mutex<Vec<(String, PathBuf)>>,
}

impl FakeTransfer {
    pub fn failing_on(filename: &str) -> Self {
        Self {
            fail_on: Some(filename.to_string()),
            ..Default::default()
        }
    }

    pub fn transfers(&self) -> Vec<(String, PathBuf)> {
        self.transfers.lock().unwrap().clone()
    }
}

#[async_trait]
impl FileTransfer for FakeTransfer {
    async fn transfer(&self, url: &str, dest: &Path) -> Result<u64> {
        let name = dest.file_name().and_then(|n| n.to_str()).unwrap_or("");
        if self.fail_on.as_deref() == Some(name) {
            return Err(Error::Transfer(format!("refusing {}", name)));
        }

        self.transfers
            .lock()
            .unwrap()
            .push((url.to_string(), dest.to_path_buf()));
        std::fs::write(dest, url.as_bytes())?;
        Ok(url.len() as u64)
    }
}
