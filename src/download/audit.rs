//! Append-only audit log of downloaded files.
//!
//! One tab-separated line per file actually written:
//! `meetingId\tmeetingUuid\tYYYY.MM.DD\tHH-MM-SS±ZZZZ\trelativePath`.

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::api::Meeting;
use crate::error::Result;
use crate::fs::{format_date, format_time_with_offset, relative_to};

/// One audit line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditRecord {
    pub meeting_id: String,
    pub meeting_uuid: String,
    pub date: String,
    pub time: String,
    pub relative_path: String,
}

impl AuditRecord {
    pub fn new(meeting: &Meeting, file_path: &Path, root: &Path) -> Self {
        Self {
            meeting_id: meeting.id.clone(),
            meeting_uuid: meeting.uuid.clone(),
            date: format_date(&meeting.start_time),
            time: format_time_with_offset(&meeting.start_time),
            relative_path: relative_to(file_path, root).display().to_string(),
        }
    }

    /// The record as a single line, newline included.
    pub fn to_line(&self) -> String {
        let fields = [
            &self.meeting_id,
            &self.meeting_uuid,
            &self.date,
            &self.time,
            &self.relative_path,
        ];
        let cleaned: Vec<String> = fields
            .iter()
            .map(|f| f.replace(['\t', '\n', '\r'], " "))
            .collect();
        format!("{}\n", cleaned.join("\t"))
    }
}

/// Open handle on the audit log. Every append is flushed before returning.
pub struct AuditLog {
    file: File,
    path: PathBuf,
    root: PathBuf,
}

impl AuditLog {
    /// Open (or create) the log for appending; recorded paths are relative to `root`.
    pub async fn open(path: &Path, root: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
            root: root.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Record a file written for `meeting`.
    pub async fn record(&mut self, meeting: &Meeting, file_path: &Path) -> Result<AuditRecord> {
        let record = AuditRecord::new(meeting, file_path, &self.root);
        self.append(&record).await?;
        Ok(record)
    }

    pub async fn append(&mut self, record: &AuditRecord) -> Result<()> {
        self.file.write_all(record.to_line().as_bytes()).await?;
        self.file.flush().await?;
        Ok(())
    }
}
