//! Exactly-once download of one meeting's recordings.

use std::fmt;
use std::path::{Path, PathBuf};

use url::Url;

use crate::api::{Meeting, RecordingFile, RecordingsApi};
use crate::config::Config;
use crate::download::audit::AuditLog;
use crate::download::transfer::FileTransfer;
use crate::error::{Error, Result};
use crate::fs::{claim_dir, validate_filename, ClaimOutcome, PathNamingScheme};

/// What happened to a meeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// Nothing eligible; the filesystem was not touched.
    NoDownloadableFiles,
    /// The meeting directory already existed; nothing was fetched.
    AlreadyDownloaded,
    /// The directory was claimed and this many files were written.
    Fetched(usize),
}

impl DownloadOutcome {
    /// Whether the meeting's recordings are on local disk after this outcome.
    pub fn is_on_disk(&self) -> bool {
        matches!(
            self,
            DownloadOutcome::AlreadyDownloaded | DownloadOutcome::Fetched(_)
        )
    }
}

impl fmt::Display for DownloadOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadOutcome::NoDownloadableFiles => write!(f, "No downloadable files"),
            DownloadOutcome::AlreadyDownloaded => write!(f, "Already downloaded"),
            DownloadOutcome::Fetched(n) => write!(f, "Fetched {} files", n),
        }
    }
}

/// Recording files of a meeting worth fetching, paired with their signed URL.
pub fn downloadable_files<'m>(
    config: &Config,
    meeting: &'m Meeting,
) -> Vec<(&'m RecordingFile, &'m str)> {
    meeting
        .recording_files
        .iter()
        .filter(|f| {
            f.file_type
                .as_ref()
                .is_some_and(|t| config.is_downloadable_type(t))
        })
        .filter(|f| f.is_completed())
        .filter_map(|f| match f.download_url.as_deref() {
            Some(url) if !url.is_empty() => Some((f, url)),
            _ => None,
        })
        .collect()
}

/// Basename of the redirect target's path, resolved against the signed URL.
pub fn filename_from_location(download_url: &str, location: &str) -> Result<String> {
    let target = match Url::parse(location) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse(download_url)?.join(location)?,
        Err(e) => return Err(e.into()),
    };

    let name = target
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");
    validate_filename(name)
}

/// Downloads meetings into a naming scheme, recording each written file.
pub struct MeetingDownloader<'a> {
    api: &'a dyn RecordingsApi,
    transfer: &'a dyn FileTransfer,
    naming: &'a PathNamingScheme,
    config: &'a Config,
    audit: &'a mut AuditLog,
}

impl<'a> MeetingDownloader<'a> {
    pub fn new(
        api: &'a dyn RecordingsApi,
        transfer: &'a dyn FileTransfer,
        naming: &'a PathNamingScheme,
        config: &'a Config,
        audit: &'a mut AuditLog,
    ) -> Self {
        Self {
            api,
            transfer,
            naming,
            config,
            audit,
        }
    }

    /// Download every eligible file of a meeting, unless its directory already exists.
    ///
    /// A failure mid-way leaves the directory with the files written so far; later
    /// runs report the meeting as already downloaded.
    pub async fn download_one(&mut self, meeting: &Meeting) -> Result<DownloadOutcome> {
        let files = downloadable_files(self.config, meeting);
        if files.is_empty() {
            return Ok(DownloadOutcome::NoDownloadableFiles);
        }

        let subdir = self.naming.meeting_dir(meeting);
        tracing::debug!("Subdir: {}", subdir.display());

        let dir = match claim_dir(&subdir).await? {
            ClaimOutcome::Claimed(dir) => dir,
            ClaimOutcome::AlreadyClaimed => return Ok(DownloadOutcome::AlreadyDownloaded),
        };

        for (file, url) in &files {
            let written = self.download_file(meeting, &dir, file, url).await?;
            self.audit.record(meeting, &written).await?;
        }

        Ok(DownloadOutcome::Fetched(files.len()))
    }

    async fn download_file(
        &self,
        meeting: &Meeting,
        dir: &Path,
        file: &RecordingFile,
        download_url: &str,
    ) -> Result<PathBuf> {
        let reply = self.api.request_download(download_url).await?;

        let location = match reply.location {
            Some(location) if (300..400).contains(&reply.status) => location,
            _ => {
                tracing::error!(
                    "Expected redirect for {}: {} {}",
                    download_url,
                    reply.status,
                    reply.body
                );
                return Err(Error::RedirectExpected {
                    url: download_url.to_string(),
                    status: reply.status,
                });
            }
        };

        let filename = filename_from_location(download_url, &location)?;
        tracing::debug!("Filename: {}", filename);

        let dest = dir.join(&filename);
        tracing::info!(
            "Downloading {} / {} ({})",
            meeting.id,
            filename,
            file.file_type
                .as_ref()
                .map(|t| t.to_string())
                .unwrap_or_default()
        );

        let bytes = self.transfer.transfer(&location, &dest).await?;
        tracing::debug!("Wrote {} bytes to {}", bytes, dest.display());

        Ok(dest)
    }
}
