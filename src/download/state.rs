//! Per-run statistics.

use crate::download::meeting::DownloadOutcome;

/// Counters for one `download` or `restore-trashed` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub meetings_selected: u64,
    pub meetings_fetched: u64,
    pub files_fetched: u64,
    pub already_downloaded: u64,
    pub without_files: u64,
    pub collisions: u64,
    pub lifecycle_changes: u64,
    pub failures: u64,
}

impl RunSummary {
    /// Count a download outcome.
    pub fn add_outcome(&mut self, outcome: DownloadOutcome) {
        match outcome {
            DownloadOutcome::NoDownloadableFiles => self.without_files += 1,
            DownloadOutcome::AlreadyDownloaded => self.already_downloaded += 1,
            DownloadOutcome::Fetched(n) => {
                self.meetings_fetched += 1;
                self.files_fetched += n as u64;
            }
        }
    }

    pub fn mark_selected(&mut self) {
        self.meetings_selected += 1;
    }

    pub fn mark_collision(&mut self) {
        self.collisions += 1;
    }

    pub fn mark_lifecycle_change(&mut self) {
        self.lifecycle_changes += 1;
    }

    pub fn mark_failed(&mut self) {
        self.failures += 1;
    }
}
