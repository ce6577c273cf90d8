//! Deterministic directory naming for downloaded meetings.
//!
//! A meeting lands in
//! `prefix / "<YYYY.MM> - <month>" / "<YYYY.MM.DD>" / "<topic> <id> <HH-MM-SS±ZZZZ>"`.
//! The layout doubles as the record of what was already downloaded, so it must
//! stay byte-for-byte stable across runs and releases.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Datelike, FixedOffset};

use crate::api::Meeting;
use crate::config::MonthNames;
use crate::error::{Error, Result};

/// Characters replaced by a space in the meeting directory name.
pub const REPLACED_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Replace every reserved character with a single space.
pub fn sanitize_path_component(name: &str) -> String {
    name.chars()
        .map(|c| if REPLACED_CHARS.contains(&c) { ' ' } else { c })
        .collect()
}

/// Validate a filename taken from a remote URL.
///
/// Returns an error if the name could escape the meeting directory.
pub fn validate_filename(name: &str) -> Result<String> {
    if name.is_empty() || name == "." || name == ".." {
        return Err(Error::InvalidFilename(format!(
            "Not a usable filename: '{}'",
            name
        )));
    }

    if name.contains('/') || name.contains('\\') {
        return Err(Error::InvalidFilename(format!(
            "Path separators not allowed in filename: '{}'",
            name
        )));
    }

    if name.contains('\0') {
        return Err(Error::InvalidFilename(format!(
            "Null bytes not allowed in filename: '{}'",
            name
        )));
    }

    Ok(name.to_string())
}

/// `YYYY.MM.DD` of a timestamp in its own offset.
pub fn format_date(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%Y.%m.%d").to_string()
}

/// `HH-MM-SS±ZZZZ` of a timestamp in its own offset.
pub fn format_time_with_offset(dt: &DateTime<FixedOffset>) -> String {
    dt.format("%H-%M-%S%z").to_string()
}

/// Maps meetings to their download directories.
#[derive(Debug, Clone)]
pub struct PathNamingScheme {
    prefix: PathBuf,
    month_names: MonthNames,
}

impl PathNamingScheme {
    pub fn new(prefix: impl Into<PathBuf>, month_names: MonthNames) -> Self {
        Self {
            prefix: prefix.into(),
            month_names,
        }
    }

    pub fn prefix(&self) -> &Path {
        &self.prefix
    }

    /// `"<YYYY.MM> - <month name>"`
    pub fn month_segment(&self, dt: &DateTime<FixedOffset>) -> String {
        format!(
            "{} - {}",
            dt.format("%Y.%m"),
            self.month_names.name(dt.month())
        )
    }

    /// `"<YYYY.MM.DD>"`
    pub fn day_segment(&self, dt: &DateTime<FixedOffset>) -> String {
        format_date(dt)
    }

    /// Sanitized `"<topic> <id> <HH-MM-SS±ZZZZ>"`.
    pub fn leaf_segment(&self, meeting: &Meeting) -> String {
        sanitize_path_component(&format!(
            "{} {} {}",
            meeting.topic,
            meeting.id,
            format_time_with_offset(&meeting.start_time)
        ))
    }

    /// Full directory path for a meeting.
    pub fn meeting_dir(&self, meeting: &Meeting) -> PathBuf {
        self.prefix
            .join(self.month_segment(&meeting.start_time))
            .join(self.day_segment(&meeting.start_time))
            .join(self.leaf_segment(meeting))
    }

    /// Find meetings whose directory is already taken by a different meeting earlier in
    /// the sequence.
    ///
    /// Returns a map from the later meeting's uuid to the uuid of the first owner.
    /// Repeated entries for the same uuid are not collisions.
    pub fn find_collisions<'a, I>(&self, meetings: I) -> HashMap<String, String>
    where
        I: IntoIterator<Item = &'a Meeting>,
    {
        let mut owners: HashMap<PathBuf, &str> = HashMap::new();
        let mut collisions = HashMap::new();

        for meeting in meetings {
            let dir = self.meeting_dir(meeting);
            match owners.get(&dir) {
                Some(owner) if *owner != meeting.uuid => {
                    tracing::warn!(
                        "Meetings {} and {} map to the same directory {}",
                        owner,
                        meeting.uuid,
                        dir.display()
                    );
                    collisions.insert(meeting.uuid.clone(), owner.to_string());
                }
                Some(_) => {}
                None => {
                    owners.insert(dir, &meeting.uuid);
                }
            }
        }

        collisions
    }
}
