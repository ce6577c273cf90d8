//! API request and response type definitions.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Kind of artifact a recording file holds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FileType {
    /// Video with audio.
    Mp4,
    /// Audio only.
    M4a,
    /// Timestamps of the active speaker.
    Timeline,
    /// Audio transcript.
    Transcript,
    /// In-meeting chat.
    Chat,
    /// Closed captions.
    Cc,
    /// Poll results.
    Csv,
    #[serde(other)]
    Other,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Mp4 => write!(f, "MP4"),
            FileType::M4a => write!(f, "M4A"),
            FileType::Timeline => write!(f, "TIMELINE"),
            FileType::Transcript => write!(f, "TRANSCRIPT"),
            FileType::Chat => write!(f, "CHAT"),
            FileType::Cc => write!(f, "CC"),
            FileType::Csv => write!(f, "CSV"),
            FileType::Other => write!(f, "OTHER"),
        }
    }
}

impl FromStr for FileType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "MP4" | "VIDEO" => Ok(FileType::Mp4),
            "M4A" | "AUDIO" => Ok(FileType::M4a),
            "TIMELINE" => Ok(FileType::Timeline),
            "TRANSCRIPT" => Ok(FileType::Transcript),
            "CHAT" => Ok(FileType::Chat),
            "CC" | "CAPTIONS" => Ok(FileType::Cc),
            "CSV" | "SUMMARY-CSV" => Ok(FileType::Csv),
            _ => Err(format!("Unknown recording file type: {}", s)),
        }
    }
}

/// One artifact attached to a recorded meeting.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingFile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub meeting_id: Option<String>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub recording_start: Option<DateTime<FixedOffset>>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub recording_end: Option<DateTime<FixedOffset>>,

    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub file_type: Option<FileType>,
    #[serde(default)]
    pub file_size: Option<u64>,
    #[serde(default)]
    pub play_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,

    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub recording_type: Option<String>,
}

impl RecordingFile {
    /// Whether the provider has finished processing this file.
    pub fn is_completed(&self) -> bool {
        self.status.as_deref() == Some("completed")
    }
}

/// One recorded conferencing session.
#[derive(Debug, Clone, Deserialize)]
pub struct Meeting {
    pub uuid: String,
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub account_id: Option<String>,

    #[serde(default)]
    pub host_id: Option<String>,
    #[serde(default)]
    pub host_email: String,
    #[serde(default)]
    pub topic: String,

    pub start_time: DateTime<FixedOffset>,
    #[serde(default)]
    pub duration: Option<i64>,

    #[serde(default)]
    pub total_size: Option<u64>,
    #[serde(default, rename = "type")]
    pub meeting_type: Option<i64>,
    #[serde(default)]
    pub recording_count: Option<u64>,
    #[serde(default)]
    pub recording_files: Vec<RecordingFile>,
}

/// Query parameters for `GET /accounts/me/recordings`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ListRecordingsRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    #[serde(rename = "from", skip_serializing_if = "Option::is_none")]
    pub from_date: Option<NaiveDate>,
    #[serde(rename = "to", skip_serializing_if = "Option::is_none")]
    pub to_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trash: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trash_type: Option<&'static str>,
}

/// One page of the recordings listing.
#[derive(Debug, Clone, Deserialize)]
pub struct RecordingsPage {
    #[serde(default, rename = "from")]
    pub from_date: Option<NaiveDate>,
    #[serde(default, rename = "to")]
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub page_size: u32,
    #[serde(default)]
    pub total_records: u64,
    #[serde(default)]
    pub next_page_token: Option<String>,
    #[serde(default)]
    pub meetings: Vec<Meeting>,
}

impl RecordingsPage {
    /// The continuation cursor, if the listing has more pages.
    pub fn continuation(&self) -> Option<&str> {
        self.next_page_token.as_deref().filter(|t| !t.is_empty())
    }
}

/// Error body the API sends alongside some non-204 answers.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Raw status and body of an API call whose meaning the caller decides.
#[derive(Debug, Clone)]
pub struct ApiReply {
    pub status: u16,
    pub body: String,
}

/// Answer to a signed download URL request made with redirects disabled.
#[derive(Debug, Clone)]
pub struct RedirectReply {
    pub status: u16,
    pub location: Option<String>,
    pub body: String,
}

fn empty_string_as_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    match value {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(serde_json::Value::String(s)) if s.is_empty() => Ok(None),
        Some(v) => serde_json::from_value(v)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {}",
            other
        ))),
    }
}
