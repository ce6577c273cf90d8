//! Error types for the zoom-pull application.

use thiserror::Error;

/// Main error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration value for '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Missing required configuration: {0}")]
    MissingConfig(String),

    // Command-line usage errors
    #[error("Usage error: {0}")]
    Usage(String),

    // Remote API errors
    #[error("Bad response {status}: {body}")]
    RemoteApi { status: u16, body: String },

    #[error("API error for uuid {uuid}, details: {details}")]
    RemoteApiEmbedded { uuid: String, details: String },

    #[error("Expected redirect for {url}, got HTTP {status}")]
    RedirectExpected { url: String, status: u16 },

    #[error("Token minting failed: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    // Download errors
    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("Directory {path} is shared with meeting {other_uuid}")]
    PathCollision { path: String, other_uuid: String },

    // File system errors
    #[error("Invalid filename (path traversal attempt): {0}")]
    InvalidFilename(String),

    // IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    // Parsing errors
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid regular expression: {0}")]
    Regex(#[from] regex::Error),

    #[error("Invalid date: {0}")]
    DateParse(#[from] chrono::ParseError),
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const USAGE_ERROR: i32 = 1;
    pub const API_ERROR: i32 = 2;
    pub const CONFIG_ERROR: i32 = 3;
    pub const DOWNLOAD_ERROR: i32 = 4;
    pub const UNEXPECTED_ERROR: i32 = 5;
}
