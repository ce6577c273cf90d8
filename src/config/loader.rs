//! Configuration structures and loading logic.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};

use crate::api::auth::{TokenMinter, DEFAULT_TOKEN_TTL_SECONDS};
use crate::api::FileType;
use crate::config::modes::{MonthNames, TransferMethod};
use crate::error::{Error, Result};

/// Zoom v2 API base URL.
pub const DEFAULT_API_BASE: &str = "https://api.zoom.us/v2";

/// Main configuration structure.
///
/// Built once at startup and passed by reference to every component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// A credential that never shows up in logs or debug output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Secret(String);

impl Secret {
    /// The raw credential value.
    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Secret {
    fn from(value: &str) -> Self {
        Secret(value.to_string())
    }
}

impl From<String> for Secret {
    fn from(value: String) -> Self {
        Secret(value)
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            write!(f, "Secret(\"\")")
        } else {
            write!(f, "Secret(\"**********\")")
        }
    }
}

/// Account credentials configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Zoom account identifier. Informational; requests address the token's own account.
    #[serde(default)]
    pub account_id: String,

    /// API key, used as the token issuer.
    #[serde(default)]
    pub api_key: Secret,

    /// API secret, used to sign tokens.
    #[serde(default)]
    pub api_secret: Secret,
}

/// Behaviour options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base URL of the REST API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Whether to show per-file transfer progress.
    #[serde(default = "default_download_progress")]
    pub download_progress: bool,

    /// Recording file types eligible for download.
    #[serde(
        default = "default_downloadable_file_types",
        deserialize_with = "deserialize_file_types"
    )]
    pub downloadable_file_types: Vec<FileType>,

    /// Language of month names in directory paths.
    #[serde(default)]
    pub month_names: MonthNames,

    /// How recording bytes are transferred.
    #[serde(default)]
    pub transfer: TransferMethod,

    /// Lifetime of each minted token.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_seconds: u64,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            download_progress: default_download_progress(),
            downloadable_file_types: default_downloadable_file_types(),
            month_names: MonthNames::default(),
            transfer: TransferMethod::default(),
            token_ttl_seconds: default_token_ttl(),
        }
    }
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_download_progress() -> bool {
    true
}

fn default_downloadable_file_types() -> Vec<FileType> {
    vec![FileType::Mp4, FileType::M4a, FileType::Chat]
}

/// Parse file type names strictly; an unknown name is an error, not `FileType::Other`.
fn deserialize_file_types<'de, D>(deserializer: D) -> std::result::Result<Vec<FileType>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<String>::deserialize(deserializer)?
        .iter()
        .map(|name| name.parse::<FileType>().map_err(serde::de::Error::custom))
        .collect()
}

fn default_token_ttl() -> u64 {
    DEFAULT_TOKEN_TTL_SECONDS
}

/// Names of the credential files looked up in a secrets directory.
const SECRET_FILES: [&str; 3] = ["account_id", "api_key", "api_secret"];

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Default configuration file location.
    ///
    /// `config.toml` in the working directory wins over the platform config directory.
    pub fn default_path() -> PathBuf {
        let local = PathBuf::from("config.toml");
        if local.exists() {
            return local;
        }

        directories::ProjectDirs::from("", "", "zoom-pull")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or(local)
    }

    /// Read credentials from one-value-per-file secrets, as mounted by container runtimes.
    ///
    /// Missing files are skipped; values are trimmed.
    pub fn apply_secrets_dir(&mut self, dir: &Path) -> Result<()> {
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "Secrets directory not found: {}",
                dir.display()
            )));
        }

        for name in SECRET_FILES {
            let path = dir.join(name);
            let value = match fs::read_to_string(&path) {
                Ok(value) => value.trim().to_string(),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(Error::Io(e)),
            };

            tracing::debug!("Loaded secret '{}' from {}", name, dir.display());
            match name {
                "account_id" => self.account.account_id = value,
                "api_key" => self.account.api_key = Secret::from(value),
                "api_secret" => self.account.api_secret = Secret::from(value),
                _ => {}
            }
        }

        Ok(())
    }

    /// Build the token minter for the configured credentials.
    pub fn token_minter(&self) -> TokenMinter {
        TokenMinter::new(
            self.account.api_key.clone(),
            self.account.api_secret.clone(),
            self.options.token_ttl_seconds,
        )
    }

    /// Whether a recording file type is eligible for download.
    pub fn is_downloadable_type(&self, file_type: &FileType) -> bool {
        self.options.downloadable_file_types.contains(file_type)
    }
}
