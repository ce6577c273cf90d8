//! Command-line argument definitions using clap.

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, MonthNames, Secret, TransferMethod};
use crate::filter::FilterSelection;

/// Zoom cloud recordings puller.
#[derive(Parser, Debug)]
#[command(
    name = "zoom-pull",
    version,
    about = "List, download and trash Zoom cloud recordings",
    long_about = "A CLI tool to pull Zoom cloud recordings into a dated directory tree.\n\n\
                  Every meeting is downloaded at most once; each written file is appended \
                  to a tab-separated audit log."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory with `account_id`, `api_key` and `api_secret` files.
    #[arg(long, global = true, env = "LZP_SECRETS_DIR")]
    pub secrets_dir: Option<PathBuf>,

    /// Zoom account id.
    #[arg(long, global = true, env = "LZP_ACCOUNT_ID")]
    pub account_id: Option<String>,

    /// Zoom API key.
    #[arg(long, global = true, env = "LZP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Zoom API secret.
    #[arg(long, global = true, env = "LZP_API_SECRET", hide_env_values = true)]
    pub api_secret: Option<String>,

    /// Show per-file download progress (the default).
    #[arg(long, global = true, overrides_with = "no_download_progress")]
    pub download_progress: bool,

    /// Hide per-file download progress.
    #[arg(long, global = true, overrides_with = "download_progress")]
    pub no_download_progress: bool,

    /// Language of month directory names.
    #[arg(long, global = true, value_enum)]
    pub month_names: Option<MonthNamesArg>,

    /// How recording bytes are fetched.
    #[arg(long, global = true, value_enum)]
    pub transfer: Option<TransferArg>,

    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print meetings recorded in a date range.
    List {
        #[command(flatten)]
        range: DateRangeArgs,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Download recordings of the selected meetings.
    Download(DownloadArgs),

    /// Recover selected meetings from the trash.
    RestoreTrashed {
        #[command(flatten)]
        filters: FilterArgs,
    },
}

/// Inclusive `YYYY-MM-DD` bounds on the recording start date.
#[derive(ClapArgs, Debug, Clone)]
pub struct DateRangeArgs {
    #[arg(long)]
    pub from_date: String,

    #[arg(long)]
    pub to_date: String,
}

/// Meeting selection flags.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Comma separated meeting ids.
    #[arg(long, value_delimiter = ',')]
    pub meeting_ids: Option<Vec<String>>,

    /// Case-insensitive topic substring; repeat to match any of several.
    #[arg(long)]
    pub topic_contains: Vec<String>,

    /// Regular expression searched in the topic.
    #[arg(long)]
    pub topic_regex: Option<String>,

    /// Host email substring; repeat to match any of several.
    #[arg(long)]
    pub host_email_contains: Vec<String>,

    /// Regular expression searched in the host email.
    #[arg(long)]
    pub host_email_regex: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub range: DateRangeArgs,

    #[command(flatten)]
    pub filters: FilterArgs,

    /// Root of the dated directory tree.
    #[arg(long)]
    pub downloads_dir: PathBuf,

    /// Move each meeting to the trash once its files are on disk.
    ///
    /// Meetings without downloadable files, and meetings whose download failed, are left in place.
    #[arg(long)]
    pub trash_after_download: bool,

    /// Audit log of downloaded files.
    #[arg(long, default_value = "downloads.tsv")]
    pub csv_log: PathBuf,

    /// Directory the audit log paths are relative to (defaults to --downloads-dir).
    #[arg(long)]
    pub csv_paths_relative_to: Option<PathBuf>,
}

impl DownloadArgs {
    pub fn csv_root(&self) -> PathBuf {
        self.csv_paths_relative_to
            .clone()
            .unwrap_or_else(|| self.downloads_dir.clone())
    }
}

/// CLI month name argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MonthNamesArg {
    /// Russian nominative month names.
    Ru,
    /// English month names.
    En,
}

impl From<MonthNamesArg> for MonthNames {
    fn from(arg: MonthNamesArg) -> Self {
        match arg {
            MonthNamesArg::Ru => MonthNames::Russian,
            MonthNamesArg::En => MonthNames::English,
        }
    }
}

/// CLI transfer method argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TransferArg {
    /// Built-in HTTP client.
    Http,
    /// External `curl` binary.
    Curl,
}

impl From<TransferArg> for TransferMethod {
    fn from(arg: TransferArg) -> Self {
        match arg {
            TransferArg::Http => TransferMethod::Http,
            TransferArg::Curl => TransferMethod::Curl,
        }
    }
}

impl From<FilterArgs> for FilterSelection {
    fn from(args: FilterArgs) -> Self {
        FilterSelection {
            meeting_ids: args.meeting_ids,
            topic_contains: args.topic_contains,
            topic_regex: args.topic_regex,
            host_email_contains: args.host_email_contains,
            host_email_regex: args.host_email_regex,
        }
    }
}

impl Args {
    /// Configuration file to read: `--config` or the default location.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(&self, config: &mut Config) {
        if let Some(account_id) = &self.account_id {
            config.account.account_id = account_id.clone();
        }

        if let Some(api_key) = &self.api_key {
            config.account.api_key = Secret::from(api_key.as_str());
        }

        if let Some(api_secret) = &self.api_secret {
            config.account.api_secret = Secret::from(api_secret.as_str());
        }

        // Progress flags only override when given
        if self.download_progress {
            config.options.download_progress = true;
        }

        if self.no_download_progress {
            config.options.download_progress = false;
        }

        if let Some(month_names) = self.month_names {
            config.options.month_names = month_names.into();
        }

        if let Some(transfer) = self.transfer {
            config.options.transfer = transfer.into();
        }
    }
}
