//! Configuration and argument validation logic.

use chrono::NaiveDate;

use crate::api::FileType;
use crate::config::loader::{Config, Secret};
use crate::error::{Error, Result};

/// Date format accepted for `--from-date` / `--to-date`.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_secret("api_key", &config.account.api_key)?;
    validate_secret("api_secret", &config.account.api_secret)?;

    if config.options.downloadable_file_types.is_empty() {
        return Err(Error::ConfigValidation {
            field: "downloadable_file_types".to_string(),
            message: "At least one recording file type must be downloadable".to_string(),
        });
    }

    if let Some(unknown) = config
        .options
        .downloadable_file_types
        .iter()
        .find(|t| **t == FileType::Other)
    {
        return Err(Error::ConfigValidation {
            field: "downloadable_file_types".to_string(),
            message: format!("Unsupported recording file type: {}", unknown),
        });
    }

    if config.options.token_ttl_seconds == 0 {
        return Err(Error::ConfigValidation {
            field: "token_ttl_seconds".to_string(),
            message: "Token lifetime must be at least one second".to_string(),
        });
    }

    url::Url::parse(&config.options.api_base_url)?;

    Ok(())
}

/// Validate a credential is present and not a placeholder.
pub fn validate_secret(field: &str, secret: &Secret) -> Result<()> {
    if secret.is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }

    let lower = secret.expose().to_lowercase();
    if lower.contains("replaceme") || lower.contains("your_") {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: format!("{} appears to be a placeholder", field),
        });
    }

    Ok(())
}

/// Parse a `YYYY-MM-DD` date argument.
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    Ok(NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)?)
}

/// Parse an inclusive date range, rejecting reversed bounds.
pub fn parse_date_range(from: &str, to: &str) -> Result<(NaiveDate, NaiveDate)> {
    let from_date = parse_date(from)?;
    let to_date = parse_date(to)?;

    if from_date > to_date {
        return Err(Error::Usage(format!(
            "--from-date {} is after --to-date {}",
            from_date, to_date
        )));
    }

    Ok((from_date, to_date))
}
