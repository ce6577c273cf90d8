//! Enumerated configuration options.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const RU_MONTHS: [&str; 12] = [
    "Январь",
    "Февраль",
    "Март",
    "Апрель",
    "Май",
    "Июнь",
    "Июль",
    "Август",
    "Сентябрь",
    "Октябрь",
    "Ноябрь",
    "Декабрь",
];

const EN_MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Language of the month name in the month directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MonthNames {
    #[default]
    #[serde(rename = "ru")]
    Russian,
    #[serde(rename = "en")]
    English,
}

impl MonthNames {
    /// Name of a month numbered from 1.
    pub fn name(self, month: u32) -> &'static str {
        let table = match self {
            MonthNames::Russian => &RU_MONTHS,
            MonthNames::English => &EN_MONTHS,
        };
        table[(month.clamp(1, 12) - 1) as usize]
    }
}

impl fmt::Display for MonthNames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthNames::Russian => write!(f, "ru"),
            MonthNames::English => write!(f, "en"),
        }
    }
}

impl FromStr for MonthNames {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ru" | "russian" => Ok(MonthNames::Russian),
            "en" | "english" => Ok(MonthNames::English),
            _ => Err(format!("Unknown month name language: {}", s)),
        }
    }
}

/// Mechanism used to move recording bytes to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferMethod {
    /// Stream with the built-in HTTP client.
    #[default]
    Http,
    /// Invoke the external `curl` binary.
    Curl,
}

impl fmt::Display for TransferMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferMethod::Http => write!(f, "http"),
            TransferMethod::Curl => write!(f, "curl"),
        }
    }
}

impl FromStr for TransferMethod {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "http" => Ok(TransferMethod::Http),
            "curl" => Ok(TransferMethod::Curl),
            _ => Err(format!("Unknown transfer method: {}", s)),
        }
    }
}
