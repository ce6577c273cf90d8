//! Configuration module for zoom-pull.
//!
//! This module handles:
//! - Loading configuration from TOML files and secrets directories
//! - Enumerated options (month name language, transfer method)
//! - Configuration and argument validation

pub mod loader;
pub mod modes;
pub mod validation;

pub use loader::{AccountConfig, Config, OptionsConfig, Secret, DEFAULT_API_BASE};
pub use modes::{MonthNames, TransferMethod};
pub use validation::{parse_date, parse_date_range, validate_config};
