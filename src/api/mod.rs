//! Zoom API module.
//!
//! This module provides:
//! - HTTP client for the Zoom v2 REST API
//! - Short-lived token minting
//! - API request and response types

pub mod auth;
pub mod client;
pub mod types;

pub use auth::TokenMinter;
pub use client::{encode_meeting_identifier, RecordingsApi, ZoomApi, PAGE_SIZE};
pub use types::*;
