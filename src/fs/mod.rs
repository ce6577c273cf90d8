//! Filesystem module.
//!
//! Provides:
//! - Deterministic meeting directory naming
//! - Atomic directory claiming, the idempotency marker for downloads

pub mod naming;
pub mod paths;

pub use naming::{
    format_date, format_time_with_offset, sanitize_path_component, validate_filename,
    PathNamingScheme,
};
pub use paths::{claim_dir, relative_to, ClaimOutcome};
