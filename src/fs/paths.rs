//! Directory claiming and path helpers.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::Result;

/// Result of trying to take ownership of a meeting directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The directory was created by this call.
    Claimed(PathBuf),
    /// The directory existed before this call.
    AlreadyClaimed,
}

/// Atomically create `path`, failing over to [`ClaimOutcome::AlreadyClaimed`] if it exists.
///
/// Parents are created as needed; only the leaf uses create-if-absent semantics.
pub async fn claim_dir(path: &Path) -> Result<ClaimOutcome> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    match tokio::fs::create_dir(path).await {
        Ok(()) => Ok(ClaimOutcome::Claimed(path.to_path_buf())),
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Ok(ClaimOutcome::AlreadyClaimed),
        Err(e) => Err(e.into()),
    }
}

/// Express `path` relative to `root`.
///
/// Falls back to the path unchanged when it does not live under `root`.
pub fn relative_to(path: &Path, root: &Path) -> PathBuf {
    match path.strip_prefix(root) {
        Ok(rel) => rel.to_path_buf(),
        Err(_) => {
            tracing::warn!(
                "{} is not under {}, recording it as is",
                path.display(),
                root.display()
            );
            path.to_path_buf()
        }
    }
}
