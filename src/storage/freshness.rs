//! Freshness marker written by the swap-route logging job

use std::path::{Path, PathBuf};

/// Presence-only sentinel: existence means the route job produced output at
/// least once. Age and content are not inspected.
#[derive(Debug, Clone)]
pub struct FreshnessMarker {
    path: PathBuf,
}

impl FreshnessMarker {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn is_present(&self) -> std::io::Result<bool> {
        tokio::fs::try_exists(&self.path).await
    }
}
