//! Screenshot artifacts.
//!
//! Persists full-page screenshots under a descriptive name for post-mortem
//! inspection. Capture is a diagnostic side effect only: it never changes a
//! scenario's outcome, and a capture failure on the failure path is logged
//! and swallowed.

use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::result::{SuiteError, SuiteResult};
use crate::session::Session;

/// Default directory for screenshot artifacts
pub const DEFAULT_ARTIFACT_DIR: &str = "test-results/screenshots";

/// Writer for screenshot artifacts.
#[derive(Debug, Clone)]
pub struct Artifacts {
    dir: PathBuf,
}

impl Default for Artifacts {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_ARTIFACT_DIR),
        }
    }
}

impl Artifacts {
    /// Artifacts rooted at the default directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Artifacts rooted at `dir`.
    #[must_use]
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The artifact directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Capture a full-page screenshot and persist it as `<name>.png`.
    pub async fn capture<S: Session + ?Sized>(
        &self,
        session: &S,
        name: &str,
    ) -> SuiteResult<PathBuf> {
        let bytes = session.screenshot().await?;
        if bytes.is_empty() {
            return Err(SuiteError::Screenshot {
                message: "session produced an empty screenshot".to_string(),
            });
        }
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.dir.join(format!("{}.png", sanitize(name)));
        tokio::fs::write(&path, &bytes).await?;
        info!(path = %path.display(), "captured screenshot");
        Ok(path)
    }

    /// Pass a scenario result through, capturing a screenshot only when it
    /// is an error. The result (and thus pass/fail) is returned unchanged.
    pub async fn capture_on_failure<S: Session + ?Sized, T>(
        &self,
        session: &S,
        name: &str,
        result: SuiteResult<T>,
    ) -> SuiteResult<T> {
        if result.is_err() {
            if let Err(capture_err) = self.capture(session, name).await {
                warn!(%capture_err, "screenshot capture on failure did not succeed");
            }
        }
        result
    }
}

/// Keep artifact names filesystem-safe.
fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::FakeSession;
    use crate::result::SuiteError;

    #[test]
    fn test_sanitize_keeps_descriptive_names() {
        assert_eq!(sanitize("login-failure"), "login-failure");
        assert_eq!(sanitize("sidebar search: no results"), "sidebar-search--no-results");
    }

    #[tokio::test]
    async fn test_capture_writes_png_file() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = Artifacts::in_dir(dir.path());
        let session = FakeSession::new();

        let path = artifacts.capture(&session, "dashboard-loaded").await.unwrap();
        assert!(path.ends_with("dashboard-loaded.png"));
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[tokio::test]
    async fn test_capture_on_failure_leaves_ok_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = Artifacts::in_dir(dir.path());
        let session = FakeSession::new();

        let value = artifacts
            .capture_on_failure(&session, "should-not-exist", Ok(42))
            .await
            .unwrap();
        assert_eq!(value, 42);
        assert!(!dir.path().join("should-not-exist.png").exists());
    }

    #[tokio::test]
    async fn test_capture_on_failure_persists_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        let artifacts = Artifacts::in_dir(dir.path());
        let session = FakeSession::new();

        let result: SuiteResult<()> = Err(SuiteError::Action {
            message: "boom".to_string(),
        });
        let back = artifacts
            .capture_on_failure(&session, "login failure", result)
            .await;
        assert!(back.is_err());
        assert!(dir.path().join("login-failure.png").exists());
    }
}
