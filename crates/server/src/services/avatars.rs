//! Avatar blob store on the local filesystem.
//!
//! Files are written under `<uploads_dir>/avatars/` and referenced from the
//! user row as `/uploads/avatars/<file>`, the same path they are served
//! back from. Deletions are best-effort: a missing old file is not an
//! error, and removal failures are logged and swallowed.

use std::path::{Path, PathBuf};

use chrono::Utc;

use loftwood_core::UserId;

/// Public URL prefix the stored references start with.
const UPLOADS_PREFIX: &str = "/uploads/";

/// Subdirectory for avatar files.
const AVATARS_SUBDIR: &str = "avatars";

/// Filesystem store for avatar blobs.
#[derive(Debug, Clone)]
pub struct AvatarStore {
    root: PathBuf,
}

impl AvatarStore {
    /// Create a store rooted at the uploads directory.
    #[must_use]
    pub fn new(uploads_dir: &Path) -> Self {
        Self {
            root: uploads_dir.to_owned(),
        }
    }

    /// Write a new avatar blob and return its public reference.
    ///
    /// # Errors
    ///
    /// Returns `std::io::Error` if the directory cannot be created or the
    /// file cannot be written.
    pub async fn store(
        &self,
        user_id: UserId,
        extension: &str,
        bytes: &[u8],
    ) -> std::io::Result<String> {
        let dir = self.root.join(AVATARS_SUBDIR);
        tokio::fs::create_dir_all(&dir).await?;

        let filename = format!("{user_id}-{}.{extension}", Utc::now().timestamp_millis());
        tokio::fs::write(dir.join(&filename), bytes).await?;

        Ok(format!("{UPLOADS_PREFIX}{AVATARS_SUBDIR}/{filename}"))
    }

    /// Best-effort removal of a previously stored blob.
    ///
    /// Accepts the public reference as stored on the user row. References
    /// outside the uploads tree are ignored.
    pub async fn remove(&self, reference: &str) {
        let Some(relative) = reference.strip_prefix(UPLOADS_PREFIX) else {
            tracing::warn!(reference, "refusing to remove file outside uploads tree");
            return;
        };
        if relative.contains("..") {
            tracing::warn!(reference, "refusing to remove file outside uploads tree");
            return;
        }

        let path = self.root.join(relative);
        if let Err(e) = tokio::fs::remove_file(&path).await
            && e.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(reference, error = %e, "failed to remove old avatar");
        }
    }
}
