//! Temporary upload storage
//!
//! Each upload is written to its own uniquely named file in the upload
//! directory and handed back as a [`TempUpload`]. The file is deleted by
//! [`TempUpload::remove`], or on drop if the handle is abandoned.

use std::io;
use std::path::{Path, PathBuf};

use uuid::Uuid;

/// Local directory holding in-flight uploads
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the upload directory if it does not exist yet
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write an uploaded file to disk.
    ///
    /// The handle exists before the write starts, so a failed write does not
    /// leave a partial file behind.
    pub async fn persist(&self, data: &[u8]) -> io::Result<TempUpload> {
        let upload = TempUpload {
            path: self.dir.join(format!("upload_{}.pdf", Uuid::new_v4())),
            removed: false,
        };

        tokio::fs::write(&upload.path, data).await?;

        tracing::debug!(path = %upload.path.display(), bytes = data.len(), "Stored upload");
        Ok(upload)
    }
}

/// An uploaded file on disk, deleted when the handle goes away
#[derive(Debug)]
pub struct TempUpload {
    path: PathBuf,
    removed: bool,
}

impl TempUpload {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn read(&self) -> io::Result<Vec<u8>> {
        tokio::fs::read(&self.path).await
    }

    /// Delete the file, reporting failure to the caller.
    ///
    /// A file that is already gone counts as removed.
    pub async fn remove(mut self) -> io::Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e),
        }
        self.removed = true;
        tracing::debug!(path = %self.path.display(), "Removed upload");
        Ok(())
    }
}

impl Drop for TempUpload {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::debug!(path = %self.path.display(), "Removed abandoned upload"),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Failed to remove temporary upload"
            ),
        }
    }
}
