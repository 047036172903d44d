//! Output materialization.
//!
//! The sitemap file is always replaced wholesale. A forced write removes any
//! existing file first.

use std::{
    io,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Output writer errors.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Checking for a previous file failed.
    #[error("failed to check {path}: {source}")]
    Check {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Removing the previous file failed.
    #[error("failed to remove {path}: {source}")]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Writing the new file failed.
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type for output operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Filesystem operations the writer needs.
#[async_trait]
pub trait Filesystem: Send + Sync {
    /// Whether a file exists at `path`.
    async fn exists(&self, path: &Path) -> io::Result<bool>;

    /// Remove the file at `path`.
    async fn remove_file(&self, path: &Path) -> io::Result<()>;

    /// Create or truncate the file at `path` with `contents`, creating parent
    /// directories as needed.
    async fn write(&self, path: &Path, contents: &str) -> io::Result<()>;
}

/// The local filesystem, accessed through `tokio::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

#[async_trait]
impl Filesystem for LocalFilesystem {
    async fn exists(&self, path: &Path) -> io::Result<bool> {
        tokio::fs::try_exists(path).await
    }

    async fn remove_file(&self, path: &Path) -> io::Result<()> {
        tokio::fs::remove_file(path).await
    }

    async fn write(&self, path: &Path, contents: &str) -> io::Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await
    }
}

/// Writes rendered pages through a [`Filesystem`].
pub struct OutputWriter<'a> {
    fs: &'a dyn Filesystem,
}

impl<'a> OutputWriter<'a> {
    /// Create a writer on top of `fs`.
    #[must_use]
    pub fn new(fs: &'a dyn Filesystem) -> Self {
        Self { fs }
    }

    /// Write `html` to `destination`, replacing any existing file.
    ///
    /// With `force`, an existing file is removed before writing and a failed
    /// removal aborts the write.
    pub async fn write(&self, destination: &Path, html: &str, force: bool) -> Result<()> {
        if force {
            let exists = self
                .fs
                .exists(destination)
                .await
                .map_err(|source| WriteError::Check {
                    path: destination.to_path_buf(),
                    source,
                })?;

            if exists {
                debug!(path = %destination.display(), "removing existing sitemap");
                self.fs
                    .remove_file(destination)
                    .await
                    .map_err(|source| WriteError::Remove {
                        path: destination.to_path_buf(),
                        source,
                    })?;
            }
        }

        self.fs
            .write(destination, html)
            .await
            .map_err(|source| WriteError::Write {
                path: destination.to_path_buf(),
                source,
            })?;

        debug!(path = %destination.display(), bytes = html.len(), "wrote sitemap");
        Ok(())
    }
}


#[cfg(test)]
mod tests {
    use super::{testing::MemoryFilesystem, *};

    #[tokio::test]
    async fn test_write_new_file() {
        let fs = MemoryFilesystem::default();
        let dest = Path::new("public/sitemap.html");

        OutputWriter::new(&fs).write(dest, "<html>", false).await.unwrap();

        assert_eq!(fs.read(dest).as_deref(), Some("<html>"));
        assert!(fs.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unforced_write_overwrites_without_remove() {
        let dest = Path::new("public/sitemap.html");
        let fs = MemoryFilesystem::with_file(dest, "old");

        OutputWriter::new(&fs).write(dest, "new", false).await.unwrap();

        assert_eq!(fs.read(dest).as_deref(), Some("new"));
        assert!(fs.removed.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_forced_write_removes_first() {
        let dest = Path::new("public/sitemap.html");
        let fs = MemoryFilesystem::with_file(dest, "old");

        OutputWriter::new(&fs).write(dest, "fresh", true).await.unwrap();

        assert_eq!(fs.read(dest).as_deref(), Some("fresh"));
        assert_eq!(*fs.removed.lock().unwrap(), vec![dest.to_path_buf()]);
    }

    #[tokio::test]
    async fn test_forced_write_without_existing_file() {
        let fs = MemoryFilesystem::default();
        let dest = Path::new("public/sitemap.html");

        OutputWriter::new(&fs).write(dest, "fresh", true).await.unwrap();

        assert!(fs.removed.lock().unwrap().is_empty());
        assert_eq!(fs.read(dest).as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn test_remove_failure_propagates() {
        let dest = Path::new("public/sitemap.html");
        let mut fs = MemoryFilesystem::with_file(dest, "old");
        fs.fail_remove = true;

        let err = OutputWriter::new(&fs)
            .write(dest, "fresh", true)
            .await
            .unwrap_err();

        assert!(matches!(err, WriteError::Remove { .. }));
        assert_eq!(fs.read(dest).as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_existence_check_failure_is_not_a_remove_failure() {
        let dest = Path::new("public/sitemap.html");
        let mut fs = MemoryFilesystem::with_file(dest, "old");
        fs.fail_exists = true;

        let err = OutputWriter::new(&fs)
            .write(dest, "fresh", true)
            .await
            .unwrap_err();

        assert!(matches!(err, WriteError::Check { .. }));
        assert!(err.to_string().starts_with("failed to check"));
        assert!(fs.removed.lock().unwrap().is_empty());
        assert_eq!(fs.read(dest).as_deref(), Some("old"));
    }

    #[tokio::test]
    async fn test_write_failure_propagates() {
        let fs = MemoryFilesystem {
            fail_write: true,
            ..Default::default()
        };

        let err = OutputWriter::new(&fs)
            .write(Path::new("public/sitemap.html"), "x", false)
            .await
            .unwrap_err();

        assert!(matches!(err, WriteError::Write { .. }));
        assert!(err.to_string().contains("disk full"));
    }

    #[tokio::test]
    async fn test_local_filesystem_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nested/dir/sitemap.html");
        let fs = LocalFilesystem;

        OutputWriter::new(&fs).write(&dest, "one", false).await.unwrap();
        OutputWriter::new(&fs).write(&dest, "two", true).await.unwrap();

        assert_eq!(std::fs::read_to_string(&dest).unwrap(), "two");
        assert!(fs.exists(&dest).await.unwrap());
    }
}
