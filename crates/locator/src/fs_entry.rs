//! Filesystem-backed [`AppEntry`] built on `tokio::fs`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::FutureExt;

use crate::LocatorError;
use crate::entry::{AppEntry, EntryFuture};

/// A real file or directory on disk.
pub struct FsEntry {
    path: PathBuf,
    name: String,
    is_dir: bool,
}

impl FsEntry {
    /// Wraps an existing on-disk path as the root of a dropped tree.
    pub fn open(path: impl AsRef<Path>) -> Result<Arc<dyn AppEntry>, LocatorError> {
        let path = path.as_ref().to_path_buf();
        let metadata = std::fs::metadata(&path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(Arc::new(Self {
            path,
            name,
            is_dir: metadata.is_dir(),
        }))
    }
}

impl AppEntry for FsEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_file(&self) -> bool {
        !self.is_dir
    }

    fn is_dir(&self) -> bool {
        self.is_dir
    }

    fn children(&self) -> EntryFuture<'_, Vec<Arc<dyn AppEntry>>> {
        async move {
            let mut out: Vec<Arc<dyn AppEntry>> = Vec::new();
            let mut dir = tokio::fs::read_dir(&self.path).await?;
            while let Some(entry) = dir.next_entry().await? {
                let metadata = entry.metadata().await?;
                // Anything that is neither file nor directory (sockets,
                // broken symlinks) cannot hold an app image.
                if !metadata.is_file() && !metadata.is_dir() {
                    continue;
                }
                out.push(Arc::new(FsEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path: entry.path(),
                    is_dir: metadata.is_dir(),
                }));
            }
            Ok(out)
        }
        .boxed()
    }

    fn read(&self) -> EntryFuture<'_, Vec<u8>> {
        async move { Ok(tokio::fs::read(&self.path).await?) }.boxed()
    }
}
