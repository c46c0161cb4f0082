use std::path::{Path, PathBuf};

use log::{debug, warn};
use tempfile::TempPath;
use tokio::fs::{self, File};
use tokio::io::AsyncWriteExt;

use crate::error::SyncError;

/// Read the whole version marker. Invalid UTF-8 is decoded lossily so that it
/// never matches a well-formed remote marker.
pub async fn read_local_version(path: &Path) -> Result<String, SyncError> {
    let bytes = fs::read(path)
        .await
        .map_err(|e| SyncError::io(format!("unable to read {}", path.display()), e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Replace the version marker with exactly `content`.
pub async fn write_local_version(path: &Path, content: &str) -> Result<(), SyncError> {
    let mut staged = StagedFile::create(path)?;
    staged.write_all(content.as_bytes()).await?;
    staged.commit().await
}

/// Directory that holds `path`; bare file names live in the working directory.
pub fn parent_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// New content for `dest`, written to a hidden sibling and renamed into place
/// on `commit`. Dropping an uncommitted file removes the sibling and leaves
/// `dest` as it was.
pub struct StagedFile {
    file: File,
    temp_path: TempPath,
    dest: PathBuf,
}

impl StagedFile {
    pub fn create(dest: &Path) -> Result<Self, SyncError> {
        let name = dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "download".into());
        let staged = tempfile::Builder::new()
            .prefix(&format!(".{name}."))
            .suffix(".part")
            .tempfile_in(parent_dir(dest))
            .map_err(|e| SyncError::io(format!("unable to stage {}", dest.display()), e))?;
        let (file, temp_path) = staged.into_parts();
        debug!("storage: staging {} at {}", dest.display(), temp_path.display());
        Ok(Self {
            file: File::from_std(file),
            temp_path,
            dest: dest.to_path_buf(),
        })
    }

    pub async fn write_all(&mut self, bytes: &[u8]) -> Result<(), SyncError> {
        self.file
            .write_all(bytes)
            .await
            .map_err(|e| SyncError::io(format!("write error on {}", self.temp_path.display()), e))
    }

    /// Flush the staged content and rename it over the destination, keeping
    /// the destination's existing permissions.
    pub async fn commit(mut self) -> Result<(), SyncError> {
        self.file
            .flush()
            .await
            .map_err(|e| SyncError::io("flush error", e))?;
        self.file
            .sync_all()
            .await
            .map_err(|e| SyncError::io("sync error", e))?;

        let Self {
            file,
            temp_path,
            dest,
        } = self;
        drop(file);

        if let Err(err) = carry_permissions(&dest, &temp_path).await {
            warn!(
                "storage: keeping default permissions for {} ({err})",
                dest.display()
            );
        }
        temp_path.persist(&dest).map_err(|e| {
            SyncError::io(format!("unable to replace {}", dest.display()), e.error)
        })?;
        debug!("storage: replaced {}", dest.display());
        Ok(())
    }
}

/// Copy the mode of `from` onto `to`.
async fn carry_permissions(from: &Path, to: &Path) -> std::io::Result<()> {
    let meta = fs::metadata(from).await?;
    fs::set_permissions(to, meta.permissions()).await
}
