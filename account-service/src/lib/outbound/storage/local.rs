use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;

use crate::account::errors::ImageStoreError;
use crate::domain::account::models::ProfileImage;
use crate::domain::account::ports::ProfileImageStore;

/// Stores profile images as plain files in one directory.
pub struct LocalImageStore {
    directory: PathBuf,
}

impl LocalImageStore {
    /// Open the store, creating the directory if needed.
    ///
    /// # Errors
    /// * `WriteFailed` - Directory could not be created
    pub async fn open(directory: impl AsRef<Path>) -> Result<Self, ImageStoreError> {
        let directory = directory.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&directory)
            .await
            .map_err(|e| ImageStoreError::WriteFailed(format!("{}: {}", directory.display(), e)))?;

        Ok(Self { directory })
    }

    pub fn path_of(&self, name: &ProfileImage) -> PathBuf {
        self.directory.join(name.as_str())
    }
}

#[async_trait]
impl ProfileImageStore for LocalImageStore {
    async fn save(&self, name: &ProfileImage, bytes: &[u8]) -> Result<(), ImageStoreError> {
        let path = self.path_of(name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| ImageStoreError::WriteFailed(format!("{}: {}", path.display(), e)))
    }

    async fn delete(&self, name: &ProfileImage) -> Result<(), ImageStoreError> {
        let path = self.path_of(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ImageStoreError::DeleteFailed(format!(
                "{}: {}",
                path.display(),
                e
            ))),
        }
    }
}
