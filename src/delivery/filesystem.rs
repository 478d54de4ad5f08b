//! File system delivery backend
//!
//! Writes artifacts into a base directory. Used by native apps and the CLI.
//!
//! ## Security
//!
//! Only plain file names are accepted (see [`validate_filename`]); the
//! resolved path is verified to remain within the base directory.

use super::{DeliveryError, DeliveryReceipt, FileDelivery, validate_filename};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::info;

/// File system delivery backend
#[derive(Debug, Clone)]
pub struct FileSystemDelivery {
    base_path: PathBuf,
}

impl FileSystemDelivery {
    /// Create a new file system delivery backend
    ///
    /// # Arguments
    ///
    /// * `base_path` - Directory receiving the artifacts; created on first delivery
    ///
    /// # Example
    ///
    /// ```rust
    /// use erd_schema_export::delivery::FileSystemDelivery;
    ///
    /// let delivery = FileSystemDelivery::new("/tmp/exports");
    /// assert!(delivery.base_path().ends_with("exports"));
    /// ```
    pub fn new(base_path: impl AsRef<Path>) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    async fn resolve_path(&self, filename: &str) -> Result<PathBuf, DeliveryError> {
        validate_filename(filename)?;

        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            DeliveryError::Io(format!(
                "Failed to create directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;

        let base_canonical = fs::canonicalize(&self.base_path).await.map_err(|e| {
            DeliveryError::Io(format!(
                "Failed to resolve directory {}: {}",
                self.base_path.display(),
                e
            ))
        })?;
        let full = base_canonical.join(filename);

        if full.parent() != Some(base_canonical.as_path()) {
            return Err(DeliveryError::InvalidFilename(format!(
                "Path escapes base directory: {}",
                filename
            )));
        }

        Ok(full)
    }
}

#[async_trait(?Send)]
impl FileDelivery for FileSystemDelivery {
    async fn deliver(
        &self,
        content: &str,
        filename: &str,
        mime_type: &str,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let full_path = self.resolve_path(filename).await?;

        fs::write(&full_path, content.as_bytes())
            .await
            .map_err(|e| DeliveryError::Io(format!("Failed to write file {}: {}", filename, e)))?;

        info!(
            "Delivered {} ({} bytes, {}) to {}",
            filename,
            content.len(),
            mime_type,
            full_path.display()
        );

        Ok(DeliveryReceipt {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            location: full_path.display().to_string(),
            bytes: content.len(),
        })
    }
}
