//! In-memory delivery backend

use super::{DeliveryError, DeliveryReceipt, FileDelivery, validate_filename};
use async_trait::async_trait;
use std::sync::Mutex;

/// An artifact handed to [`MemoryDelivery`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveredFile {
    pub filename: String,
    pub mime_type: String,
    pub content: String,
}

/// Keeps every delivered artifact in delivery order
#[derive(Debug, Default)]
pub struct MemoryDelivery {
    files: Mutex<Vec<DeliveredFile>>,
}

impl MemoryDelivery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the delivered artifacts
    pub fn files(&self) -> Vec<DeliveredFile> {
        match self.files.lock() {
            Ok(files) => files.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait(?Send)]
impl FileDelivery for MemoryDelivery {
    async fn deliver(
        &self,
        content: &str,
        filename: &str,
        mime_type: &str,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        validate_filename(filename)?;

        let mut files = self
            .files
            .lock()
            .map_err(|e| DeliveryError::Backend(format!("Memory store unavailable: {}", e)))?;
        files.push(DeliveredFile {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            content: content.to_string(),
        });

        Ok(DeliveryReceipt {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            location: format!("memory://{}", filename),
            bytes: content.len(),
        })
    }
}
