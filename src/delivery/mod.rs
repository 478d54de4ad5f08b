//! File delivery abstraction
//!
//! A delivery backend persists a finished artifact. It is the only part of an
//! export that performs I/O and is only invoked after generation succeeded.
//! - FileSystemDelivery: writes into a directory (native apps, CLI)
//! - MemoryDelivery: keeps artifacts in memory (tests, embedding hosts)

use async_trait::async_trait;

/// Error type for delivery operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("Invalid filename: {0}")]
    InvalidFilename(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Delivery backend error: {0}")]
    Backend(String),
}

/// Confirmation of a successful delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub filename: String,
    pub mime_type: String,
    /// Where the artifact ended up (a path, or a backend specific handle)
    pub location: String,
    pub bytes: usize,
}

/// Trait for delivery backends
///
/// Receives exactly the artifact text, its file name and its MIME type.
#[async_trait(?Send)]
pub trait FileDelivery: Send + Sync {
    async fn deliver(
        &self,
        content: &str,
        filename: &str,
        mime_type: &str,
    ) -> Result<DeliveryReceipt, DeliveryError>;
}

/// Reject empty names, path separators and parent-directory segments.
///
/// # Security
///
/// Delivery backends only ever write a single file name; anything that could
/// address another directory is refused before touching storage.
pub fn validate_filename(filename: &str) -> Result<(), DeliveryError> {
    if filename.trim().is_empty() {
        return Err(DeliveryError::InvalidFilename("empty filename".to_string()));
    }
    if filename.contains('/') || filename.contains('\\') {
        return Err(DeliveryError::InvalidFilename(format!(
            "path separators not allowed: {}",
            filename
        )));
    }
    if filename.contains("..") {
        return Err(DeliveryError::InvalidFilename(format!(
            "path traversal (..) not allowed: {}",
            filename
        )));
    }
    Ok(())
}

pub mod memory;

#[cfg(feature = "native-fs")]
pub mod filesystem;

pub use memory::{DeliveredFile, MemoryDelivery};

#[cfg(feature = "native-fs")]
pub use filesystem::FileSystemDelivery;
