//! CLI error type

use crate::export::ExportError;
use crate::models::ModelError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Failed to read {0}: {1}")]
    FileReadError(PathBuf, String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Invalid model: {0}")]
    Model(#[from] ModelError),
    #[error("Invalid configuration {0}: {1}")]
    Config(PathBuf, String),
    #[error(transparent)]
    Export(#[from] ExportError),
}

impl CliError {
    /// Process exit code: 2 for bad input, 1 for export or delivery failures
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::Export(ExportError::GenerationFailed { .. })
            | CliError::Export(ExportError::Delivery(_)) => 1,
            _ => 2,
        }
    }
}
