//! Export functionality
//!
//! Provides exporters for the supported schema formats:
//! - SQL DDL (PostgreSQL, MySQL, SQLite, Oracle, SQL Server)
//! - MongoDB validation scripts
//!
//! [`ExportService`] is the entry point; the modules below it are usable on
//! their own for callers that need a single statement or column line.

pub mod column;
pub mod config;
pub mod constraints;
pub mod context;
pub mod dialect;
pub mod factory;
pub mod mongodb;
pub mod service;
pub mod sql;
pub mod types;

use crate::delivery::DeliveryError;

/// Result of an export operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResult {
    /// Generated script
    pub content: String,
    /// Suggested file name, e.g. `schema_postgresql_2024-01-31.sql`
    pub filename: String,
    /// MIME type resolved from the file extension
    pub mime_type: String,
    /// Dialect the script was generated for
    pub dialect: Dialect,
}

/// Error raised while generating an artifact
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error during export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Unsupported database type: {0}")]
    UnsupportedDialect(String),
    #[error("No tables provided for export")]
    EmptyModel,
    #[error("No valid tables with columns found")]
    NoExportableTables,
    #[error("Unresolved reference {table}.{column} -> {target}")]
    UnresolvedReference {
        table: String,
        column: String,
        target: String,
    },
    #[error("export failed for dialect {dialect}: {source}")]
    GenerationFailed {
        dialect: Dialect,
        #[source]
        source: GenerationError,
    },
    #[error("Delivery failed: {0}")]
    Delivery(#[from] DeliveryError),
}

// Re-export for convenience
pub use config::ExportOptions;
pub use context::ExportContext;
pub use dialect::{Dialect, DialectConfig, UnknownDialect};
pub use factory::{Exporter, ExporterFactory};
pub use mongodb::MongoDbExporter;
pub use service::ExportService;
pub use sql::SQLExporter;
