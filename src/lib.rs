//! ERD Schema Export - turns entity-relationship models into database schemas
//!
//! Provides unified interfaces for:
//! - Model types shared with the diagram editor (tables, columns, references)
//! - DDL export for PostgreSQL, MySQL, SQLite, Oracle and SQL Server
//! - MongoDB validation script export
//! - Model validation (naming conflicts, unresolved references, cycles)
//! - File delivery backends (file system, in-memory)

pub mod delivery;
pub mod export;
pub mod models;
pub mod validation;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export commonly used types
pub use delivery::{DeliveryError, DeliveryReceipt, FileDelivery, MemoryDelivery};
#[cfg(feature = "native-fs")]
pub use delivery::FileSystemDelivery;

pub use export::{
    Dialect, ExportError, ExportOptions, ExportResult, ExportService, GenerationError,
};
pub use validation::{ValidationReport, validate_model};

// Re-export models
pub use models::{Column, DataModel, ModelError, Reference, RelationshipKind, Table};
