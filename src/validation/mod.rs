//! Validation functionality
//!
//! Provides non-fatal diagnostics for a model before it is exported:
//! - Table validation (naming conflicts, duplicate columns, key metadata)
//! - Relationship validation (unresolved targets, self-references, circular dependencies)
//!
//! Nothing here stops an export; the service logs the findings as warnings.

pub mod relationships;
pub mod tables;

pub use relationships::{
    CircularDependency, RelationshipValidationResult, RelationshipValidator, SelfReference,
    UnresolvedKind, UnresolvedReference,
};
pub use tables::{
    DuplicateColumn, KeyMismatch, KeyMismatchKind, NamingConflict, TableValidationResult,
    TableValidator,
};

use crate::models::Table;
use tracing::warn;

/// Combined findings of all validators
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationReport {
    pub tables: TableValidationResult,
    pub relationships: RelationshipValidationResult,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.tables.is_clean()
            && self.relationships.unresolved_references.is_empty()
            && self.relationships.circular_dependencies.is_empty()
    }

    /// Human readable findings, one per line. Self-references are legal and not listed.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for conflict in &self.tables.naming_conflicts {
            warnings.push(format!(
                "Table name '{}' is used more than once (positions {} and {})",
                conflict.table_name, conflict.first_index, conflict.duplicate_index
            ));
        }
        for duplicate in &self.tables.duplicate_columns {
            warnings.push(format!(
                "Column '{}' is declared more than once in table '{}'",
                duplicate.column_name, duplicate.table_name
            ));
        }
        for mismatch in &self.tables.key_mismatches {
            let detail = match mismatch.kind {
                KeyMismatchKind::FlagWithoutReference => "is flagged as foreign key but has no reference",
                KeyMismatchKind::ReferenceWithoutFlag => "has a reference but is not flagged as foreign key",
            };
            warnings.push(format!(
                "Column '{}.{}' {}",
                mismatch.table_name, mismatch.column_name, detail
            ));
        }
        for reference in &self.relationships.unresolved_references {
            let detail = match reference.kind {
                UnresolvedKind::MissingTable => "target table is not part of the export",
                UnresolvedKind::MissingColumn => "target column does not exist",
            };
            warnings.push(format!(
                "Reference {}.{} -> {}.{}: {}",
                reference.table_name,
                reference.column_name,
                reference.target_table,
                reference.target_column,
                detail
            ));
        }
        for cycle in &self.relationships.circular_dependencies {
            warnings.push(format!(
                "Circular foreign key dependency between tables: {}",
                cycle.cycle_path.join(", ")
            ));
        }

        warnings
    }

    /// Emit every finding through `tracing::warn!`
    pub fn log_warnings(&self) {
        for warning in self.warnings() {
            warn!("{}", warning);
        }
    }
}

/// Run every validator over the model
pub fn validate_model(tables: &[Table]) -> ValidationReport {
    ValidationReport {
        tables: TableValidator::new().validate(tables),
        relationships: RelationshipValidator::new().validate(tables),
    }
}
