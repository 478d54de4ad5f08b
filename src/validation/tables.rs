//! Table validation functionality
//!
//! Validates tables for naming conflicts, duplicate columns and inconsistent
//! foreign key metadata.

use crate::models::Table;
use std::collections::HashMap;

/// Result of table validation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableValidationResult {
    /// Tables sharing a name with an earlier table
    pub naming_conflicts: Vec<NamingConflict>,
    /// Columns declared more than once in the same table
    pub duplicate_columns: Vec<DuplicateColumn>,
    /// Columns whose foreign key flag and reference disagree
    pub key_mismatches: Vec<KeyMismatch>,
}

impl TableValidationResult {
    pub fn is_clean(&self) -> bool {
        self.naming_conflicts.is_empty()
            && self.duplicate_columns.is_empty()
            && self.key_mismatches.is_empty()
    }
}

/// Naming conflict between two tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingConflict {
    pub table_name: String,
    /// Model positions of the first and the conflicting table
    pub first_index: usize,
    pub duplicate_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateColumn {
    pub table_name: String,
    pub column_name: String,
}

/// How a column's foreign key metadata is inconsistent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyMismatchKind {
    /// `is_foreign_key` is set but no reference is attached
    FlagWithoutReference,
    /// A reference is attached but `is_foreign_key` is not set; it is ignored on export
    ReferenceWithoutFlag,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyMismatch {
    pub table_name: String,
    pub column_name: String,
    pub kind: KeyMismatchKind,
}

/// Table validator
#[derive(Debug, Default)]
pub struct TableValidator;

impl TableValidator {
    /// Create a new table validator
    pub fn new() -> Self {
        Self
    }

    /// Run every table check over the model
    pub fn validate(&self, tables: &[Table]) -> TableValidationResult {
        let mut result = TableValidationResult {
            naming_conflicts: self.detect_naming_conflicts(tables),
            ..Default::default()
        };
        for table in tables {
            result.duplicate_columns.extend(self.detect_duplicate_columns(table));
            result.key_mismatches.extend(self.detect_key_mismatches(table));
        }
        result
    }

    /// Detect tables whose name was already used earlier in the model
    pub fn detect_naming_conflicts(&self, tables: &[Table]) -> Vec<NamingConflict> {
        let mut seen: HashMap<&str, usize> = HashMap::new();
        let mut conflicts = Vec::new();

        for (index, table) in tables.iter().enumerate() {
            match seen.get(table.name.as_str()) {
                Some(&first_index) => conflicts.push(NamingConflict {
                    table_name: table.name.clone(),
                    first_index,
                    duplicate_index: index,
                }),
                None => {
                    seen.insert(table.name.as_str(), index);
                }
            }
        }

        conflicts
    }

    /// Each repeated column name is reported once per table
    pub fn detect_duplicate_columns(&self, table: &Table) -> Vec<DuplicateColumn> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut duplicates = Vec::new();

        for column in &table.columns {
            let count = counts.entry(column.name.as_str()).or_insert(0);
            *count += 1;
            if *count == 2 {
                duplicates.push(DuplicateColumn {
                    table_name: table.name.clone(),
                    column_name: column.name.clone(),
                });
            }
        }

        duplicates
    }

    pub fn detect_key_mismatches(&self, table: &Table) -> Vec<KeyMismatch> {
        table
            .columns
            .iter()
            .filter_map(|column| {
                let kind = match (column.is_foreign_key, column.reference.is_some()) {
                    (true, false) => KeyMismatchKind::FlagWithoutReference,
                    (false, true) => KeyMismatchKind::ReferenceWithoutFlag,
                    _ => return None,
                };
                Some(KeyMismatch {
                    table_name: table.name.clone(),
                    column_name: column.name.clone(),
                    kind,
                })
            })
            .collect()
    }
}
