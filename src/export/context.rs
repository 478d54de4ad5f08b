//! Per-call view of the model: which tables are exported and which
//! foreign key references can be resolved against them.

use crate::models::{Column, Reference, Table};
use std::collections::HashSet;
use tracing::debug;

/// Read-only index built once per export call
#[derive(Debug)]
pub struct ExportContext<'a> {
    tables: Vec<&'a Table>,
    table_names: HashSet<&'a str>,
}

impl<'a> ExportContext<'a> {
    /// Index the exportable tables (those with at least one column) in model order
    pub fn new(tables: &'a [Table]) -> Self {
        let tables: Vec<&Table> = tables.iter().filter(|t| t.is_exportable()).collect();
        let table_names = tables.iter().map(|t| t.name.as_str()).collect();
        Self {
            tables,
            table_names,
        }
    }

    /// Exportable tables in model order
    pub fn tables(&self) -> &[&'a Table] {
        &self.tables
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Whether a reference points at a table that is part of this export
    pub fn resolves(&self, reference: &Reference) -> bool {
        self.table_names.contains(reference.table.as_str())
    }

    /// Foreign key columns of `table` whose target resolves, in column order.
    /// Unresolved references are skipped.
    pub fn foreign_keys<'t>(
        &'t self,
        table: &'t Table,
    ) -> impl Iterator<Item = (&'t Column, &'t Reference)> + 't {
        table.columns.iter().filter_map(move |column| {
            let reference = column.foreign_key()?;
            if self.resolves(reference) {
                Some((column, reference))
            } else {
                debug!(
                    "Dropping unresolved reference {}.{} -> {}.{}",
                    table.name, column.name, reference.table, reference.column
                );
                None
            }
        })
    }

    /// Every foreign key in the model whose target cannot be resolved
    pub fn unresolved_references(&self) -> Vec<(&'a Table, &'a Column, &'a Reference)> {
        self.tables
            .iter()
            .flat_map(|&table| {
                table.columns.iter().filter_map(move |column| {
                    column
                        .foreign_key()
                        .filter(|reference| !self.resolves(reference))
                        .map(|reference| (table, column, reference))
                })
            })
            .collect()
    }
}
