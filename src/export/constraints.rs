//! Standalone constraint statements (`ALTER TABLE ... ADD CONSTRAINT`).
//!
//! Each operation only produces statements when the dialect defers that kind of
//! constraint; dialects that declare it on the column line or in the table body
//! get an empty list.

use super::context::ExportContext;
use super::dialect::{ConstraintPlacement, DialectConfig};
use crate::models::Table;

/// Constraint name prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
}

impl ConstraintKind {
    pub fn prefix(&self) -> &'static str {
        match self {
            ConstraintKind::PrimaryKey => "PK",
            ConstraintKind::Unique => "UK",
            ConstraintKind::ForeignKey => "FK",
        }
    }
}

/// Deterministic constraint name `{TYPE}_{table}_{column}` before quoting
pub fn constraint_name(kind: ConstraintKind, table: &str, column: &str) -> String {
    format!("{}_{}_{}", kind.prefix(), table, column)
}

fn column_list(config: &DialectConfig, columns: &[&str]) -> String {
    columns
        .iter()
        .map(|c| config.quote_identifier(c))
        .collect::<Vec<_>>()
        .join(", ")
}

fn alter_table(config: &DialectConfig, table: &str, name: &str, body: &str) -> String {
    format!(
        "ALTER TABLE {} ADD CONSTRAINT {} {};",
        config.quote_identifier(table),
        config.quote_identifier(name),
        body
    )
}

/// One primary key statement covering every primary key column in declaration order
pub fn primary_key_constraints(config: &DialectConfig, table: &Table) -> Vec<String> {
    if config.key_placement != ConstraintPlacement::AlterTable {
        return Vec::new();
    }
    let pk_columns: Vec<&str> = table.primary_key_columns().map(|c| c.name.as_str()).collect();
    if pk_columns.is_empty() {
        return Vec::new();
    }

    let name = constraint_name(ConstraintKind::PrimaryKey, &table.name, &pk_columns.join("_"));
    vec![alter_table(
        config,
        &table.name,
        &name,
        &format!("PRIMARY KEY ({})", column_list(config, &pk_columns)),
    )]
}

/// Table-body clause for a composite primary key in dialects that otherwise
/// mark the key on the column line. Single-column keys stay on the column.
pub fn inline_primary_key(config: &DialectConfig, table: &Table) -> Option<String> {
    if !config.inline_keys() || !table.has_composite_key() {
        return None;
    }
    let pk_columns: Vec<&str> = table.primary_key_columns().map(|c| c.name.as_str()).collect();
    Some(format!("PRIMARY KEY ({})", column_list(config, &pk_columns)))
}

/// One unique statement per unique, non-primary-key column
pub fn unique_constraints(config: &DialectConfig, table: &Table) -> Vec<String> {
    if config.key_placement != ConstraintPlacement::AlterTable {
        return Vec::new();
    }
    table
        .columns
        .iter()
        .filter(|c| c.is_unique && !c.is_primary_key)
        .map(|column| {
            let name = constraint_name(ConstraintKind::Unique, &table.name, &column.name);
            alter_table(
                config,
                &table.name,
                &name,
                &format!("UNIQUE ({})", config.quote_identifier(&column.name)),
            )
        })
        .collect()
}

/// One foreign key statement per foreign key column whose target resolves
pub fn foreign_key_constraints(
    config: &DialectConfig,
    ctx: &ExportContext<'_>,
    table: &Table,
) -> Vec<String> {
    if config.foreign_key_placement != ConstraintPlacement::AlterTable {
        return Vec::new();
    }
    ctx.foreign_keys(table)
        .map(|(column, reference)| {
            let name = constraint_name(ConstraintKind::ForeignKey, &table.name, &column.name);
            alter_table(
                config,
                &table.name,
                &name,
                &format!(
                    "FOREIGN KEY ({}) REFERENCES {}({})",
                    config.quote_identifier(&column.name),
                    config.quote_identifier(&reference.table),
                    config.quote_identifier(&reference.column)
                ),
            )
        })
        .collect()
}

/// Table-body foreign key clauses for dialects that declare them inline
pub fn inline_foreign_keys(
    config: &DialectConfig,
    ctx: &ExportContext<'_>,
    table: &Table,
) -> Vec<String> {
    if config.foreign_key_placement != ConstraintPlacement::TableBody {
        return Vec::new();
    }
    ctx.foreign_keys(table)
        .map(|(column, reference)| {
            format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                config.quote_identifier(&column.name),
                config.quote_identifier(&reference.table),
                config.quote_identifier(&reference.column)
            )
        })
        .collect()
}

/// All deferred constraints of one table, ordered primary key, unique, foreign key
pub fn table_constraints(
    config: &DialectConfig,
    ctx: &ExportContext<'_>,
    table: &Table,
) -> Vec<String> {
    let mut statements = primary_key_constraints(config, table);
    statements.extend(unique_constraints(config, table));
    statements.extend(foreign_key_constraints(config, ctx, table));
    statements
}
