//! Relationship validation functionality
//!
//! Validates foreign key references for unresolved targets, self-references
//! and circular dependencies between tables.

use crate::models::Table;
use petgraph::algo::tarjan_scc;
use petgraph::graph::NodeIndex;
use petgraph::{Directed, Graph};
use std::collections::HashMap;

/// Result of relationship validation
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelationshipValidationResult {
    /// References that will be dropped on export
    pub unresolved_references: Vec<UnresolvedReference>,
    /// Circular dependencies found
    pub circular_dependencies: Vec<CircularDependency>,
    /// Self-references found
    pub self_references: Vec<SelfReference>,
}

/// Why a reference cannot be resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnresolvedKind {
    /// No exportable table carries the target name
    MissingTable,
    /// The target table exists but has no such column
    MissingColumn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedReference {
    pub table_name: String,
    pub column_name: String,
    pub target_table: String,
    pub target_column: String,
    pub kind: UnresolvedKind,
}

/// Circular dependency detected; the tables are listed in model order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularDependency {
    pub cycle_path: Vec<String>,
}

/// Self-reference detected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelfReference {
    pub table_name: String,
    pub column_name: String,
}

/// Relationship validator
#[derive(Debug, Default)]
pub struct RelationshipValidator;

impl RelationshipValidator {
    /// Create a new relationship validator
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, tables: &[Table]) -> RelationshipValidationResult {
        RelationshipValidationResult {
            unresolved_references: self.detect_unresolved_references(tables),
            circular_dependencies: self.detect_circular_dependencies(tables),
            self_references: self.detect_self_references(tables),
        }
    }

    /// Foreign keys whose target table is missing or column-less, or whose
    /// target column does not exist
    pub fn detect_unresolved_references(&self, tables: &[Table]) -> Vec<UnresolvedReference> {
        let exportable: HashMap<&str, &Table> = tables
            .iter()
            .filter(|t| t.is_exportable())
            .map(|t| (t.name.as_str(), t))
            .collect();

        let mut unresolved = Vec::new();
        for table in tables.iter().filter(|t| t.is_exportable()) {
            for column in &table.columns {
                let Some(reference) = column.foreign_key() else {
                    continue;
                };
                let kind = match exportable.get(reference.table.as_str()) {
                    None => UnresolvedKind::MissingTable,
                    Some(target) if target.get_column(&reference.column).is_none() => {
                        UnresolvedKind::MissingColumn
                    }
                    Some(_) => continue,
                };
                unresolved.push(UnresolvedReference {
                    table_name: table.name.clone(),
                    column_name: column.name.clone(),
                    target_table: reference.table.clone(),
                    target_column: reference.column.clone(),
                    kind,
                });
            }
        }
        unresolved
    }

    /// Check for circular dependencies using strongly connected components.
    ///
    /// Uses petgraph to detect cycles in the foreign key graph. Self-references
    /// are reported separately by [`Self::detect_self_references`].
    pub fn detect_circular_dependencies(&self, tables: &[Table]) -> Vec<CircularDependency> {
        let mut graph = Graph::<usize, (), Directed>::new();
        let mut node_map: HashMap<&str, NodeIndex> = HashMap::new();

        for (index, table) in tables.iter().enumerate() {
            node_map
                .entry(table.name.as_str())
                .or_insert_with(|| graph.add_node(index));
        }

        for table in tables {
            let Some(&source) = node_map.get(table.name.as_str()) else {
                continue;
            };
            for reference in table.columns.iter().filter_map(|c| c.foreign_key()) {
                if let Some(&target) = node_map.get(reference.table.as_str())
                    && target != source
                {
                    graph.update_edge(source, target, ());
                }
            }
        }

        let mut cycles: Vec<CircularDependency> = tarjan_scc(&graph)
            .into_iter()
            .filter(|component| component.len() > 1)
            .map(|component| {
                let mut indices: Vec<usize> = component.iter().map(|&n| graph[n]).collect();
                indices.sort_unstable();
                CircularDependency {
                    cycle_path: indices.into_iter().map(|i| tables[i].name.clone()).collect(),
                }
            })
            .collect();
        cycles.sort_by(|a, b| a.cycle_path.cmp(&b.cycle_path));
        cycles
    }

    /// Foreign keys pointing back at their own table
    pub fn detect_self_references(&self, tables: &[Table]) -> Vec<SelfReference> {
        tables
            .iter()
            .flat_map(|table| {
                table
                    .columns
                    .iter()
                    .filter_map(|c| c.foreign_key().map(|r| (c, r)))
                    .filter(|(_, reference)| reference.table == table.name)
                    .map(|(column, _)| SelfReference {
                        table_name: table.name.clone(),
                        column_name: column.name.clone(),
                    })
            })
            .collect()
    }
}
