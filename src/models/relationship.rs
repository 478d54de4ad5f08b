//! Foreign key reference model

use serde::{Deserialize, Serialize};
use std::fmt;

/// Cardinality of a foreign key link as drawn in the diagram.
///
/// The kind is carried through to documentation output only; it never changes
/// the generated DDL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RelationshipKind {
    #[serde(rename = "ONE-TO-ONE")]
    OneToOne,
    #[serde(rename = "ONE-TO-MANY")]
    OneToMany,
    #[serde(rename = "MANY-TO-ONE")]
    ManyToOne,
    #[serde(rename = "MANY-TO-MANY")]
    ManyToMany,
}

impl RelationshipKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipKind::OneToOne => "ONE-TO-ONE",
            RelationshipKind::OneToMany => "ONE-TO-MANY",
            RelationshipKind::ManyToOne => "MANY-TO-ONE",
            RelationshipKind::ManyToMany => "MANY-TO-MANY",
        }
    }
}

impl fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Foreign key reference to another table's column
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Reference {
    /// Target table name
    pub table: String,
    /// Column name in the target table
    pub column: String,
    /// Relationship kind (wire name `type`)
    #[serde(rename = "type", alias = "kind")]
    pub kind: RelationshipKind,
}

impl Reference {
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            kind,
        }
    }
}
