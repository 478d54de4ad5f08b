//! Column model for the export engine

use super::relationship::{Reference, RelationshipKind};
use serde::{Deserialize, Serialize};

/// Column model representing a field in a table
///
/// A column carries an optional abstract type token plus key, nullability,
/// uniqueness and default metadata. Field names on the wire follow the diagram
/// editor (`isPrimaryKey`, `defaultValue`, ...).
///
/// # Example
///
/// ```rust
/// use erd_schema_export::models::Column;
///
/// let column = Column::new("id", "INT").primary_key();
/// assert!(column.is_primary_key);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Column name
    pub name: String,
    /// Abstract type token (e.g. "INT", "VARCHAR(255)", "DECIMAL(10,2)")
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub data_type: Option<String>,
    /// Whether this column is part of the primary key (default: false)
    #[serde(default)]
    pub is_primary_key: bool,
    /// Whether this column references another table (default: false)
    #[serde(default)]
    pub is_foreign_key: bool,
    /// Explicit nullability. `None` means "not specified".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_nullable: Option<bool>,
    /// Whether this column carries a uniqueness constraint (default: false)
    #[serde(default)]
    pub is_unique: bool,
    /// Default value, emitted as a literal unless it is `CURRENT_TIMESTAMP`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    /// Foreign key target, present iff `is_foreign_key`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Reference>,
}

impl Column {
    /// Create a new column with the given name and type token
    ///
    /// # Arguments
    ///
    /// * `name` - The column name
    /// * `data_type` - The abstract type token (e.g., "INT", "VARCHAR(100)")
    ///
    /// # Returns
    ///
    /// A new `Column` with no key, nullability or default metadata.
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: Some(normalize_data_type(&data_type.into())),
            ..Self::default()
        }
    }

    /// Create a column without a declared type
    pub fn untyped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Mark the column as (part of) the primary key
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Mark the column as unique
    pub fn unique(mut self) -> Self {
        self.is_unique = true;
        self
    }

    /// Set explicit nullability
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.is_nullable = Some(nullable);
        self
    }

    /// Set the default value
    pub fn with_default(mut self, value: impl Into<String>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Turn the column into a foreign key pointing at `table.column`
    pub fn references(
        mut self,
        table: impl Into<String>,
        column: impl Into<String>,
        kind: RelationshipKind,
    ) -> Self {
        self.is_foreign_key = true;
        self.reference = Some(Reference::new(table, column, kind));
        self
    }

    /// Whether the column must not hold NULL (explicitly non-nullable or primary key)
    pub fn is_required(&self) -> bool {
        self.is_nullable == Some(false) || self.is_primary_key
    }

    /// The foreign key target, only when the column is flagged as a foreign key
    pub fn foreign_key(&self) -> Option<&Reference> {
        if self.is_foreign_key {
            self.reference.as_ref()
        } else {
            None
        }
    }

    /// Whether the declared type is one of the plain integer tokens that take an
    /// auto-numbering idiom when used as a primary key
    pub fn is_integer_typed(&self) -> bool {
        self.data_type
            .as_deref()
            .map(str::trim)
            .is_some_and(|t| t.eq_ignore_ascii_case("INT") || t.eq_ignore_ascii_case("INTEGER"))
    }
}

/// Upper-case the keyword part of a type token, leaving parameters untouched
/// so that `varchar(255)` and `enum('a','B')` keep their arguments verbatim.
fn normalize_data_type(data_type: &str) -> String {
    let trimmed = data_type.trim();
    match trimmed.find('(') {
        Some(open) => format!(
            "{}{}",
            trimmed[..open].trim_end().to_uppercase(),
            &trimmed[open..]
        ),
        None => trimmed.to_uppercase(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_keyword_only() {
        let col = Column::new("status", "enum('Active','Closed')");
        assert_eq!(col.data_type.as_deref(), Some("ENUM('Active','Closed')"));

        let col = Column::new("name", " varchar (64) ");
        assert_eq!(col.data_type.as_deref(), Some("VARCHAR(64)"));
    }

    #[test]
    fn test_required_and_foreign_key() {
        let pk = Column::new("id", "INT").primary_key();
        assert!(pk.is_required());
        assert!(pk.is_integer_typed());

        let optional = Column::new("note", "TEXT");
        assert!(!optional.is_required());

        let mut dangling = Column::new("user_id", "INT");
        dangling.reference = Some(Reference::new("users", "id", RelationshipKind::OneToMany));
        // reference without the flag is not a foreign key
        assert!(dangling.foreign_key().is_none());
    }

    #[test]
    fn test_deserialize_editor_payload() {
        let json = r#"{
            "name": "userId",
            "type": "INT",
            "isForeignKey": true,
            "isNullable": false,
            "reference": { "table": "users", "column": "id", "type": "ONE-TO-ONE" }
        }"#;
        let col: Column = serde_json::from_str(json).unwrap();
        assert!(col.is_required());
        let reference = col.foreign_key().unwrap();
        assert_eq!(reference.table, "users");
        assert_eq!(reference.kind, RelationshipKind::OneToOne);
    }
}
