//! Column definition lines for CREATE TABLE bodies.

use super::dialect::{AutoIncrement, DialectConfig};
use super::types::convert_type;
use crate::models::{Column, Table};

/// Sentinel default value mapped to the dialect's now-function
pub const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

/// Build the definition of one column.
///
/// Segments are emitted in a fixed order and joined by single spaces:
/// name, type, auto-increment keyword, inline primary key, unique,
/// nullability, default clause. Empty segments are dropped. The column is
/// treated as the sole key of its table; use [`table_column_definitions`]
/// when the table may carry a composite key.
///
/// # Example
///
/// ```rust
/// use erd_schema_export::export::column::column_definition;
/// use erd_schema_export::export::dialect::MYSQL;
/// use erd_schema_export::models::Column;
///
/// let id = Column::new("id", "INT").primary_key();
/// assert_eq!(
///     column_definition(&MYSQL, &id),
///     "`id` INT AUTO_INCREMENT PRIMARY KEY NOT NULL"
/// );
/// ```
pub fn column_definition(config: &DialectConfig, column: &Column) -> String {
    render(config, column, true)
}

/// Definitions of every column of `table`, in declaration order.
///
/// Members of a composite primary key carry neither the inline key keyword
/// nor an auto-increment marker; the key is declared once for the whole table
/// (see [`inline_primary_key`](super::constraints::inline_primary_key)).
pub fn table_column_definitions(config: &DialectConfig, table: &Table) -> Vec<String> {
    let single_key = !table.has_composite_key();
    table
        .columns
        .iter()
        .map(|column| render(config, column, single_key))
        .collect()
}

fn render(config: &DialectConfig, column: &Column, single_key: bool) -> String {
    let sole_key = single_key && column.is_primary_key;
    let mut parts: Vec<String> = Vec::with_capacity(8);

    parts.push(config.quote_identifier(&column.name));

    if let Some(token) = column.data_type.as_deref() {
        parts.push(convert_type(config.dialect, token));
    }

    if let AutoIncrement::Inline(keyword) = config.auto_increment
        && sole_key
        && column.is_integer_typed()
    {
        parts.push(keyword.to_string());
    }

    if config.inline_keys() {
        if sole_key {
            parts.push("PRIMARY KEY".to_string());
        }
        if column.is_unique && !column.is_primary_key {
            parts.push("UNIQUE".to_string());
        }
    }

    if column.is_required() {
        parts.push("NOT NULL".to_string());
    } else if config.explicit_null {
        parts.push("NULL".to_string());
    }

    if let Some(default) = column.default_value.as_deref().filter(|d| !d.is_empty()) {
        parts.push("DEFAULT".to_string());
        parts.push(default_literal(config, default));
    }

    parts.retain(|p| !p.is_empty());
    parts.join(" ")
}

/// Render a default value: the now-sentinel becomes the native function,
/// anything else a single-quoted literal with embedded quotes doubled.
pub fn default_literal(config: &DialectConfig, value: &str) -> String {
    if value == CURRENT_TIMESTAMP {
        config.now_function.to_string()
    } else {
        format!("'{}'", value.replace('\'', "''"))
    }
}
