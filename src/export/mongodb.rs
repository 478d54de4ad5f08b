//! MongoDB exporter: collection validators, sample documents and reference indexes.
//!
//! Each exportable table becomes one collection with a `$jsonSchema` validator.
//! Foreign key columns whose target resolves are not part of the validated
//! properties; they are documented as references and get an ascending index
//! instead. Every other column, including unresolved references, stays a property.

use super::GenerationError;
use super::context::ExportContext;
use super::types::StorageType;
use crate::models::{RelationshipKind, Table};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashSet;

static JS_IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("valid regex"));

const BANNER: [&str; 2] = [
    "// MongoDB Schema Validation and Collection Creation",
    "// Run these commands in MongoDB shell or MongoDB Compass",
];

/// `$jsonSchema` validation object for one collection
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionSchema {
    pub bson_type: &'static str,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    pub properties: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
struct PropertySchema {
    bson_type: &'static str,
    description: String,
}

/// Documentation-only link from a field to another collection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionReference {
    pub field: String,
    pub collection: String,
    pub foreign_field: String,
    pub relationship: RelationshipKind,
}

/// Everything generated for one table
#[derive(Debug, Clone)]
pub struct CollectionDefinition {
    pub name: String,
    pub schema: CollectionSchema,
    /// Storage type of every validated property, in column order
    pub fields: Vec<(String, StorageType)>,
    pub references: Vec<CollectionReference>,
}

/// Exporter for MongoDB shell scripts.
#[derive(Debug, Clone, Copy, Default)]
pub struct MongoDbExporter;

impl MongoDbExporter {
    pub fn new() -> Self {
        Self
    }

    /// Build the collection definition of one table
    pub fn collection(
        &self,
        ctx: &ExportContext<'_>,
        table: &Table,
    ) -> Result<CollectionDefinition, GenerationError> {
        let references: Vec<CollectionReference> = ctx
            .foreign_keys(table)
            .map(|(column, reference)| CollectionReference {
                field: column.name.clone(),
                collection: reference.table.clone(),
                foreign_field: reference.column.clone(),
                relationship: reference.kind,
            })
            .collect();
        let referencing: HashSet<&str> = references.iter().map(|r| r.field.as_str()).collect();

        let mut required = Vec::new();
        let mut properties = Map::new();
        let mut fields = Vec::new();

        for column in table
            .columns
            .iter()
            .filter(|c| !referencing.contains(c.name.as_str()))
        {
            let storage = StorageType::classify(column.data_type.as_deref());
            let description = match column.default_value.as_deref().filter(|d| !d.is_empty()) {
                Some(default) => format!("{} field (default: {})", column.name, default),
                None => format!("{} field", column.name),
            };
            let property = PropertySchema {
                bson_type: storage.bson_type(),
                description,
            };
            properties.insert(column.name.clone(), serde_json::to_value(property)?);
            fields.push((column.name.clone(), storage));

            if column.is_required() {
                required.push(column.name.clone());
            }
        }

        let description = table
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| format!("{} collection", table.name));

        Ok(CollectionDefinition {
            name: table.name.clone(),
            schema: CollectionSchema {
                bson_type: "object",
                title: table.name.clone(),
                description,
                required,
                properties,
            },
            fields,
            references,
        })
    }

    /// Export every exportable table of the context to one shell script.
    pub fn export(&self, ctx: &ExportContext<'_>) -> Result<String, GenerationError> {
        let mut blocks: Vec<String> = vec![BANNER.join("\n")];

        for table in ctx.tables() {
            let collection = self.collection(ctx, table)?;
            blocks.push(render_create_collection(&collection)?);
            blocks.push(render_sample_document(&collection)?);
            if !collection.references.is_empty() {
                blocks.push(render_indexes(&collection)?);
            }
        }

        let mut script = blocks.join("\n\n");
        script.push('\n');
        Ok(script)
    }
}

/// Single-line text for `//` comments
fn comment_text(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// `db.name` for plain names, `db.getCollection("name")` otherwise
fn collection_accessor(name: &str) -> Result<String, GenerationError> {
    if JS_IDENTIFIER.is_match(name) {
        Ok(format!("db.{name}"))
    } else {
        Ok(format!("db.getCollection({})", serde_json::to_string(name)?))
    }
}

fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.lines()
        .enumerate()
        .map(|(i, line)| if i == 0 { line.to_string() } else { format!("{pad}{line}") })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_create_collection(collection: &CollectionDefinition) -> Result<String, GenerationError> {
    let schema = serde_json::to_string_pretty(&collection.schema)?;
    Ok(format!(
        "// Collection: {name}\n// {description}\ndb.createCollection({quoted}, {{\n  validator: {{\n    $jsonSchema: {schema}\n  }}\n}});",
        name = comment_text(&collection.name),
        description = comment_text(&collection.schema.description),
        quoted = serde_json::to_string(&collection.name)?,
        schema = indent(&schema, 4),
    ))
}

/// Representative value for a field, as mongo shell source text
fn sample_value(field: &str, storage: StorageType) -> Result<String, GenerationError> {
    Ok(match storage {
        StorageType::Int => "1".to_string(),
        StorageType::Double => "1.0".to_string(),
        StorageType::Bool => "true".to_string(),
        StorageType::Date => "ISODate()".to_string(),
        StorageType::Object => "{}".to_string(),
        StorageType::String => serde_json::to_string(&format!("{field}_value"))?,
    })
}

fn render_sample_document(collection: &CollectionDefinition) -> Result<String, GenerationError> {
    let accessor = collection_accessor(&collection.name)?;
    let document = if collection.fields.is_empty() {
        "{}".to_string()
    } else {
        let entries = collection
            .fields
            .iter()
            .map(|(field, storage)| -> Result<String, GenerationError> {
                Ok(format!(
                    "  {}: {}",
                    serde_json::to_string(field)?,
                    sample_value(field, *storage)?
                ))
            })
            .collect::<Result<Vec<_>, GenerationError>>()?;
        format!("{{\n{}\n}}", entries.join(",\n"))
    };

    Ok(format!(
        "// Sample document for {}\n{}.insertOne({});",
        comment_text(&collection.name),
        accessor,
        document
    ))
}

fn render_indexes(collection: &CollectionDefinition) -> Result<String, GenerationError> {
    let accessor = collection_accessor(&collection.name)?;
    let lines = collection
        .references
        .iter()
        .map(|reference| -> Result<String, GenerationError> {
            Ok(format!(
                "// {}.{} references {}.{} ({})\n{}.createIndex({{ {}: 1 }});",
                comment_text(&collection.name),
                comment_text(&reference.field),
                comment_text(&reference.collection),
                comment_text(&reference.foreign_field),
                reference.relationship,
                accessor,
                serde_json::to_string(&reference.field)?
            ))
        })
        .collect::<Result<Vec<_>, GenerationError>>()?;
    Ok(lines.join("\n"))
}
