//! Data model: the ordered table collection handed over by the diagram editor

use super::table::Table;
use serde::{Deserialize, Serialize};

/// Error while reading a model document
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("Failed to parse JSON model: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Failed to parse YAML model: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DataModel {
    #[serde(default)]
    pub tables: Vec<Table>,
}

/// Model documents come either as `{ "tables": [...] }` or as a bare table list.
#[derive(Deserialize)]
#[serde(untagged)]
enum ModelDocument {
    Wrapped(DataModel),
    Bare(Vec<Table>),
}

impl From<ModelDocument> for DataModel {
    fn from(doc: ModelDocument) -> Self {
        match doc {
            ModelDocument::Wrapped(model) => model,
            ModelDocument::Bare(tables) => DataModel { tables },
        }
    }
}

impl DataModel {
    pub fn new(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    /// Import a model from JSON
    pub fn from_json(json_content: &str) -> Result<Self, ModelError> {
        let doc: ModelDocument = serde_json::from_str(json_content)?;
        Ok(doc.into())
    }

    /// Import a model from YAML
    pub fn from_yaml(yaml_content: &str) -> Result<Self, ModelError> {
        let doc: ModelDocument = serde_yaml::from_str(yaml_content)?;
        Ok(doc.into())
    }

    /// Export the model to pretty JSON
    pub fn to_json_pretty(&self) -> Result<String, ModelError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn get_table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }
}
