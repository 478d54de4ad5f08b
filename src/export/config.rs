//! Export options

use serde::{Deserialize, Serialize};

/// Default prefix of generated file names
pub const DEFAULT_FILENAME_PREFIX: &str = "schema";

/// Options controlling an [`ExportService`](super::service::ExportService)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    /// Fail with `UnresolvedReference` instead of dropping foreign keys whose
    /// target table is not part of the export
    pub strict_references: bool,
    /// Prefix of the generated file name (`{prefix}_{dialect}_{date}{ext}`)
    pub filename_prefix: String,
    /// Run model diagnostics before generating and log them as warnings
    pub log_diagnostics: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            strict_references: false,
            filename_prefix: DEFAULT_FILENAME_PREFIX.to_string(),
            log_diagnostics: true,
        }
    }
}

impl ExportOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict options (every foreign key must resolve)
    pub fn strict() -> Self {
        Self {
            strict_references: true,
            ..Default::default()
        }
    }

    pub fn with_strict_references(mut self, strict: bool) -> Self {
        self.strict_references = strict;
        self
    }

    /// Set the file name prefix. Blank prefixes fall back to the default.
    pub fn with_filename_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.filename_prefix = if prefix.trim().is_empty() {
            DEFAULT_FILENAME_PREFIX.to_string()
        } else {
            prefix.trim().to_string()
        };
        self
    }

    pub fn with_log_diagnostics(mut self, enabled: bool) -> Self {
        self.log_diagnostics = enabled;
        self
    }

    /// Load options from a TOML document; missing keys keep their defaults and
    /// the prefix is normalized like [`with_filename_prefix`](Self::with_filename_prefix)
    #[cfg(feature = "config-file")]
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        let mut options: Self = toml::from_str(content)?;
        let prefix = std::mem::take(&mut options.filename_prefix);
        Ok(options.with_filename_prefix(prefix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ExportOptions::default();
        assert!(!options.strict_references);
        assert_eq!(options.filename_prefix, "schema");
        assert!(options.log_diagnostics);
        assert!(ExportOptions::strict().strict_references);
    }

    #[test]
    fn test_builders() {
        let options = ExportOptions::new()
            .with_strict_references(true)
            .with_filename_prefix(" shop ")
            .with_log_diagnostics(false);
        assert!(options.strict_references);
        assert_eq!(options.filename_prefix, "shop");
        assert!(!options.log_diagnostics);

        assert_eq!(
            ExportOptions::new().with_filename_prefix("  ").filename_prefix,
            "schema"
        );
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn test_from_toml() {
        let options = ExportOptions::from_toml_str("strict_references = true\n").unwrap();
        assert!(options.strict_references);
        assert_eq!(options.filename_prefix, "schema");

        assert!(ExportOptions::from_toml_str("strict_references = \"yes\"").is_err());
    }

    #[cfg(feature = "config-file")]
    #[test]
    fn test_from_toml_normalizes_prefix() {
        let blank = ExportOptions::from_toml_str("filename_prefix = \"  \"\n").unwrap();
        assert_eq!(blank.filename_prefix, "schema");

        let padded = ExportOptions::from_toml_str("filename_prefix = \" shop \"\n").unwrap();
        assert_eq!(padded.filename_prefix, "shop");
    }
}
