//! Exporter factory: resolves a dialect to a configured exporter.

use super::GenerationError;
use super::context::ExportContext;
use super::dialect::Dialect;
use super::mongodb::MongoDbExporter;
use super::sql::SQLExporter;

/// A configured exporter for one dialect
#[derive(Debug, Clone, Copy)]
pub enum Exporter {
    Relational(SQLExporter),
    Document(MongoDbExporter),
}

impl Exporter {
    pub fn dialect(&self) -> Dialect {
        match self {
            Exporter::Relational(exporter) => exporter.dialect(),
            Exporter::Document(_) => Dialect::MongoDb,
        }
    }

    pub fn file_extension(&self) -> &'static str {
        self.dialect().file_extension()
    }

    /// Generate the artifact text for the tables of the context
    pub fn export(&self, ctx: &ExportContext<'_>) -> Result<String, GenerationError> {
        match self {
            Exporter::Relational(exporter) => Ok(exporter.export(ctx)),
            Exporter::Document(exporter) => exporter.export(ctx),
        }
    }
}

pub struct ExporterFactory;

impl ExporterFactory {
    /// Create the exporter for a dialect.
    ///
    /// # Example
    ///
    /// ```rust
    /// use erd_schema_export::export::dialect::Dialect;
    /// use erd_schema_export::export::factory::ExporterFactory;
    ///
    /// let exporter = ExporterFactory::create(Dialect::MongoDb);
    /// assert_eq!(exporter.file_extension(), ".js");
    /// ```
    pub fn create(dialect: Dialect) -> Exporter {
        match SQLExporter::for_dialect(dialect) {
            Some(exporter) => Exporter::Relational(exporter),
            None => Exporter::Document(MongoDbExporter::new()),
        }
    }

    /// Parse a dialect selector and create its exporter
    pub fn create_for(selector: &str) -> Option<Exporter> {
        selector.parse::<Dialect>().ok().map(Self::create)
    }

    pub fn supported_dialects() -> &'static [Dialect] {
        &Dialect::ALL
    }

    pub fn is_supported(selector: &str) -> bool {
        selector.parse::<Dialect>().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_dialect_has_an_exporter() {
        for &dialect in ExporterFactory::supported_dialects() {
            let exporter = ExporterFactory::create(dialect);
            assert_eq!(exporter.dialect(), dialect);
            assert_eq!(
                matches!(exporter, Exporter::Relational(_)),
                dialect.is_relational()
            );
        }
    }

    #[test]
    fn test_create_for_selector() {
        assert!(matches!(
            ExporterFactory::create_for("mongo"),
            Some(Exporter::Document(_))
        ));
        assert_eq!(
            ExporterFactory::create_for("sqlite").map(|e| e.dialect()),
            Some(Dialect::Sqlite)
        );
        assert!(ExporterFactory::create_for("cassandra").is_none());
        assert!(!ExporterFactory::is_supported("cassandra"));
    }
}
