//! Export service: the entry point used by editors and the CLI.
//!
//! Validates the request, drives the exporter for the selected dialect and
//! packages the artifact with its file name and MIME type. Validation always
//! completes before any generation starts, and delivery only ever sees a
//! finished artifact.

use super::config::ExportOptions;
use super::context::ExportContext;
use super::dialect::Dialect;
use super::factory::ExporterFactory;
use super::{ExportError, ExportResult};
use crate::delivery::{DeliveryReceipt, FileDelivery};
use crate::models::Table;
use crate::validation::validate_model;
use chrono::{NaiveDate, Utc};
use tracing::{debug, info};

/// Resolve the MIME type of a file extension (including the dot)
pub fn mime_type_for(extension: &str) -> &'static str {
    match extension {
        ".sql" => "application/sql",
        ".js" => "application/javascript",
        ".json" => "application/json",
        _ => "text/plain",
    }
}

/// Deterministic artifact name: `{prefix}_{dialect}_{YYYY-MM-DD}{ext}`, where the
/// dialect name is lower-cased and whitespace runs become `_`
pub fn artifact_filename(prefix: &str, dialect: Dialect, date: NaiveDate) -> String {
    let sanitized = dialect
        .name()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_");
    format!(
        "{}_{}_{}{}",
        prefix,
        sanitized,
        date.format("%Y-%m-%d"),
        dialect.file_extension()
    )
}

/// Schema export service
#[derive(Debug, Clone, Default)]
pub struct ExportService {
    options: ExportOptions,
}

impl ExportService {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export tables to the dialect named by `dialect`.
    ///
    /// # Arguments
    ///
    /// * `tables` - The model's tables in display order
    /// * `dialect` - Dialect selector, case-insensitive (e.g. "PostgreSQL", "mssql", "mongo")
    ///
    /// # Returns
    ///
    /// The artifact with its file name, MIME type and resolved dialect.
    ///
    /// # Example
    ///
    /// ```rust
    /// use erd_schema_export::export::ExportService;
    /// use erd_schema_export::models::{Column, Table};
    ///
    /// let tables = vec![Table::new("users", vec![Column::new("id", "INT").primary_key()])];
    /// let result = ExportService::default().export(&tables, "MySQL").unwrap();
    /// assert!(result.content.contains("CREATE TABLE `users`"));
    /// assert_eq!(result.mime_type, "application/sql");
    /// ```
    pub fn export(&self, tables: &[Table], dialect: &str) -> Result<ExportResult, ExportError> {
        let dialect = dialect
            .parse::<Dialect>()
            .map_err(|e| ExportError::UnsupportedDialect(e.0))?;
        self.export_dialect(tables, dialect)
    }

    /// Export with today's date (UTC) in the file name
    pub fn export_dialect(
        &self,
        tables: &[Table],
        dialect: Dialect,
    ) -> Result<ExportResult, ExportError> {
        self.export_on(tables, dialect, Utc::now().date_naive())
    }

    /// Export with an explicit date in the file name
    pub fn export_on(
        &self,
        tables: &[Table],
        dialect: Dialect,
        date: NaiveDate,
    ) -> Result<ExportResult, ExportError> {
        let ctx = self.validate(tables)?;

        info!(
            "Exporting {} of {} tables to {}",
            ctx.tables().len(),
            tables.len(),
            dialect
        );

        let exporter = ExporterFactory::create(dialect);
        let content = exporter
            .export(&ctx)
            .map_err(|source| ExportError::GenerationFailed { dialect, source })?;

        let extension = exporter.file_extension();
        let result = ExportResult {
            filename: artifact_filename(&self.options.filename_prefix, dialect, date),
            mime_type: mime_type_for(extension).to_string(),
            dialect,
            content,
        };
        debug!(
            "Generated {} ({} bytes)",
            result.filename,
            result.content.len()
        );
        Ok(result)
    }

    /// Export and hand the artifact to a delivery backend.
    ///
    /// The backend is not called when the export fails; delivery failures are
    /// reported as [`ExportError::Delivery`].
    pub async fn export_and_deliver<D>(
        &self,
        tables: &[Table],
        dialect: &str,
        delivery: &D,
    ) -> Result<(ExportResult, DeliveryReceipt), ExportError>
    where
        D: FileDelivery + ?Sized,
    {
        let result = self.export(tables, dialect)?;
        let receipt = delivery
            .deliver(&result.content, &result.filename, &result.mime_type)
            .await?;
        Ok((result, receipt))
    }

    /// Upfront checks; returns the context generation runs on
    fn validate<'a>(&self, tables: &'a [Table]) -> Result<ExportContext<'a>, ExportError> {
        if tables.is_empty() {
            return Err(ExportError::EmptyModel);
        }

        let ctx = ExportContext::new(tables);
        if ctx.is_empty() {
            return Err(ExportError::NoExportableTables);
        }

        if self.options.log_diagnostics {
            validate_model(tables).log_warnings();
        }

        if self.options.strict_references
            && let Some((table, column, reference)) = ctx.unresolved_references().first()
        {
            return Err(ExportError::UnresolvedReference {
                table: table.name.clone(),
                column: column.name.clone(),
                target: format!("{}.{}", reference.table, reference.column),
            });
        }

        Ok(ctx)
    }

    /// All supported dialects in menu order
    pub fn supported_dialects() -> &'static [Dialect] {
        ExporterFactory::supported_dialects()
    }

    pub fn is_supported(dialect: &str) -> bool {
        ExporterFactory::is_supported(dialect)
    }

    pub fn file_extension(dialect: Dialect) -> &'static str {
        ExporterFactory::create(dialect).file_extension()
    }

    pub fn mime_type_for(extension: &str) -> &'static str {
        mime_type_for(extension)
    }
}
