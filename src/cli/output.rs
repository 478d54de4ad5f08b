//! Output formatting for CLI

use crate::delivery::DeliveryReceipt;
use crate::export::{Dialect, ExportResult};
use crate::validation::ValidationReport;

/// One line per dialect: canonical name, accepted selector and file extension
pub fn format_dialect_list(dialects: &[Dialect]) -> String {
    let mut output = String::from("Supported dialects:\n");
    for dialect in dialects {
        output.push_str(&format!(
            "  {:<12} {:<12} {}\n",
            dialect.name(),
            dialect.name().to_lowercase().replace(' ', ""),
            dialect.file_extension()
        ));
    }
    output
}

/// Validation findings, or a success line when there are none
pub fn format_validation_report(report: &ValidationReport) -> String {
    let warnings = report.warnings();
    if warnings.is_empty() {
        return "✅ Model is valid\n".to_string();
    }

    let mut output = format!("⚠️  {} finding(s):\n", warnings.len());
    for warning in warnings {
        output.push_str(&format!("  - {}\n", warning));
    }
    output
}

/// Summary printed after a file was written
pub fn format_export_summary(result: &ExportResult, receipt: &DeliveryReceipt) -> String {
    format!(
        "✅ Exported {} schema to {} ({} bytes, {})\n",
        result.dialect, receipt.location, receipt.bytes, receipt.mime_type
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_list() {
        let output = format_dialect_list(&Dialect::ALL);
        assert!(output.contains("SQL Server"));
        assert!(output.contains("sqlserver"));
        assert!(output.contains(".js"));
        assert_eq!(output.lines().count(), 7);
    }

    #[test]
    fn test_clean_report() {
        assert_eq!(
            format_validation_report(&ValidationReport::default()),
            "✅ Model is valid\n"
        );
    }
}
