//! Delivery tests

use async_trait::async_trait;
use erd_schema_export::delivery::{
    DeliveryError, DeliveryReceipt, FileDelivery, FileSystemDelivery, MemoryDelivery,
};
use erd_schema_export::export::{ExportError, ExportOptions, ExportService};
use erd_schema_export::models::{Column, RelationshipKind, Table};
use tempfile::TempDir;

fn users_orders() -> Vec<Table> {
    vec![
        Table::new(
            "users",
            vec![
                Column::new("id", "INT").primary_key(),
                Column::new("email", "VARCHAR(255)").unique(),
            ],
        ),
        Table::new(
            "orders",
            vec![
                Column::new("id", "INT").primary_key(),
                Column::new("user_id", "INT").references("users", "id", RelationshipKind::OneToMany),
            ],
        ),
    ]
}

/// Backend that always fails
struct BrokenDelivery;

#[async_trait(?Send)]
impl FileDelivery for BrokenDelivery {
    async fn deliver(
        &self,
        _content: &str,
        _filename: &str,
        _mime_type: &str,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        Err(DeliveryError::Backend("quota exceeded".to_string()))
    }
}

mod memory_delivery_tests {
    use super::*;

    #[tokio::test]
    async fn test_receives_content_filename_and_mime_type() {
        let delivery = MemoryDelivery::new();
        let (result, receipt) = ExportService::default()
            .export_and_deliver(&users_orders(), "PostgreSQL", &delivery)
            .await
            .unwrap();

        let files = delivery.files();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].content, result.content);
        assert_eq!(files[0].filename, result.filename);
        assert_eq!(files[0].mime_type, "application/sql");
        assert_eq!(receipt.bytes, result.content.len());
    }

    #[tokio::test]
    async fn test_no_delivery_on_invalid_input() {
        let delivery = MemoryDelivery::new();
        let service = ExportService::default();

        let empty = service.export_and_deliver(&[], "MySQL", &delivery).await;
        assert!(matches!(empty, Err(ExportError::EmptyModel)));

        let columnless = service
            .export_and_deliver(&[Table::new("t", vec![])], "MySQL", &delivery)
            .await;
        assert!(matches!(columnless, Err(ExportError::NoExportableTables)));

        let unknown = service
            .export_and_deliver(&users_orders(), "Informix", &delivery)
            .await;
        assert!(matches!(unknown, Err(ExportError::UnsupportedDialect(_))));

        assert!(delivery.is_empty());
    }

    #[tokio::test]
    async fn test_no_delivery_on_strict_reference_failure() {
        let delivery = MemoryDelivery::new();
        let tables = vec![Table::new(
            "orders",
            vec![Column::new("user_id", "INT").references("users", "id", RelationshipKind::ManyToOne)],
        )];
        let result = ExportService::new(ExportOptions::strict())
            .export_and_deliver(&tables, "SQLite", &delivery)
            .await;
        assert!(matches!(result, Err(ExportError::UnresolvedReference { .. })));
        assert!(delivery.is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failure_is_distinct() {
        let err = ExportService::default()
            .export_and_deliver(&users_orders(), "MongoDB", &BrokenDelivery)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ExportError::Delivery(DeliveryError::Backend(ref msg)) if msg == "quota exceeded"
        ));
    }
}

mod filesystem_delivery_tests {
    use super::*;

    #[tokio::test]
    async fn test_writes_export_to_directory() {
        let temp = TempDir::new().unwrap();
        let delivery = FileSystemDelivery::new(temp.path());

        let (result, receipt) = ExportService::default()
            .export_and_deliver(&users_orders(), "Oracle", &delivery)
            .await
            .unwrap();

        let written = std::fs::read_to_string(temp.path().join(&result.filename)).unwrap();
        assert_eq!(written, result.content);
        assert!(receipt.location.ends_with(&result.filename));
    }

    #[tokio::test]
    async fn test_dyn_backend() {
        let temp = TempDir::new().unwrap();
        let delivery: Box<dyn FileDelivery> = Box::new(FileSystemDelivery::new(temp.path()));
        let (result, _) = ExportService::default()
            .export_and_deliver(&users_orders(), "sqlite", delivery.as_ref())
            .await
            .unwrap();
        assert!(temp.path().join(result.filename).exists());
    }
}
