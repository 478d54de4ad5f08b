//! Validation module tests

use erd_schema_export::models::{Column, DataModel, RelationshipKind, Table};
use erd_schema_export::validation::{
    KeyMismatchKind, RelationshipValidator, TableValidator, UnresolvedKind, validate_model,
};

fn fk(name: &str, table: &str) -> Column {
    Column::new(name, "INT").references(table, "id", RelationshipKind::ManyToOne)
}

mod table_validation_tests {
    use super::*;

    #[test]
    fn test_editor_payload_with_problems() {
        let json = r#"[
            { "name": "users", "columns": [
                { "name": "id", "type": "INT", "isPrimaryKey": true },
                { "name": "id", "type": "INT" }
            ] },
            { "name": "users", "columns": [ { "name": "id", "type": "INT" } ] },
            { "name": "orders", "columns": [
                { "name": "user_id", "type": "INT", "isForeignKey": true }
            ] }
        ]"#;
        let model = DataModel::from_json(json).unwrap();
        let result = TableValidator::new().validate(&model.tables);

        assert_eq!(result.naming_conflicts.len(), 1);
        assert_eq!(result.duplicate_columns.len(), 1);
        assert_eq!(result.key_mismatches.len(), 1);
        assert_eq!(
            result.key_mismatches[0].kind,
            KeyMismatchKind::FlagWithoutReference
        );
    }
}

mod relationship_validation_tests {
    use super::*;

    #[test]
    fn test_two_independent_cycles() {
        let tables = vec![
            Table::new("a", vec![Column::new("id", "INT"), fk("b_id", "b")]),
            Table::new("b", vec![Column::new("id", "INT"), fk("a_id", "a")]),
            Table::new("x", vec![Column::new("id", "INT"), fk("y_id", "y")]),
            Table::new("y", vec![Column::new("id", "INT"), fk("x_id", "x")]),
        ];
        let cycles = RelationshipValidator::new().detect_circular_dependencies(&tables);
        let paths: Vec<_> = cycles.into_iter().map(|c| c.cycle_path).collect();
        assert_eq!(paths, vec![vec!["a", "b"], vec!["x", "y"]]);
    }

    #[test]
    fn test_reference_to_columnless_table() {
        let tables = vec![
            Table::new("archive", vec![]),
            Table::new("orders", vec![fk("archive_id", "archive")]),
        ];
        let unresolved = RelationshipValidator::new().detect_unresolved_references(&tables);
        assert_eq!(unresolved.len(), 1);
        assert_eq!(unresolved[0].kind, UnresolvedKind::MissingTable);
    }
}

mod report_tests {
    use super::*;

    #[test]
    fn test_report_lists_cycle() {
        let tables = vec![
            Table::new("a", vec![Column::new("id", "INT"), fk("b_id", "b")]),
            Table::new("b", vec![Column::new("id", "INT"), fk("a_id", "a")]),
        ];
        let report = validate_model(&tables);
        assert!(!report.is_clean());
        assert_eq!(
            report.warnings(),
            vec!["Circular foreign key dependency between tables: a, b".to_string()]
        );
    }

    #[test]
    fn test_self_reference_is_clean() {
        let tables = vec![Table::new(
            "employees",
            vec![Column::new("id", "INT").primary_key(), fk("manager_id", "employees")],
        )];
        let report = validate_model(&tables);
        assert!(report.is_clean());
        assert_eq!(report.relationships.self_references.len(), 1);
    }
}
