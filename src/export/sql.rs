//! SQL exporter for generating relational DDL scripts from data models.
//!
//! One generation path serves every relational dialect; the differences are
//! read from the dialect's [`DialectConfig`].
//!
//! # Security
//!
//! All identifiers (table names, column names, constraint names) are quoted
//! and escaped through [`DialectConfig::quote_identifier`]. Internal quote
//! characters are escaped by doubling them according to SQL standards.

use super::column::table_column_definitions;
use super::constraints::{inline_foreign_keys, inline_primary_key, table_constraints};
use super::context::ExportContext;
use super::dialect::{AutoIncrement, Dialect, DialectConfig};
use crate::models::{Column, Table};

/// Exporter for SQL CREATE TABLE scripts.
#[derive(Debug, Clone, Copy)]
pub struct SQLExporter {
    config: &'static DialectConfig,
}

impl SQLExporter {
    pub fn new(config: &'static DialectConfig) -> Self {
        Self { config }
    }

    /// Exporter for a relational dialect, `None` for the document store
    pub fn for_dialect(dialect: Dialect) -> Option<Self> {
        dialect.config().map(Self::new)
    }

    pub fn dialect(&self) -> Dialect {
        self.config.dialect
    }

    /// Export a table to one CREATE TABLE statement.
    ///
    /// # Arguments
    ///
    /// * `ctx` - The export context, used to resolve inline foreign keys
    /// * `table` - The table to export
    ///
    /// # Returns
    ///
    /// The statement, preceded by a comment line when the table has a description.
    ///
    /// # Example
    ///
    /// ```rust
    /// use erd_schema_export::export::context::ExportContext;
    /// use erd_schema_export::export::dialect::POSTGRES;
    /// use erd_schema_export::export::sql::SQLExporter;
    /// use erd_schema_export::models::{Column, Table};
    ///
    /// let tables = vec![Table::new("users", vec![Column::new("id", "INT").primary_key()])];
    /// let ctx = ExportContext::new(&tables);
    ///
    /// let sql = SQLExporter::new(&POSTGRES).export_table(&ctx, &tables[0]);
    /// assert_eq!(sql, "CREATE TABLE \"users\" (\n  \"id\" INTEGER PRIMARY KEY NOT NULL\n);");
    /// ```
    pub fn export_table(&self, ctx: &ExportContext<'_>, table: &Table) -> String {
        let config = self.config;
        let mut sql = String::new();

        if let Some(description) = table.description.as_deref().filter(|d| !d.trim().is_empty()) {
            for line in description.lines() {
                sql.push_str(&format!("-- {}\n", line.trim_end()));
            }
        }

        let body: Vec<String> = table_column_definitions(config, table)
            .into_iter()
            .chain(inline_primary_key(config, table))
            .chain(inline_foreign_keys(config, ctx, table))
            .map(|line| format!("  {line}"))
            .collect();

        sql.push_str(&format!(
            "CREATE TABLE {} (\n{}\n){};",
            config.quote_identifier(&table.name),
            body.join(",\n"),
            config.table_suffix
        ));
        sql
    }

    /// Export every exportable table of the context to one script.
    ///
    /// Blocks (header, one per table, sequences, triggers, constraints) are
    /// separated by a blank line and the script ends with a newline.
    pub fn export(&self, ctx: &ExportContext<'_>) -> String {
        let config = self.config;
        let mut blocks: Vec<String> = Vec::new();

        if !config.header_statements.is_empty() {
            blocks.push(config.header_statements.join("\n"));
        }

        for table in ctx.tables() {
            blocks.push(self.export_table(ctx, table));
        }

        if config.auto_increment == AutoIncrement::SequenceTrigger {
            let generated: Vec<(&Table, &Column)> = ctx
                .tables()
                .iter()
                .filter(|table| !table.has_composite_key())
                .flat_map(|&table| {
                    table
                        .primary_key_columns()
                        .filter(|c| c.is_integer_typed())
                        .map(move |column| (table, column))
                })
                .collect();

            if !generated.is_empty() {
                let sequences: Vec<String> = generated
                    .iter()
                    .map(|(table, column)| self.sequence_statement(table, column))
                    .collect();
                blocks.push(format!("-- Sequences\n{}", sequences.join("\n")));

                let triggers: Vec<String> = generated
                    .iter()
                    .map(|(table, column)| self.trigger_statement(table, column))
                    .collect();
                blocks.push(format!("-- Triggers\n{}", triggers.join("\n\n")));
            }
        }

        let constraints: Vec<String> = ctx
            .tables()
            .iter()
            .flat_map(|table| table_constraints(config, ctx, table))
            .collect();
        if !constraints.is_empty() {
            blocks.push(format!("-- Constraints\n{}", constraints.join("\n")));
        }

        let mut script = blocks.join("\n\n");
        script.push('\n');
        script
    }

    fn sequence_name(table: &Table, column: &Column) -> String {
        format!("{}_{}_SEQ", table.name, column.name)
    }

    fn sequence_statement(&self, table: &Table, column: &Column) -> String {
        format!(
            "CREATE SEQUENCE {} START WITH 1 INCREMENT BY 1;",
            self.config
                .quote_identifier(&Self::sequence_name(table, column))
        )
    }

    /// Before-insert trigger that draws from the column's sequence when no value is given
    fn trigger_statement(&self, table: &Table, column: &Column) -> String {
        let q = |identifier: &str| self.config.quote_identifier(identifier);
        let trigger = format!("{}_{}_TRG", table.name, column.name);
        let sequence = Self::sequence_name(table, column);
        let column_name = q(&column.name);

        format!(
            "CREATE OR REPLACE TRIGGER {trigger}\n\
             BEFORE INSERT ON {table}\n\
             FOR EACH ROW\n\
             BEGIN\n  \
             IF :NEW.{column_name} IS NULL THEN\n    \
             SELECT {sequence}.NEXTVAL INTO :NEW.{column_name} FROM DUAL;\n  \
             END IF;\n\
             END;\n\
             /",
            trigger = q(&trigger),
            table = q(&table.name),
            sequence = q(&sequence),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::dialect::{MYSQL, ORACLE, POSTGRES, SQL_SERVER, SQLITE};
    use crate::models::RelationshipKind;

    fn users_orders() -> Vec<Table> {
        vec![
            Table::new(
                "users",
                vec![
                    Column::new("id", "INT").primary_key(),
                    Column::new("email", "VARCHAR(255)").unique().nullable(false),
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

    #[test]
    fn test_postgres_script() {
        let tables = users_orders();
        let ctx = ExportContext::new(&tables);
        let sql = SQLExporter::new(&POSTGRES).export(&ctx);
        assert_eq!(
            sql,
            "CREATE TABLE \"users\" (\n  \"id\" INTEGER PRIMARY KEY NOT NULL,\n  \"email\" VARCHAR(255) UNIQUE NOT NULL\n);\n\n\
             CREATE TABLE \"orders\" (\n  \"id\" INTEGER PRIMARY KEY NOT NULL,\n  \"user_id\" INTEGER\n);\n\n\
             -- Constraints\n\
             ALTER TABLE \"orders\" ADD CONSTRAINT \"FK_orders_user_id\" FOREIGN KEY (\"user_id\") REFERENCES \"users\"(\"id\");\n"
        );
    }

    #[test]
    fn test_mysql_table_suffix() {
        let tables = users_orders();
        let ctx = ExportContext::new(&tables);
        let sql = SQLExporter::new(&MYSQL).export_table(&ctx, &tables[0]);
        assert!(sql.ends_with(") ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;"));
        assert!(sql.contains("`id` INT AUTO_INCREMENT PRIMARY KEY NOT NULL"));
    }

    #[test]
    fn test_sqlite_inline_foreign_keys_and_pragma() {
        let tables = users_orders();
        let ctx = ExportContext::new(&tables);
        let sql = SQLExporter::new(&SQLITE).export(&ctx);
        assert!(sql.starts_with("PRAGMA foreign_keys = ON;\n\n"));
        assert!(sql.contains(
            "  \"user_id\" INTEGER,\n  FOREIGN KEY (\"user_id\") REFERENCES \"users\"(\"id\")\n);"
        ));
        assert!(!sql.contains("ALTER TABLE"));
        assert!(!sql.contains("-- Constraints"));
    }

    #[test]
    fn test_oracle_sequences_and_triggers() {
        let tables = users_orders();
        let ctx = ExportContext::new(&tables);
        let sql = SQLExporter::new(&ORACLE).export(&ctx);

        assert!(sql.contains("-- Sequences\nCREATE SEQUENCE \"USERS_ID_SEQ\" START WITH 1 INCREMENT BY 1;\nCREATE SEQUENCE \"ORDERS_ID_SEQ\""));
        assert!(sql.contains("CREATE OR REPLACE TRIGGER \"USERS_ID_TRG\"\nBEFORE INSERT ON \"USERS\"\n"));
        assert!(sql.contains("  IF :NEW.\"ID\" IS NULL THEN\n    SELECT \"USERS_ID_SEQ\".NEXTVAL INTO :NEW.\"ID\" FROM DUAL;\n  END IF;\nEND;\n/"));

        let sequences = sql.find("-- Sequences").unwrap();
        let triggers = sql.find("-- Triggers").unwrap();
        let constraints = sql.find("-- Constraints").unwrap();
        assert!(sequences < triggers && triggers < constraints);
    }

    #[test]
    fn test_oracle_skips_sequences_without_integer_keys() {
        let tables = vec![Table::new(
            "codes",
            vec![Column::new("code", "VARCHAR(10)").primary_key()],
        )];
        let ctx = ExportContext::new(&tables);
        let sql = SQLExporter::new(&ORACLE).export(&ctx);
        assert!(!sql.contains("-- Sequences"));
        assert!(!sql.contains("-- Triggers"));
        assert!(sql.contains("ADD CONSTRAINT \"PK_CODES_CODE\" PRIMARY KEY (\"CODE\");"));
    }

    #[test]
    fn test_sql_server_constraint_order() {
        let tables = users_orders();
        let ctx = ExportContext::new(&tables);
        let sql = SQLExporter::new(&SQL_SERVER).export(&ctx);
        let banner = sql.split("-- Constraints\n").nth(1).unwrap();
        let statements: Vec<&str> = banner.lines().collect();
        assert_eq!(
            statements,
            vec![
                "ALTER TABLE [users] ADD CONSTRAINT [PK_users_id] PRIMARY KEY ([id]);",
                "ALTER TABLE [users] ADD CONSTRAINT [UK_users_email] UNIQUE ([email]);",
                "ALTER TABLE [orders] ADD CONSTRAINT [PK_orders_id] PRIMARY KEY ([id]);",
                "ALTER TABLE [orders] ADD CONSTRAINT [FK_orders_user_id] FOREIGN KEY ([user_id]) REFERENCES [users]([id]);",
            ]
        );
    }

    fn order_items() -> Vec<Table> {
        vec![Table::new(
            "order_items",
            vec![
                Column::new("order_id", "INT").primary_key(),
                Column::new("product_id", "INT").primary_key(),
                Column::new("qty", "INT"),
            ],
        )]
    }

    #[test]
    fn test_composite_key_declared_once_in_table_body() {
        let tables = order_items();
        let ctx = ExportContext::new(&tables);

        let pg = SQLExporter::new(&POSTGRES).export(&ctx);
        assert_eq!(
            pg,
            "CREATE TABLE \"order_items\" (\n  \"order_id\" INTEGER NOT NULL,\n  \"product_id\" INTEGER NOT NULL,\n  \"qty\" INTEGER,\n  PRIMARY KEY (\"order_id\", \"product_id\")\n);\n"
        );

        let mysql = SQLExporter::new(&MYSQL).export(&ctx);
        assert_eq!(mysql.matches("PRIMARY KEY").count(), 1);
        assert!(!mysql.contains("AUTO_INCREMENT"));
        assert!(mysql.contains("  PRIMARY KEY (`order_id`, `product_id`)\n) ENGINE=InnoDB"));

        let sqlite = SQLExporter::new(&SQLITE).export(&ctx);
        assert_eq!(sqlite.matches("PRIMARY KEY").count(), 1);
        assert!(!sqlite.contains("AUTOINCREMENT"));
    }

    #[test]
    fn test_composite_key_deferred_dialects_skip_generated_values() {
        let tables = order_items();
        let ctx = ExportContext::new(&tables);

        let oracle = SQLExporter::new(&ORACLE).export(&ctx);
        assert!(!oracle.contains("-- Sequences"));
        assert!(oracle.contains(
            "ADD CONSTRAINT \"PK_ORDER_ITEMS_ORDER_ID_PRODUCT_ID\" PRIMARY KEY (\"ORDER_ID\", \"PRODUCT_ID\");"
        ));

        let mssql = SQLExporter::new(&SQL_SERVER).export(&ctx);
        assert!(!mssql.contains("IDENTITY"));
        assert_eq!(mssql.matches("PRIMARY KEY").count(), 1);
    }

    #[test]
    fn test_description_comment() {
        let tables = vec![
            Table::new("audit", vec![Column::new("id", "INT")])
                .with_description("Audit trail\nkept forever"),
        ];
        let ctx = ExportContext::new(&tables);
        let sql = SQLExporter::new(&POSTGRES).export_table(&ctx, &tables[0]);
        assert!(sql.starts_with("-- Audit trail\n-- kept forever\nCREATE TABLE \"audit\""));
    }

    #[test]
    fn test_columnless_tables_skipped() {
        let tables = vec![
            Table::new("empty", vec![]),
            Table::new("users", vec![Column::new("id", "INT")]),
        ];
        let ctx = ExportContext::new(&tables);
        let sql = SQLExporter::new(&MYSQL).export(&ctx);
        assert!(!sql.contains("`empty`"));
        assert_eq!(sql.matches("CREATE TABLE").count(), 1);
    }
}
