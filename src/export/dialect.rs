//! Dialect registry.
//!
//! Every target format is identified by a [`Dialect`] tag. Relational dialects
//! are described by a static [`DialectConfig`] record that drives the shared
//! generation code in [`super::sql`], [`super::column`] and [`super::constraints`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Target schema format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dialect {
    #[serde(rename = "PostgreSQL")]
    PostgreSql,
    #[serde(rename = "MySQL")]
    MySql,
    #[serde(rename = "SQLite")]
    Sqlite,
    #[serde(rename = "Oracle")]
    Oracle,
    #[serde(rename = "SQL Server")]
    SqlServer,
    #[serde(rename = "MongoDB")]
    MongoDb,
}

impl Dialect {
    /// All supported dialects in menu order
    pub const ALL: [Dialect; 6] = [
        Dialect::PostgreSql,
        Dialect::MySql,
        Dialect::Sqlite,
        Dialect::Oracle,
        Dialect::SqlServer,
        Dialect::MongoDb,
    ];

    /// Canonical display name, also used to derive file names
    pub fn name(&self) -> &'static str {
        match self {
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::MySql => "MySQL",
            Dialect::Sqlite => "SQLite",
            Dialect::Oracle => "Oracle",
            Dialect::SqlServer => "SQL Server",
            Dialect::MongoDb => "MongoDB",
        }
    }

    /// File extension of the generated artifact, including the dot
    pub fn file_extension(&self) -> &'static str {
        match self {
            Dialect::MongoDb => ".js",
            _ => ".sql",
        }
    }

    pub fn is_relational(&self) -> bool {
        self.config().is_some()
    }

    /// Configuration record for relational dialects, `None` for the document store
    pub fn config(&self) -> Option<&'static DialectConfig> {
        match self {
            Dialect::PostgreSql => Some(&POSTGRES),
            Dialect::MySql => Some(&MYSQL),
            Dialect::Sqlite => Some(&SQLITE),
            Dialect::Oracle => Some(&ORACLE),
            Dialect::SqlServer => Some(&SQL_SERVER),
            Dialect::MongoDb => None,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a dialect selector is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported database type: {0}")]
pub struct UnknownDialect(pub String);

impl FromStr for Dialect {
    type Err = UnknownDialect;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "postgresql" | "postgres" | "pg" => Ok(Dialect::PostgreSql),
            "mysql" | "mariadb" => Ok(Dialect::MySql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "oracle" => Ok(Dialect::Oracle),
            "sql server" | "sqlserver" | "sql_server" | "mssql" => Ok(Dialect::SqlServer),
            "mongodb" | "mongo" => Ok(Dialect::MongoDb),
            _ => Err(UnknownDialect(s.to_string())),
        }
    }
}

/// Case folding applied to identifiers before quoting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierCase {
    Preserve,
    Upper,
}

/// Where a family of constraints is declared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintPlacement {
    /// As keywords on the column definition line
    Column,
    /// As clauses inside the CREATE TABLE body
    TableBody,
    /// As standalone `ALTER TABLE ... ADD CONSTRAINT` statements
    AlterTable,
}

/// How integer primary keys get their values generated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoIncrement {
    /// Nothing emitted (the type itself, e.g. SERIAL, carries the behaviour)
    None,
    /// Keyword placed on the column line
    Inline(&'static str),
    /// Separate sequence plus before-insert trigger
    SequenceTrigger,
}

/// Static description of one relational dialect
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialectConfig {
    pub dialect: Dialect,
    /// Opening and closing identifier quote characters
    pub quote: (char, char),
    pub identifier_case: IdentifierCase,
    /// Placement of primary key and unique constraints
    pub key_placement: ConstraintPlacement,
    /// Placement of foreign key constraints
    pub foreign_key_placement: ConstraintPlacement,
    pub auto_increment: AutoIncrement,
    /// Nullable columns are marked with an explicit `NULL`
    pub explicit_null: bool,
    /// Native spelling of the `CURRENT_TIMESTAMP` default
    pub now_function: &'static str,
    pub header_statements: &'static [&'static str],
    /// Appended after the closing parenthesis of CREATE TABLE
    pub table_suffix: &'static str,
}

impl DialectConfig {
    /// Quote and escape an identifier.
    ///
    /// # Security
    ///
    /// Embedded closing quote characters are escaped by doubling them, so a
    /// crafted table or column name cannot terminate the identifier early.
    pub fn quote_identifier(&self, identifier: &str) -> String {
        let folded = self.fold_case(identifier);
        let (open, close) = self.quote;
        let escaped = folded.replace(close, &format!("{close}{close}"));
        format!("{open}{escaped}{close}")
    }

    /// Apply the dialect's identifier case folding without quoting
    pub fn fold_case(&self, identifier: &str) -> String {
        match self.identifier_case {
            IdentifierCase::Preserve => identifier.to_string(),
            IdentifierCase::Upper => identifier.to_uppercase(),
        }
    }

    /// Whether primary key and unique markers go on the column line
    pub fn inline_keys(&self) -> bool {
        self.key_placement == ConstraintPlacement::Column
    }
}

pub static POSTGRES: DialectConfig = DialectConfig {
    dialect: Dialect::PostgreSql,
    quote: ('"', '"'),
    identifier_case: IdentifierCase::Preserve,
    key_placement: ConstraintPlacement::Column,
    foreign_key_placement: ConstraintPlacement::AlterTable,
    auto_increment: AutoIncrement::None,
    explicit_null: false,
    now_function: "CURRENT_TIMESTAMP",
    header_statements: &[],
    table_suffix: "",
};

pub static MYSQL: DialectConfig = DialectConfig {
    dialect: Dialect::MySql,
    quote: ('`', '`'),
    identifier_case: IdentifierCase::Preserve,
    key_placement: ConstraintPlacement::Column,
    foreign_key_placement: ConstraintPlacement::AlterTable,
    auto_increment: AutoIncrement::Inline("AUTO_INCREMENT"),
    explicit_null: false,
    now_function: "CURRENT_TIMESTAMP",
    header_statements: &[],
    table_suffix: " ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
};

pub static SQLITE: DialectConfig = DialectConfig {
    dialect: Dialect::Sqlite,
    quote: ('"', '"'),
    identifier_case: IdentifierCase::Preserve,
    key_placement: ConstraintPlacement::Column,
    foreign_key_placement: ConstraintPlacement::TableBody,
    auto_increment: AutoIncrement::Inline("AUTOINCREMENT"),
    explicit_null: false,
    now_function: "CURRENT_TIMESTAMP",
    header_statements: &["PRAGMA foreign_keys = ON;"],
    table_suffix: "",
};

pub static ORACLE: DialectConfig = DialectConfig {
    dialect: Dialect::Oracle,
    quote: ('"', '"'),
    identifier_case: IdentifierCase::Upper,
    key_placement: ConstraintPlacement::AlterTable,
    foreign_key_placement: ConstraintPlacement::AlterTable,
    auto_increment: AutoIncrement::SequenceTrigger,
    explicit_null: false,
    now_function: "CURRENT_TIMESTAMP",
    header_statements: &[],
    table_suffix: "",
};

pub static SQL_SERVER: DialectConfig = DialectConfig {
    dialect: Dialect::SqlServer,
    quote: ('[', ']'),
    identifier_case: IdentifierCase::Preserve,
    key_placement: ConstraintPlacement::AlterTable,
    foreign_key_placement: ConstraintPlacement::AlterTable,
    auto_increment: AutoIncrement::Inline("IDENTITY(1,1)"),
    explicit_null: true,
    now_function: "GETDATE()",
    header_statements: &[],
    table_suffix: "",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_aliases() {
        assert_eq!("PostgreSQL".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
        assert_eq!("postgres".parse::<Dialect>().unwrap(), Dialect::PostgreSql);
        assert_eq!("SQL Server".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!(" mssql ".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!("MongoDB".parse::<Dialect>().unwrap(), Dialect::MongoDb);
        assert_eq!(
            "db2".parse::<Dialect>(),
            Err(UnknownDialect("db2".to_string()))
        );
    }

    #[test]
    fn test_display_roundtrips_through_parse() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.to_string().parse::<Dialect>().unwrap(), dialect);
        }
    }

    #[test]
    fn test_quote_identifier_escapes() {
        assert_eq!(POSTGRES.quote_identifier("user\"name"), "\"user\"\"name\"");
        assert_eq!(MYSQL.quote_identifier("a`b"), "`a``b`");
        assert_eq!(SQL_SERVER.quote_identifier("odd]name"), "[odd]]name]");
        assert_eq!(ORACLE.quote_identifier("users"), "\"USERS\"");
    }

    #[test]
    fn test_only_document_store_has_no_config() {
        let relational: Vec<_> = Dialect::ALL.iter().filter(|d| d.is_relational()).collect();
        assert_eq!(relational.len(), 5);
        assert!(!Dialect::MongoDb.is_relational());
        assert_eq!(Dialect::MongoDb.file_extension(), ".js");
        assert_eq!(Dialect::Oracle.file_extension(), ".sql");
    }
}
