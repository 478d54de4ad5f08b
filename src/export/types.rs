//! Type conversion from abstract type tokens to dialect-native types.
//!
//! Relational dialects use an exact-match table per dialect. Parameterized
//! string and decimal tokens keep their parameters; SQLite folds everything
//! into one of its four storage classes. The document store uses a coarse
//! substring classification instead ([`StorageType::classify`]).

use super::dialect::Dialect;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static PARAMETERIZED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_ ]*?)\s*\((.*)\)\s*$").expect("valid regex")
});

/// A type token split into its keyword and optional parameter list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeToken<'a> {
    /// Upper-cased keyword, e.g. `VARCHAR`
    pub base: String,
    /// Raw parameter text between the parentheses, e.g. `10,2`
    pub params: Option<&'a str>,
}

impl<'a> TypeToken<'a> {
    pub fn parse(token: &'a str) -> Self {
        match PARAMETERIZED.captures(token) {
            Some(caps) => Self {
                base: caps
                    .get(1)
                    .map(|m| m.as_str().to_uppercase())
                    .unwrap_or_default(),
                params: caps.get(2).map(|m| m.as_str().trim()),
            },
            None => Self {
                base: token.trim().to_uppercase(),
                params: None,
            },
        }
    }

    /// Tokens whose parameters are carried over to the native type
    fn keeps_params(&self) -> bool {
        matches!(
            self.base.as_str(),
            "VARCHAR" | "CHAR" | "DECIMAL" | "NUMERIC"
        )
    }
}

type TypeMap = HashMap<&'static str, &'static str>;

static POSTGRES_TYPES: Lazy<TypeMap> = Lazy::new(|| {
    HashMap::from([
        ("INT", "INTEGER"),
        ("TINYINT", "SMALLINT"),
        ("MEDIUMINT", "INTEGER"),
        ("BIGINT", "BIGINT"),
        ("FLOAT", "REAL"),
        ("DOUBLE", "DOUBLE PRECISION"),
        ("DECIMAL", "DECIMAL"),
        ("NUMERIC", "NUMERIC"),
        ("CHAR", "CHAR"),
        ("VARCHAR", "VARCHAR"),
        ("TEXT", "TEXT"),
        ("TINYTEXT", "TEXT"),
        ("MEDIUMTEXT", "TEXT"),
        ("LONGTEXT", "TEXT"),
        ("BLOB", "BYTEA"),
        ("TINYBLOB", "BYTEA"),
        ("MEDIUMBLOB", "BYTEA"),
        ("LONGBLOB", "BYTEA"),
        ("BINARY", "BYTEA"),
        ("VARBINARY", "BYTEA"),
        ("DATE", "DATE"),
        ("TIME", "TIME"),
        ("DATETIME", "TIMESTAMP"),
        ("TIMESTAMP", "TIMESTAMP"),
        ("BOOLEAN", "BOOLEAN"),
        ("BOOL", "BOOLEAN"),
        ("JSON", "JSON"),
        ("UUID", "UUID"),
        ("SERIAL", "SERIAL"),
    ])
});

static MYSQL_TYPES: Lazy<TypeMap> = Lazy::new(|| {
    HashMap::from([
        ("INTEGER", "INT"),
        ("SMALLINT", "SMALLINT"),
        ("BIGINT", "BIGINT"),
        ("REAL", "FLOAT"),
        ("DOUBLE PRECISION", "DOUBLE"),
        ("DECIMAL", "DECIMAL"),
        ("NUMERIC", "DECIMAL"),
        ("CHAR", "CHAR"),
        ("VARCHAR", "VARCHAR"),
        ("TEXT", "TEXT"),
        ("BYTEA", "BLOB"),
        ("DATE", "DATE"),
        ("TIME", "TIME"),
        ("TIMESTAMP", "TIMESTAMP"),
        ("DATETIME", "DATETIME"),
        ("BOOLEAN", "BOOLEAN"),
        ("BOOL", "BOOLEAN"),
        ("JSON", "JSON"),
        ("UUID", "VARCHAR(36)"),
        ("SERIAL", "SERIAL"),
    ])
});

static SQLITE_TYPES: Lazy<TypeMap> = Lazy::new(|| {
    HashMap::from([
        ("INT", "INTEGER"),
        ("INTEGER", "INTEGER"),
        ("TINYINT", "INTEGER"),
        ("SMALLINT", "INTEGER"),
        ("MEDIUMINT", "INTEGER"),
        ("BIGINT", "INTEGER"),
        ("FLOAT", "REAL"),
        ("DOUBLE", "REAL"),
        ("DOUBLE PRECISION", "REAL"),
        ("REAL", "REAL"),
        ("DECIMAL", "REAL"),
        ("NUMERIC", "REAL"),
        ("CHAR", "TEXT"),
        ("VARCHAR", "TEXT"),
        ("TEXT", "TEXT"),
        ("TINYTEXT", "TEXT"),
        ("MEDIUMTEXT", "TEXT"),
        ("LONGTEXT", "TEXT"),
        ("BLOB", "BLOB"),
        ("TINYBLOB", "BLOB"),
        ("MEDIUMBLOB", "BLOB"),
        ("LONGBLOB", "BLOB"),
        ("BYTEA", "BLOB"),
        ("BINARY", "BLOB"),
        ("VARBINARY", "BLOB"),
        ("DATE", "TEXT"),
        ("TIME", "TEXT"),
        ("DATETIME", "TEXT"),
        ("TIMESTAMP", "TEXT"),
        ("BOOLEAN", "INTEGER"),
        ("BOOL", "INTEGER"),
        ("JSON", "TEXT"),
        ("UUID", "TEXT"),
        ("SERIAL", "INTEGER"),
    ])
});

static ORACLE_TYPES: Lazy<TypeMap> = Lazy::new(|| {
    HashMap::from([
        ("INT", "NUMBER(10)"),
        ("INTEGER", "NUMBER(10)"),
        ("TINYINT", "NUMBER(3)"),
        ("SMALLINT", "NUMBER(5)"),
        ("MEDIUMINT", "NUMBER(7)"),
        ("BIGINT", "NUMBER(19)"),
        ("FLOAT", "BINARY_FLOAT"),
        ("REAL", "BINARY_FLOAT"),
        ("DOUBLE", "BINARY_DOUBLE"),
        ("DOUBLE PRECISION", "BINARY_DOUBLE"),
        ("DECIMAL", "NUMBER"),
        ("NUMERIC", "NUMBER"),
        ("CHAR", "CHAR"),
        ("VARCHAR", "VARCHAR2"),
        ("TEXT", "CLOB"),
        ("TINYTEXT", "VARCHAR2(255)"),
        ("MEDIUMTEXT", "CLOB"),
        ("LONGTEXT", "CLOB"),
        ("BLOB", "BLOB"),
        ("TINYBLOB", "BLOB"),
        ("MEDIUMBLOB", "BLOB"),
        ("LONGBLOB", "BLOB"),
        ("BYTEA", "BLOB"),
        ("BINARY", "RAW"),
        ("VARBINARY", "RAW"),
        ("DATE", "DATE"),
        ("TIME", "TIMESTAMP"),
        ("DATETIME", "TIMESTAMP"),
        ("TIMESTAMP", "TIMESTAMP"),
        ("BOOLEAN", "NUMBER(1)"),
        ("BOOL", "NUMBER(1)"),
        ("JSON", "CLOB"),
        ("UUID", "VARCHAR2(36)"),
        ("SERIAL", "NUMBER"),
    ])
});

static SQL_SERVER_TYPES: Lazy<TypeMap> = Lazy::new(|| {
    HashMap::from([
        ("INT", "INT"),
        ("INTEGER", "INT"),
        ("TINYINT", "TINYINT"),
        ("SMALLINT", "SMALLINT"),
        ("MEDIUMINT", "INT"),
        ("BIGINT", "BIGINT"),
        ("FLOAT", "FLOAT"),
        ("DOUBLE", "FLOAT"),
        ("DOUBLE PRECISION", "FLOAT"),
        ("DECIMAL", "DECIMAL"),
        ("NUMERIC", "NUMERIC"),
        ("CHAR", "CHAR"),
        ("VARCHAR", "VARCHAR"),
        ("TEXT", "NVARCHAR(MAX)"),
        ("TINYTEXT", "NVARCHAR(255)"),
        ("MEDIUMTEXT", "NVARCHAR(MAX)"),
        ("LONGTEXT", "NVARCHAR(MAX)"),
        ("BLOB", "VARBINARY(MAX)"),
        ("TINYBLOB", "VARBINARY(255)"),
        ("MEDIUMBLOB", "VARBINARY(MAX)"),
        ("LONGBLOB", "VARBINARY(MAX)"),
        ("BYTEA", "VARBINARY(MAX)"),
        ("BINARY", "BINARY"),
        ("VARBINARY", "VARBINARY"),
        ("DATE", "DATE"),
        ("TIME", "TIME"),
        ("DATETIME", "DATETIME2"),
        ("TIMESTAMP", "DATETIME2"),
        ("BOOLEAN", "BIT"),
        ("BOOL", "BIT"),
        ("JSON", "NVARCHAR(MAX)"),
        ("UUID", "UNIQUEIDENTIFIER"),
        ("SERIAL", "INT IDENTITY(1,1)"),
    ])
});

fn type_map(dialect: Dialect) -> Option<&'static TypeMap> {
    match dialect {
        Dialect::PostgreSql => Some(&POSTGRES_TYPES),
        Dialect::MySql => Some(&MYSQL_TYPES),
        Dialect::Sqlite => Some(&SQLITE_TYPES),
        Dialect::Oracle => Some(&ORACLE_TYPES),
        Dialect::SqlServer => Some(&SQL_SERVER_TYPES),
        Dialect::MongoDb => None,
    }
}

/// Convert an abstract type token to the dialect's native type.
///
/// Unknown tokens come back unchanged, except for SQLite where anything that
/// is not in the table becomes `TEXT`. The document store has no native type
/// syntax; for it the token is returned as given (see [`StorageType`]).
///
/// # Example
///
/// ```rust
/// use erd_schema_export::export::dialect::Dialect;
/// use erd_schema_export::export::types::convert_type;
///
/// assert_eq!(convert_type(Dialect::Oracle, "VARCHAR(255)"), "VARCHAR2(255)");
/// assert_eq!(convert_type(Dialect::Sqlite, "DECIMAL(10,2)"), "REAL");
/// ```
pub fn convert_type(dialect: Dialect, token: &str) -> String {
    let Some(map) = type_map(dialect) else {
        return token.to_string();
    };
    let parsed = TypeToken::parse(token);

    if dialect == Dialect::Sqlite {
        return map
            .get(parsed.base.as_str())
            .copied()
            .unwrap_or("TEXT")
            .to_string();
    }

    match parsed.params {
        Some(params) if parsed.keeps_params() => {
            let base = map
                .get(parsed.base.as_str())
                .copied()
                .unwrap_or(parsed.base.as_str());
            format!("{base}({params})")
        }
        Some(_) => token.trim().to_string(),
        None => map
            .get(parsed.base.as_str())
            .map(|native| native.to_string())
            .unwrap_or_else(|| token.trim().to_string()),
    }
}

/// Storage type of a document field, named after the MongoDB `bsonType` aliases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    Int,
    Double,
    Bool,
    Date,
    Object,
    String,
}

impl StorageType {
    /// Classify a type token by lower-cased substring match. Missing tokens are strings.
    pub fn classify(token: Option<&str>) -> Self {
        let Some(token) = token else {
            return StorageType::String;
        };
        let lower = token.to_lowercase();
        if lower.contains("int") || lower.contains("serial") {
            StorageType::Int
        } else if ["float", "double", "decimal", "numeric"]
            .iter()
            .any(|k| lower.contains(k))
        {
            StorageType::Double
        } else if lower.contains("bool") {
            StorageType::Bool
        } else if lower.contains("date") || lower.contains("time") {
            StorageType::Date
        } else if lower.contains("json") {
            StorageType::Object
        } else {
            StorageType::String
        }
    }

    pub fn bson_type(&self) -> &'static str {
        match self {
            StorageType::Int => "int",
            StorageType::Double => "double",
            StorageType::Bool => "bool",
            StorageType::Date => "date",
            StorageType::Object => "object",
            StorageType::String => "string",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_token() {
        let token = TypeToken::parse("DECIMAL(10,2)");
        assert_eq!(token.base, "DECIMAL");
        assert_eq!(token.params, Some("10,2"));

        let token = TypeToken::parse("double precision");
        assert_eq!(token.base, "DOUBLE PRECISION");
        assert_eq!(token.params, None);
    }

    #[test]
    fn test_varchar_keeps_length_except_sqlite() {
        assert_eq!(convert_type(Dialect::PostgreSql, "VARCHAR(255)"), "VARCHAR(255)");
        assert_eq!(convert_type(Dialect::MySql, "VARCHAR(255)"), "VARCHAR(255)");
        assert_eq!(convert_type(Dialect::Oracle, "VARCHAR(255)"), "VARCHAR2(255)");
        assert_eq!(convert_type(Dialect::SqlServer, "VARCHAR(255)"), "VARCHAR(255)");
        assert_eq!(convert_type(Dialect::Sqlite, "VARCHAR(255)"), "TEXT");
    }

    #[test]
    fn test_decimal_translation() {
        assert_eq!(convert_type(Dialect::MySql, "NUMERIC(8,3)"), "DECIMAL(8,3)");
        assert_eq!(convert_type(Dialect::Oracle, "DECIMAL(10,2)"), "NUMBER(10,2)");
        assert_eq!(convert_type(Dialect::SqlServer, "NUMERIC(18,4)"), "NUMERIC(18,4)");
    }

    #[test]
    fn test_plain_tokens() {
        assert_eq!(convert_type(Dialect::PostgreSql, "INT"), "INTEGER");
        assert_eq!(convert_type(Dialect::PostgreSql, "DATETIME"), "TIMESTAMP");
        assert_eq!(convert_type(Dialect::MySql, "UUID"), "VARCHAR(36)");
        assert_eq!(convert_type(Dialect::Oracle, "BOOLEAN"), "NUMBER(1)");
        assert_eq!(convert_type(Dialect::SqlServer, "TEXT"), "NVARCHAR(MAX)");
        assert_eq!(convert_type(Dialect::Sqlite, "BOOL"), "INTEGER");
    }

    #[test]
    fn test_unknown_tokens_fall_back() {
        assert_eq!(convert_type(Dialect::PostgreSql, "GEOMETRY"), "GEOMETRY");
        assert_eq!(convert_type(Dialect::Oracle, "YEAR"), "YEAR");
        assert_eq!(convert_type(Dialect::MySql, "ENUM('a','b')"), "ENUM('a','b')");
        assert_eq!(convert_type(Dialect::Sqlite, "GEOMETRY"), "TEXT");
        assert_eq!(convert_type(Dialect::Sqlite, "ENUM('a','b')"), "TEXT");
    }

    #[test]
    fn test_classify_storage_types() {
        assert_eq!(StorageType::classify(Some("BIGINT")), StorageType::Int);
        assert_eq!(StorageType::classify(Some("SERIAL")), StorageType::Int);
        assert_eq!(StorageType::classify(Some("DECIMAL(10,2)")), StorageType::Double);
        assert_eq!(StorageType::classify(Some("BOOL")), StorageType::Bool);
        assert_eq!(StorageType::classify(Some("TIMESTAMP")), StorageType::Date);
        assert_eq!(StorageType::classify(Some("JSON")), StorageType::Object);
        assert_eq!(StorageType::classify(Some("VARCHAR(255)")), StorageType::String);
        assert_eq!(StorageType::classify(None), StorageType::String);
    }
}
