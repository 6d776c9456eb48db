use std::fmt;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// SQL type of a relation column.
///
/// Type names coming from a schema provider are matched case-insensitively.
/// Names this crate does not know are kept verbatim in [`SqlType::Other`] so
/// that a newer schema never fails to load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SqlType {
    Boolean,
    TinyInt,
    SmallInt,
    Integer,
    BigInt,
    Varchar,
    Char,
    Double,
    Real,
    Decimal,
    Time,
    Date,
    Timestamp,
    Array,
    Binary,
    Varbinary,
    Interval,
    Struct,
    Map,
    Null,
    Uuid,
    Variant,
    /// A type name this crate does not know. Never holds the name of one of
    /// the variants above: build it through [`SqlType::from`] or
    /// [`SqlType::other`] so that it survives a serde round trip.
    Other(String),
}

/// Types for which random generation settings are offered.
pub const RNG_SUPPORTED_TYPES: &[SqlType] = &[
    SqlType::Boolean,
    SqlType::TinyInt,
    SqlType::SmallInt,
    SqlType::Integer,
    SqlType::BigInt,
    SqlType::Varchar,
    SqlType::Char,
    SqlType::Double,
    SqlType::Real,
    SqlType::Decimal,
    SqlType::Time,
    SqlType::Date,
    SqlType::Timestamp,
    SqlType::Array,
];

/// Returns true when `sql_type` is eligible for random generation.
pub fn is_supported(sql_type: &SqlType) -> bool {
    RNG_SUPPORTED_TYPES.contains(sql_type)
}

impl SqlType {
    pub fn as_str(&self) -> &str {
        match self {
            SqlType::Boolean => "BOOLEAN",
            SqlType::TinyInt => "TINYINT",
            SqlType::SmallInt => "SMALLINT",
            SqlType::Integer => "INTEGER",
            SqlType::BigInt => "BIGINT",
            SqlType::Varchar => "VARCHAR",
            SqlType::Char => "CHAR",
            SqlType::Double => "DOUBLE",
            SqlType::Real => "REAL",
            SqlType::Decimal => "DECIMAL",
            SqlType::Time => "TIME",
            SqlType::Date => "DATE",
            SqlType::Timestamp => "TIMESTAMP",
            SqlType::Array => "ARRAY",
            SqlType::Binary => "BINARY",
            SqlType::Varbinary => "VARBINARY",
            SqlType::Interval => "INTERVAL",
            SqlType::Struct => "STRUCT",
            SqlType::Map => "MAP",
            SqlType::Null => "NULL",
            SqlType::Uuid => "UUID",
            SqlType::Variant => "VARIANT",
            SqlType::Other(name) => name.as_str(),
        }
    }

    /// Type for an arbitrary name; known names map to their own variant.
    pub fn other(name: impl Into<String>) -> Self {
        SqlType::from(name.into())
    }
}

impl From<String> for SqlType {
    fn from(value: String) -> Self {
        let upper = value.trim().to_ascii_uppercase();
        match upper.as_str() {
            "BOOLEAN" | "BOOL" => SqlType::Boolean,
            "TINYINT" => SqlType::TinyInt,
            "SMALLINT" => SqlType::SmallInt,
            "INTEGER" | "INT" => SqlType::Integer,
            "BIGINT" => SqlType::BigInt,
            "VARCHAR" => SqlType::Varchar,
            "CHAR" => SqlType::Char,
            "DOUBLE" => SqlType::Double,
            "REAL" => SqlType::Real,
            "DECIMAL" | "NUMERIC" => SqlType::Decimal,
            "TIME" => SqlType::Time,
            "DATE" => SqlType::Date,
            "TIMESTAMP" => SqlType::Timestamp,
            "ARRAY" => SqlType::Array,
            "BINARY" => SqlType::Binary,
            "VARBINARY" => SqlType::Varbinary,
            "INTERVAL" => SqlType::Interval,
            "STRUCT" => SqlType::Struct,
            "MAP" => SqlType::Map,
            "NULL" => SqlType::Null,
            "UUID" => SqlType::Uuid,
            "VARIANT" => SqlType::Variant,
            _ => SqlType::Other(value),
        }
    }
}

impl From<&str> for SqlType {
    fn from(value: &str) -> Self {
        SqlType::from(value.to_string())
    }
}

impl From<SqlType> for String {
    fn from(value: SqlType) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type metadata for a column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ColumnType {
    /// SQL type name (e.g. `DECIMAL`, `VARCHAR`).
    #[serde(rename = "type")]
    #[schemars(with = "String")]
    pub sql_type: SqlType,
    #[serde(default)]
    pub nullable: bool,
    /// Precision for DECIMAL, maximum length for CHAR/VARCHAR.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<i64>,
    /// Element type of an ARRAY column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub component: Option<Box<ColumnType>>,
}

impl ColumnType {
    pub fn new(sql_type: SqlType, nullable: bool) -> Self {
        Self {
            sql_type,
            nullable,
            precision: None,
            scale: None,
            component: None,
        }
    }

    /// Render the type the way a console displays it (e.g. `DECIMAL(10, 2)`).
    pub fn display(&self) -> String {
        let mut out = match (&self.sql_type, &self.component) {
            (SqlType::Array, Some(component)) => format!("{} ARRAY", component.display()),
            _ => self.sql_type.to_string(),
        };
        match (self.precision, self.scale) {
            (Some(precision), Some(scale)) if self.sql_type == SqlType::Decimal => {
                out.push_str(&format!("({precision}, {scale})"));
            }
            (Some(precision), _) if precision >= 0 => {
                out.push_str(&format!("({precision})"));
            }
            _ => {}
        }
        if !self.nullable {
            out.push_str(" NOT NULL");
        }
        out
    }
}
