use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::{ColumnType, SqlType};

/// Normalize a field name for use as a map key.
///
/// Field identity is case-insensitive within a relation. Every place that keys
/// data by field name goes through this function.
pub fn normalize_field_name(name: &str) -> String {
    name.to_lowercase()
}

/// A named, typed column of a relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Field {
    pub name: String,
    #[serde(rename = "columntype")]
    pub column_type: ColumnType,
}

impl Field {
    pub fn new(name: impl Into<String>, sql_type: SqlType, nullable: bool) -> Self {
        Self {
            name: name.into(),
            column_type: ColumnType::new(sql_type, nullable),
        }
    }

    pub fn sql_type(&self) -> &SqlType {
        &self.column_type.sql_type
    }

    pub fn normalized_name(&self) -> String {
        normalize_field_name(&self.name)
    }
}

/// Table schema: an ordered list of typed fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Relation {
    pub name: String,
    pub fields: Vec<Field>,
}

impl Relation {
    pub fn new(name: impl Into<String>, fields: Vec<Field>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Look up a field by name, ignoring case.
    pub fn field(&self, name: &str) -> Option<&Field> {
        let key = normalize_field_name(name);
        self.fields
            .iter()
            .find(|field| field.normalized_name() == key)
    }
}
