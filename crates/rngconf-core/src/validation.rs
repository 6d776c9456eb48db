use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::schema::{Relation, normalize_field_name};

/// Validate internal consistency of a relation.
///
/// This checks:
/// - field names are not empty
/// - field names are unique under case-insensitive comparison
pub fn validate_relation(relation: &Relation) -> Result<()> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();

    for field in &relation.fields {
        if field.name.trim().is_empty() {
            return Err(Error::InvalidSchema(format!(
                "empty field name in relation: {}",
                relation.name
            )));
        }

        let key = normalize_field_name(&field.name);
        if let Some(previous) = seen.insert(key, field.name.as_str()) {
            return Err(Error::InvalidSchema(format!(
                "duplicate field name: {}.{} (conflicts with {})",
                relation.name, field.name, previous
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Field;
    use crate::types::SqlType;

    #[test]
    fn rejects_names_differing_only_by_case() {
        let relation = Relation::new(
            "t",
            vec![
                Field::new("Foo", SqlType::Integer, false),
                Field::new("foo", SqlType::Varchar, true),
            ],
        );
        assert!(matches!(
            validate_relation(&relation),
            Err(Error::InvalidSchema(_))
        ));
    }

    #[test]
    fn rejects_empty_names() {
        let relation = Relation::new("t", vec![Field::new(" ", SqlType::Integer, false)]);
        assert!(validate_relation(&relation).is_err());
    }

    #[test]
    fn accepts_distinct_names() {
        let relation = Relation::new(
            "t",
            vec![
                Field::new("a", SqlType::Integer, false),
                Field::new("b", SqlType::Binary, true),
            ],
        );
        assert!(validate_relation(&relation).is_ok());
    }
}
