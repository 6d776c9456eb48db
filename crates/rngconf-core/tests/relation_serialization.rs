use rngconf_core::{Field, Relation, SqlType, is_supported};
use serde_json::json;

#[test]
fn deserializes_relation_with_unknown_types() {
    let value = json!({
        "name": "events",
        "fields": [
            {"name": "id", "columntype": {"type": "BIGINT", "nullable": false}},
            {"name": "payload", "columntype": {"type": "VARBINARY", "nullable": true}},
            {"name": "shape", "columntype": {"type": "GEOMETRY"}},
            {
                "name": "tags",
                "columntype": {
                    "type": "ARRAY",
                    "nullable": true,
                    "component": {"type": "VARCHAR", "nullable": false}
                }
            }
        ]
    });

    let relation: Relation = serde_json::from_value(value).expect("parse relation");
    let types: Vec<&SqlType> = relation.fields.iter().map(Field::sql_type).collect();

    assert_eq!(
        types,
        vec![
            &SqlType::BigInt,
            &SqlType::Varbinary,
            &SqlType::Other("GEOMETRY".to_string()),
            &SqlType::Array,
        ]
    );
    assert!(!relation.fields[2].column_type.nullable);
    assert!(is_supported(relation.fields[3].sql_type()));
}

#[test]
fn serializes_relation_deterministically() {
    let relation = Relation::new(
        "orders",
        vec![Field::new("amount", SqlType::Decimal, true)],
    );

    let json = serde_json::to_string_pretty(&relation).expect("serialize relation");
    let expected = r#"{
  "name": "orders",
  "fields": [
    {
      "name": "amount",
      "columntype": {
        "type": "DECIMAL",
        "nullable": true
      }
    }
  ]
}"#;
    assert_eq!(json, expected);
}
