use rngconf_core::{Field, Relation, SqlType};
use rngconf_methods::{ConfigValue, MethodId, MethodRegistry};
use rngconf_settings::{
    ResolvedFieldConfig, SettingsStore, StoredFieldSettings, reconcile, reconcile_relation,
};
use serde_json::{Value, json};

fn stored(value: Value) -> StoredFieldSettings {
    StoredFieldSettings::from_value(&value)
}

fn amount() -> Field {
    Field::new("amount", SqlType::Decimal, false)
}

#[test]
fn stored_uniform_for_decimal_is_adopted() {
    let registry = MethodRegistry::new();
    let settings = stored(json!({"method": "Uniform", "config": {"min": 0, "max": 100}}));

    let resolved = reconcile(&registry, &amount(), Some(&settings));

    assert_eq!(resolved.method, MethodId::Uniform);
    assert_eq!(resolved.config.len(), 2);
    assert_eq!(resolved.config.get("min"), Some(&ConfigValue::Float(0.0)));
    assert_eq!(resolved.config.get("max"), Some(&ConfigValue::Float(100.0)));
}

#[test]
fn misspelled_method_falls_back_to_type_default() {
    let registry = MethodRegistry::new();
    let settings = stored(json!({"method": "Explonential", "config": {"min": 5}}));

    let resolved = reconcile(&registry, &amount(), Some(&settings));
    let defaults = reconcile(&registry, &amount(), None);

    assert_eq!(resolved, defaults);
    assert_eq!(resolved.method, MethodId::Uniform);
    assert_eq!(resolved.config.get("min"), Some(&ConfigValue::Float(0.0)));
    assert_eq!(resolved.config.get("max"), Some(&ConfigValue::Float(1.0)));
}

#[test]
fn fallback_is_idempotent() {
    let registry = MethodRegistry::new();
    let field = Field::new("n", SqlType::Integer, true);
    let settings = stored(json!({"method": "NotAMethod", "config": {"x": 1}}));

    let first = reconcile(&registry, &field, Some(&settings));
    let again = reconcile(&registry, &field, Some(&first.to_stored()));

    assert_eq!(first, again);
}

#[test]
fn unsupported_type_ignores_any_stored_settings() {
    let registry = MethodRegistry::new();
    let blob = Field::new("blob", SqlType::Binary, true);
    let expected = ResolvedFieldConfig::pass_through(&blob);

    let candidates = [
        None,
        Some(stored(json!({"method": "Uniform", "config": {"min": 0}}))),
        Some(stored(json!({"method": "None", "config": {}}))),
        Some(stored(json!({"method": [1, 2], "config": "garbage"}))),
        Some(stored(json!(null))),
    ];
    for candidate in &candidates {
        let resolved = reconcile(&registry, &blob, candidate.as_ref());
        assert_eq!(resolved, expected);
        assert!(resolved.is_pass_through());
        assert!(resolved.config.is_empty());
    }
}

#[test]
fn pass_through_name_is_not_a_method_for_supported_types() {
    let registry = MethodRegistry::new();
    let settings = stored(json!({"method": "None", "config": {}}));

    let resolved = reconcile(&registry, &amount(), Some(&settings));
    assert_eq!(resolved.method, MethodId::Uniform);
}

#[test]
fn absent_settings_give_documented_defaults() {
    let registry = MethodRegistry::new();

    let flag = reconcile(&registry, &Field::new("flag", SqlType::Boolean, false), None);
    assert_eq!(flag.method, MethodId::Bernoulli);
    assert_eq!(flag.config.get("p"), Some(&ConfigValue::Float(0.5)));

    let name = reconcile(&registry, &Field::new("name", SqlType::Varchar, true), None);
    assert_eq!(name.method, MethodId::Words);
    assert_eq!(name.config.get("min_words"), Some(&ConfigValue::Int(1)));
    assert_eq!(name.config.get("max_words"), Some(&ConfigValue::Int(3)));

    let tags = reconcile(&registry, &Field::new("tags", SqlType::Array, true), None);
    assert_eq!(tags.method, MethodId::Length);
    assert_eq!(tags.config.get("max_len"), Some(&ConfigValue::Int(5)));
}

#[test]
fn config_is_defaulted_key_by_key() {
    let registry = MethodRegistry::new();
    let field = Field::new("qty", SqlType::Integer, false);
    let settings = stored(json!({
        "method": "Uniform",
        "config": {"min": "ten", "max": 50, "legacy_key": true}
    }));

    let resolved = reconcile(&registry, &field, Some(&settings));

    assert_eq!(resolved.method, MethodId::Uniform);
    assert_eq!(resolved.config.get("min"), Some(&ConfigValue::Int(0)));
    assert_eq!(resolved.config.get("max"), Some(&ConfigValue::Int(50)));
    assert_eq!(resolved.config.get("legacy_key"), None);
    assert_eq!(resolved.config.keys().collect::<Vec<_>>(), vec!["max", "min"]);
}

#[test]
fn temporal_config_values_are_parsed() {
    let registry = MethodRegistry::new();
    let field = Field::new("created_at", SqlType::Timestamp, false);
    let settings = stored(json!({
        "method": "Constant",
        "config": {"value": "2023-05-01T08:30:00"}
    }));

    let resolved = reconcile(&registry, &field, Some(&settings));
    assert_eq!(resolved.method, MethodId::Constant);
    assert_eq!(
        resolved.config.get("value").map(ConfigValue::to_json),
        Some(json!("2023-05-01T08:30:00"))
    );
}

#[test]
fn stored_keys_match_fields_case_insensitively() {
    let registry = MethodRegistry::new();
    let raw = json!({"Foo": {"method": "Constant", "config": {"value": 7}}});
    let store = SettingsStore::from_raw(raw.as_object().expect("object"));
    let relation = Relation::new("t", vec![Field::new("foo", SqlType::Integer, false)]);

    let resolved = reconcile_relation(&registry, &relation, &store);

    assert_eq!(resolved[0].method, MethodId::Constant);
    assert_eq!(resolved[0].config.get("value"), Some(&ConfigValue::Int(7)));
}

#[test]
fn relation_order_is_preserved() {
    let registry = MethodRegistry::new();
    let relation = Relation::new(
        "t",
        vec![
            Field::new("z", SqlType::Date, false),
            Field::new("a", SqlType::Map, true),
            Field::new("m", SqlType::Real, false),
        ],
    );

    let resolved = reconcile_relation(&registry, &relation, &SettingsStore::new());
    let names: Vec<&str> = resolved.iter().map(|r| r.field.name.as_str()).collect();
    let methods: Vec<MethodId> = resolved.iter().map(|r| r.method).collect();

    assert_eq!(names, vec!["z", "a", "m"]);
    assert_eq!(
        methods,
        vec![MethodId::Uniform, MethodId::None, MethodId::Uniform]
    );
}

#[test]
fn empty_registry_resolves_everything_to_pass_through() {
    let registry = MethodRegistry::empty();
    let resolved = reconcile(&registry, &amount(), None);
    assert!(resolved.is_pass_through());
}

#[test]
fn resolved_config_serializes_with_method_title() {
    let registry = MethodRegistry::new();
    let resolved = reconcile(&registry, &amount(), None);

    let value = serde_json::to_value(&resolved).expect("serialize");
    assert_eq!(value["method"], json!("Uniform"));
    assert_eq!(value["config"], json!({"min": 0.0, "max": 1.0}));
    assert_eq!(value["field"]["columntype"]["type"], json!("DECIMAL"));
}
