use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use rngconf_core::normalize_field_name;

/// Settings record as persisted for one field.
///
/// Nothing about it can be trusted: `method` is expected to name a method
/// registered for the field's type, and `config` to hold that method's keys,
/// but either may be stale, hand-edited, or garbage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoredFieldSettings {
    pub method: String,
    pub config: Map<String, Value>,
}

impl StoredFieldSettings {
    pub fn new(method: impl Into<String>, config: Map<String, Value>) -> Self {
        Self {
            method: method.into(),
            config,
        }
    }

    /// Decode an entry leniently. A non-string method becomes empty, a
    /// non-object config becomes an empty map.
    pub fn from_value(value: &Value) -> Self {
        let method = value
            .get("method")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let config = value
            .get("config")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default();
        Self { method, config }
    }

    pub fn to_value(&self) -> Value {
        let mut entry = Map::new();
        entry.insert("method".to_string(), Value::String(self.method.clone()));
        entry.insert("config".to_string(), Value::Object(self.config.clone()));
        Value::Object(entry)
    }
}

/// Field settings keyed by normalized field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsStore {
    entries: BTreeMap<String, StoredFieldSettings>,
}

impl SettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a raw persisted map.
    ///
    /// Keys are normalized. When several raw keys normalize to the same name,
    /// a key that is already normalized wins; otherwise the lexicographically
    /// smallest raw key wins.
    pub fn from_raw(raw: &Map<String, Value>) -> Self {
        let mut keys: Vec<&String> = raw.keys().collect();
        keys.sort();

        let mut chosen: BTreeMap<String, &String> = BTreeMap::new();
        for raw_key in keys {
            let key = normalize_field_name(raw_key);
            match chosen.get(&key) {
                Some(existing) if *existing == &key => {}
                Some(_) if raw_key != &key => {}
                _ => {
                    chosen.insert(key, raw_key);
                }
            }
        }

        let entries = chosen
            .into_iter()
            .filter_map(|(key, raw_key)| {
                raw.get(raw_key)
                    .map(|value| (key, StoredFieldSettings::from_value(value)))
            })
            .collect();
        Self { entries }
    }

    /// Encode the store in its persisted shape.
    pub fn to_raw(&self) -> Map<String, Value> {
        self.entries
            .iter()
            .map(|(key, settings)| (key.clone(), settings.to_value()))
            .collect()
    }

    pub fn get(&self, field_name: &str) -> Option<&StoredFieldSettings> {
        self.entries.get(&normalize_field_name(field_name))
    }

    pub fn insert(&mut self, field_name: &str, settings: StoredFieldSettings) {
        self.entries
            .insert(normalize_field_name(field_name), settings);
    }

    pub fn remove(&mut self, field_name: &str) -> Option<StoredFieldSettings> {
        self.entries.remove(&normalize_field_name(field_name))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StoredFieldSettings)> {
        self.entries
            .iter()
            .map(|(key, settings)| (key.as_str(), settings))
    }

    pub(crate) fn retain(&mut self, mut keep: impl FnMut(&str, &StoredFieldSettings) -> bool) {
        self.entries.retain(|key, settings| keep(key, settings));
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn decodes_garbage_entries_leniently() {
        let entry = StoredFieldSettings::from_value(&json!({"method": 7, "config": [1, 2]}));
        assert_eq!(entry, StoredFieldSettings::default());

        let entry = StoredFieldSettings::from_value(&json!("Uniform"));
        assert_eq!(entry, StoredFieldSettings::default());

        let entry = StoredFieldSettings::from_value(&json!({"method": "Uniform"}));
        assert_eq!(entry.method, "Uniform");
        assert!(entry.config.is_empty());
    }

    #[test]
    fn keys_are_normalized_on_load_and_lookup() {
        let raw = json!({"Amount": {"method": "Uniform", "config": {}}});
        let store = SettingsStore::from_raw(raw.as_object().expect("object"));

        assert_eq!(store.get("amount").map(|s| s.method.as_str()), Some("Uniform"));
        assert_eq!(store.get("AMOUNT").map(|s| s.method.as_str()), Some("Uniform"));
        assert_eq!(store.iter().map(|(key, _)| key).collect::<Vec<_>>(), vec!["amount"]);
    }

    #[test]
    fn normalized_key_wins_collisions() {
        let raw = json!({
            "FOO": {"method": "Constant", "config": {}},
            "Foo": {"method": "Normal", "config": {}},
            "foo": {"method": "Uniform", "config": {}}
        });
        let store = SettingsStore::from_raw(raw.as_object().expect("object"));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("foo").map(|s| s.method.as_str()), Some("Uniform"));
    }

    #[test]
    fn smallest_raw_key_wins_without_normalized_key() {
        let raw = json!({
            "Foo": {"method": "Normal", "config": {}},
            "FOO": {"method": "Constant", "config": {}}
        });
        let store = SettingsStore::from_raw(raw.as_object().expect("object"));
        assert_eq!(store.get("foo").map(|s| s.method.as_str()), Some("Constant"));
    }
}
