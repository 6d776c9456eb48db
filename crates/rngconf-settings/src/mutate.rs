use serde_json::{Map, Value};

use rngconf_core::{Field, Relation, is_supported};
use rngconf_methods::{MethodRegistry, TypedConfig};

use crate::reconcile::{ResolvedFieldConfig, reconcile};
use crate::stored::SettingsStore;

/// Result of a write to a settings store.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// The entry was replaced; holds the field's new resolved configuration.
    Applied(ResolvedFieldConfig),
    /// The store was left unchanged.
    Ignored(IgnoredReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoredReason {
    UnknownField,
    UnsupportedType,
    UnknownMethod,
}

impl IgnoredReason {
    pub fn as_str(self) -> &'static str {
        match self {
            IgnoredReason::UnknownField => "unknown_field",
            IgnoredReason::UnsupportedType => "unsupported_type",
            IgnoredReason::UnknownMethod => "unknown_method",
        }
    }
}

impl Mutation {
    pub fn is_applied(&self) -> bool {
        matches!(self, Mutation::Applied(_))
    }
}

/// Merge a partial config onto a field's currently resolved configuration and
/// store the result.
///
/// Keys the resolved method does not declare and values of the wrong kind are
/// dropped, so the stored entry is always a reconciled one.
pub fn apply_update(
    registry: &MethodRegistry,
    store: &mut SettingsStore,
    relation: &Relation,
    field_name: &str,
    partial: &Map<String, Value>,
) -> Mutation {
    let field = match writable_field(relation, field_name) {
        Ok(field) => field,
        Err(reason) => return ignored(field_name, reason),
    };

    let mut resolved = reconcile(registry, field, store.get(&field.name));
    let Some(spec) = registry.method(field.sql_type(), resolved.method) else {
        return ignored(field_name, IgnoredReason::UnsupportedType);
    };

    for (key, raw) in partial {
        match spec.param(key).and_then(|param| param.accept(raw)) {
            Some(value) => resolved.config.insert(key.clone(), value),
            None => tracing::debug!(
                event = "partial_key_dropped",
                field = %field.name,
                method = %spec.id,
                key = %key
            ),
        }
    }

    store.insert(&field.name, resolved.to_stored());
    tracing::info!(
        event = "field_settings_updated",
        field = %field.name,
        method = %resolved.method
    );
    Mutation::Applied(resolved)
}

/// Pure form of [`apply_update`]: returns the updated store.
pub fn update(
    registry: &MethodRegistry,
    store: &SettingsStore,
    relation: &Relation,
    field_name: &str,
    partial: &Map<String, Value>,
) -> SettingsStore {
    let mut next = store.clone();
    apply_update(registry, &mut next, relation, field_name, partial);
    next
}

/// Switch a field to another registered method.
///
/// The new config starts from the method's defaults and keeps the current
/// value of every key the new method also declares, when that value is
/// acceptable to it.
pub fn set_method(
    registry: &MethodRegistry,
    store: &mut SettingsStore,
    relation: &Relation,
    field_name: &str,
    method: &str,
) -> Mutation {
    let field = match writable_field(relation, field_name) {
        Ok(field) => field,
        Err(reason) => return ignored(field_name, reason),
    };
    let Some(spec) = registry.lookup(field.sql_type(), method) else {
        return ignored(field_name, IgnoredReason::UnknownMethod);
    };

    let current = reconcile(registry, field, store.get(&field.name));
    let config: TypedConfig = spec
        .params
        .iter()
        .map(|param| {
            let carried = current
                .config
                .get(param.key)
                .and_then(|value| param.accept(&value.to_json()));
            let value = carried.unwrap_or_else(|| param.default.clone());
            (param.key.to_string(), value)
        })
        .collect();

    let resolved = ResolvedFieldConfig {
        field: field.clone(),
        method: spec.id,
        config,
    };
    store.insert(&field.name, resolved.to_stored());
    tracing::info!(
        event = "field_method_changed",
        field = %field.name,
        from = %current.method,
        method = %resolved.method
    );
    Mutation::Applied(resolved)
}

/// Drop a field's entry so it resolves to defaults again. Returns true when
/// an entry was removed.
pub fn reset(store: &mut SettingsStore, field_name: &str) -> bool {
    store.remove(field_name).is_some()
}

/// Remove entries that can never affect generation: names that are not in the
/// relation and fields whose type is unsupported. Returns the removed keys.
///
/// Such entries are otherwise left dormant; this only runs when asked.
pub fn prune(store: &mut SettingsStore, relation: &Relation) -> Vec<String> {
    let mut removed = Vec::new();
    store.retain(|key, _| {
        let keep = relation
            .field(key)
            .is_some_and(|field| is_supported(field.sql_type()));
        if !keep {
            removed.push(key.to_string());
        }
        keep
    });
    removed
}

fn writable_field<'a>(relation: &'a Relation, field_name: &str) -> Result<&'a Field, IgnoredReason> {
    let field = relation
        .field(field_name)
        .ok_or(IgnoredReason::UnknownField)?;
    if !is_supported(field.sql_type()) {
        return Err(IgnoredReason::UnsupportedType);
    }
    Ok(field)
}

fn ignored(field_name: &str, reason: IgnoredReason) -> Mutation {
    tracing::debug!(
        event = "field_settings_write_ignored",
        field = %field_name,
        reason = reason.as_str()
    );
    Mutation::Ignored(reason)
}
