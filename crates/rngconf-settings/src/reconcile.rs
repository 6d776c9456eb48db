use serde::Serialize;

use rngconf_core::{Field, Relation, is_supported};
use rngconf_methods::{MethodId, MethodRegistry, MethodSpec, TypedConfig, project_config};

use crate::stored::{SettingsStore, StoredFieldSettings};

/// Generator configuration for a field that is consistent with the field's
/// type: `method` is registered for it and `config` holds exactly the
/// method's declared keys.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFieldConfig {
    pub field: Field,
    pub method: MethodId,
    pub config: TypedConfig,
}

impl ResolvedFieldConfig {
    /// Configuration for fields that get no generator settings.
    pub fn pass_through(field: &Field) -> Self {
        Self {
            field: field.clone(),
            method: MethodId::None,
            config: TypedConfig::new(),
        }
    }

    fn defaults(field: &Field, spec: &MethodSpec) -> Self {
        Self {
            field: field.clone(),
            method: spec.id,
            config: project_config(&spec.params, None).config,
        }
    }

    pub fn is_pass_through(&self) -> bool {
        self.method == MethodId::None
    }

    /// Encode in the persisted form.
    pub fn to_stored(&self) -> StoredFieldSettings {
        StoredFieldSettings::new(self.method.title(), self.config.to_json_map())
    }
}

/// Resolve the generator configuration of one field.
///
/// Never fails: unsupported types get the pass-through configuration, an
/// unknown stored method falls back to the type's default method with its
/// defaults, and stored config keys are taken only when declared by the
/// resolved method and of the declared kind.
pub fn reconcile(
    registry: &MethodRegistry,
    field: &Field,
    stored: Option<&StoredFieldSettings>,
) -> ResolvedFieldConfig {
    let sql_type = field.sql_type();
    if !is_supported(sql_type) {
        if stored.is_some() {
            tracing::debug!(
                event = "dormant_settings_ignored",
                field = %field.name,
                sql_type = %sql_type
            );
        }
        return ResolvedFieldConfig::pass_through(field);
    }

    let Some(default) = registry.default_method(sql_type) else {
        return ResolvedFieldConfig::pass_through(field);
    };

    let Some(stored) = stored else {
        return ResolvedFieldConfig::defaults(field, default);
    };

    let Some(spec) = registry.lookup(sql_type, &stored.method) else {
        tracing::debug!(
            event = "unknown_method_fallback",
            field = %field.name,
            sql_type = %sql_type,
            stored_method = %stored.method,
            method = %default.id
        );
        return ResolvedFieldConfig::defaults(field, default);
    };

    let projection = project_config(&spec.params, Some(&stored.config));
    for key in &projection.rejected {
        tracing::debug!(
            event = "config_key_defaulted",
            field = %field.name,
            method = %spec.id,
            key = %key
        );
    }
    for key in &projection.discarded {
        tracing::debug!(
            event = "config_key_discarded",
            field = %field.name,
            method = %spec.id,
            key = %key
        );
    }

    ResolvedFieldConfig {
        field: field.clone(),
        method: spec.id,
        config: projection.config,
    }
}

/// Resolve every field of a relation, in field order.
pub fn reconcile_relation(
    registry: &MethodRegistry,
    relation: &Relation,
    store: &SettingsStore,
) -> Vec<ResolvedFieldConfig> {
    relation
        .fields
        .iter()
        .map(|field| reconcile(registry, field, store.get(&field.name)))
        .collect()
}
