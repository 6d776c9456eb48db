use serde::Serialize;
use serde_json::{Map, Value};

use rngconf_core::Relation;
use rngconf_methods::MethodRegistry;

use crate::doctor::{DoctorReport, inspect};
use crate::mutate::{self, Mutation};
use crate::persist::SettingsPersistence;
use crate::reconcile::{ResolvedFieldConfig, reconcile, reconcile_relation};
use crate::stored::SettingsStore;

/// Result of a write through a [`SettingsSession`].
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateOutcome {
    pub mutation: Mutation,
    /// False when the store changed in memory but could not be saved.
    pub persisted: bool,
}

/// Result of [`SettingsSession::prune`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PruneOutcome {
    /// Keys removed from the store, in key order.
    pub removed: Vec<String>,
    /// False when the removal could not be saved.
    pub persisted: bool,
}

/// Settings of one relation for the lifetime of an editing session.
///
/// The store is loaded once when the session opens and written through to
/// the persistence medium after every applied change. A medium that fails to
/// load yields an empty store; one that fails to save leaves the change in
/// memory only.
pub struct SettingsSession<P: SettingsPersistence> {
    registry: MethodRegistry,
    relation: Relation,
    store: SettingsStore,
    persistence: P,
}

impl<P: SettingsPersistence> SettingsSession<P> {
    pub fn open(registry: MethodRegistry, relation: Relation, persistence: P) -> Self {
        let store = match persistence.load() {
            Ok(raw) => SettingsStore::from_raw(&raw),
            Err(err) => {
                tracing::warn!(
                    event = "settings_load_failed",
                    relation = %relation.name,
                    error = %err
                );
                SettingsStore::new()
            }
        };
        tracing::info!(
            event = "settings_session_opened",
            relation = %relation.name,
            fields = relation.fields.len(),
            entries = store.len()
        );

        Self {
            registry,
            relation,
            store,
            persistence,
        }
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub fn relation(&self) -> &Relation {
        &self.relation
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    /// Resolved configuration of every field, in relation order.
    pub fn resolved(&self) -> Vec<ResolvedFieldConfig> {
        reconcile_relation(&self.registry, &self.relation, &self.store)
    }

    pub fn resolve(&self, field_name: &str) -> Option<ResolvedFieldConfig> {
        let field = self.relation.field(field_name)?;
        Some(reconcile(&self.registry, field, self.store.get(field_name)))
    }

    pub fn update(&mut self, field_name: &str, partial: &Map<String, Value>) -> UpdateOutcome {
        let mutation = mutate::apply_update(
            &self.registry,
            &mut self.store,
            &self.relation,
            field_name,
            partial,
        );
        self.write_through(mutation)
    }

    pub fn set_method(&mut self, field_name: &str, method: &str) -> UpdateOutcome {
        let mutation = mutate::set_method(
            &self.registry,
            &mut self.store,
            &self.relation,
            field_name,
            method,
        );
        self.write_through(mutation)
    }

    /// Forget a field's settings. Returns whether the removal was saved.
    pub fn reset(&mut self, field_name: &str) -> bool {
        if mutate::reset(&mut self.store, field_name) {
            self.persist()
        } else {
            true
        }
    }

    /// Remove dormant entries and save.
    pub fn prune(&mut self) -> PruneOutcome {
        let removed = mutate::prune(&mut self.store, &self.relation);
        if removed.is_empty() {
            return PruneOutcome {
                removed,
                persisted: true,
            };
        }
        tracing::info!(event = "settings_pruned", removed = removed.len());
        let persisted = self.persist();
        PruneOutcome { removed, persisted }
    }

    pub fn doctor(&self) -> DoctorReport {
        inspect(&self.registry, &self.store, &self.relation)
    }

    fn write_through(&mut self, mutation: Mutation) -> UpdateOutcome {
        let persisted = if mutation.is_applied() {
            self.persist()
        } else {
            true
        };
        UpdateOutcome {
            mutation,
            persisted,
        }
    }

    fn persist(&mut self) -> bool {
        match self.persistence.save(&self.store.to_raw()) {
            Ok(()) => true,
            Err(err) => {
                tracing::warn!(
                    event = "settings_save_failed",
                    relation = %self.relation.name,
                    error = %err
                );
                false
            }
        }
    }
}
