use serde::Serialize;

use rngconf_core::{Relation, is_supported};
use rngconf_methods::{MethodRegistry, project_config};

use crate::stored::SettingsStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DoctorLevel {
    /// The entry is ignored entirely.
    Dormant,
    /// Part of the entry is replaced by defaults when reconciled.
    Warning,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DoctorIssue {
    pub level: DoctorLevel,
    pub key: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Read-only report of stored entries that reconciliation does not use as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DoctorReport {
    pub issues: Vec<DoctorIssue>,
}

impl DoctorReport {
    fn push(
        &mut self,
        level: DoctorLevel,
        key: &str,
        message: impl Into<String>,
        hint: Option<&str>,
    ) {
        self.issues.push(DoctorIssue {
            level,
            key: key.to_string(),
            message: message.into(),
            hint: hint.map(str::to_string),
        });
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn dormant_keys(&self) -> impl Iterator<Item = &str> {
        self.issues
            .iter()
            .filter(|issue| issue.level == DoctorLevel::Dormant)
            .map(|issue| issue.key.as_str())
    }
}

/// Compare a store against a relation and the method registry.
pub fn inspect(registry: &MethodRegistry, store: &SettingsStore, relation: &Relation) -> DoctorReport {
    let mut report = DoctorReport::default();

    for (key, stored) in store.iter() {
        let Some(field) = relation.field(key) else {
            report.push(
                DoctorLevel::Dormant,
                key,
                format!("no field '{key}' in relation '{}'", relation.name),
                Some("prune to remove settings of dropped fields"),
            );
            continue;
        };

        let sql_type = field.sql_type();
        if !is_supported(sql_type) {
            report.push(
                DoctorLevel::Dormant,
                key,
                format!("type {sql_type} does not support random generation"),
                Some("prune to remove settings of unsupported fields"),
            );
            continue;
        }

        let Some(spec) = registry.lookup(sql_type, &stored.method) else {
            report.push(
                DoctorLevel::Warning,
                key,
                format!("method '{}' is not available for {sql_type}", stored.method),
                Some("the type's default method is used instead"),
            );
            continue;
        };

        let projection = project_config(&spec.params, Some(&stored.config));
        for param in projection.rejected {
            report.push(
                DoctorLevel::Warning,
                key,
                format!("invalid value for '{param}' of method {}", spec.id),
                Some("the key's default is used instead"),
            );
        }
        for param in projection.discarded {
            report.push(
                DoctorLevel::Warning,
                key,
                format!("method {} does not declare '{param}'", spec.id),
                None,
            );
        }
    }

    report
}
