use std::collections::HashMap;

use rngconf_core::{SqlType, is_supported};

use crate::builtin;
use crate::method::{MethodId, MethodSpec};

/// Per-type registry of generator methods.
///
/// Only types in the support table can hold methods, and the pass-through
/// method is never registered: it is what every unsupported field resolves to.
#[derive(Debug, Clone, Default)]
pub struct MethodRegistry {
    methods: HashMap<SqlType, Vec<MethodSpec>>,
}

impl MethodRegistry {
    /// Registry with the built-in methods for every supported type.
    pub fn new() -> Self {
        let mut registry = Self::empty();
        builtin::register(&mut registry);
        registry
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a method for a type. Re-registering an id replaces the earlier
    /// spec in place, keeping its position (and so which method is default).
    pub fn register_method(&mut self, sql_type: SqlType, spec: MethodSpec) {
        if !is_supported(&sql_type) {
            tracing::warn!(
                event = "method_registration_ignored",
                sql_type = %sql_type,
                method = %spec.id,
                reason = "unsupported_type"
            );
            return;
        }
        if spec.id == MethodId::None {
            tracing::warn!(
                event = "method_registration_ignored",
                sql_type = %sql_type,
                method = %spec.id,
                reason = "pass_through"
            );
            return;
        }

        let methods = self.methods.entry(sql_type).or_default();
        match methods.iter_mut().find(|existing| existing.id == spec.id) {
            Some(existing) => *existing = spec,
            None => methods.push(spec),
        }
    }

    /// Register the same method for several types.
    pub fn register_for(&mut self, sql_types: &[SqlType], spec: MethodSpec) {
        for sql_type in sql_types {
            self.register_method(sql_type.clone(), spec.clone());
        }
    }

    /// Methods applicable to a type, default first.
    pub fn methods(&self, sql_type: &SqlType) -> &[MethodSpec] {
        self.methods
            .get(sql_type)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn default_method(&self, sql_type: &SqlType) -> Option<&MethodSpec> {
        self.methods(sql_type).first()
    }

    /// Find a method by its persisted title.
    pub fn lookup(&self, sql_type: &SqlType, title: &str) -> Option<&MethodSpec> {
        let id = MethodId::from_title(title)?;
        self.method(sql_type, id)
    }

    pub fn method(&self, sql_type: &SqlType, id: MethodId) -> Option<&MethodSpec> {
        self.methods(sql_type).iter().find(|spec| spec.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamSpec;

    #[test]
    fn unsupported_types_never_hold_methods() {
        let mut registry = MethodRegistry::empty();
        registry.register_method(SqlType::Binary, MethodSpec::new(MethodId::Constant, "c"));
        registry.register_method(SqlType::Integer, MethodSpec::new(MethodId::None, "none"));

        assert!(registry.methods(&SqlType::Binary).is_empty());
        assert!(registry.methods(&SqlType::Integer).is_empty());
    }

    #[test]
    fn re_registering_keeps_position() {
        let mut registry = MethodRegistry::empty();
        registry.register_method(SqlType::Integer, MethodSpec::new(MethodId::Uniform, "u"));
        registry.register_method(SqlType::Integer, MethodSpec::new(MethodId::Constant, "c"));
        registry.register_method(
            SqlType::Integer,
            MethodSpec::new(MethodId::Uniform, "u2").with_param(ParamSpec::int("min", 1)),
        );

        let ids: Vec<MethodId> = registry
            .methods(&SqlType::Integer)
            .iter()
            .map(|spec| spec.id)
            .collect();
        assert_eq!(ids, vec![MethodId::Uniform, MethodId::Constant]);
        assert_eq!(
            registry
                .default_method(&SqlType::Integer)
                .map(|spec| spec.description),
            Some("u2")
        );
    }

    #[test]
    fn lookup_requires_registration_for_the_type() {
        let registry = MethodRegistry::new();
        assert!(registry.lookup(&SqlType::Boolean, "Bernoulli").is_some());
        assert!(registry.lookup(&SqlType::Decimal, "Bernoulli").is_none());
        assert!(registry.lookup(&SqlType::Decimal, "None").is_none());
    }
}
