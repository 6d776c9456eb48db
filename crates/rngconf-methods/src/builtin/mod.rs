//! Built-in generator methods for every supported SQL type.

mod numeric;
mod temporal;
mod text;

use rngconf_core::SqlType;

use crate::method::{MethodId, MethodSpec};
use crate::params::ParamSpec;
use crate::registry::MethodRegistry;

const MAX_ARRAY_LEN: f64 = 1024.0;

pub fn register(registry: &mut MethodRegistry) {
    numeric::register(registry);
    text::register(registry);
    temporal::register(registry);

    // Only the length is configured on an array column.
    registry.register_method(
        SqlType::Array,
        MethodSpec::new(MethodId::Length, "arrays with min_len to max_len elements")
            .with_param(ParamSpec::int("min_len", 0).within(0.0, MAX_ARRAY_LEN))
            .with_param(ParamSpec::int("max_len", 5).within(0.0, MAX_ARRAY_LEN)),
    );
}
