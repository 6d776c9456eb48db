use rngconf_core::SqlType;

use crate::method::{MethodId, MethodSpec};
use crate::params::ParamSpec;
use crate::registry::MethodRegistry;

const DEFAULT_INT_MAX: i64 = 1000;
const DEFAULT_FLOAT_MIN: f64 = 0.0;
const DEFAULT_FLOAT_MAX: f64 = 1.0;

const FLOAT_TYPES: &[SqlType] = &[SqlType::Double, SqlType::Decimal];

pub fn register(registry: &mut MethodRegistry) {
    register_boolean(registry);

    register_integer(registry, SqlType::TinyInt, i8::MIN.into(), i8::MAX.into());
    register_integer(registry, SqlType::SmallInt, i16::MIN.into(), i16::MAX.into());
    register_integer(registry, SqlType::Integer, i32::MIN.into(), i32::MAX.into());
    register_integer(registry, SqlType::BigInt, i64::MIN, i64::MAX);

    for spec in float_methods(f64::MIN, f64::MAX) {
        registry.register_for(FLOAT_TYPES, spec);
    }
    for spec in float_methods(f32::MIN.into(), f32::MAX.into()) {
        registry.register_method(SqlType::Real, spec);
    }
}

fn register_boolean(registry: &mut MethodRegistry) {
    registry.register_method(
        SqlType::Boolean,
        MethodSpec::new(MethodId::Bernoulli, "true with probability p")
            .with_param(ParamSpec::float("p", 0.5).within(0.0, 1.0)),
    );
    registry.register_method(
        SqlType::Boolean,
        MethodSpec::new(MethodId::Constant, "always the same value")
            .with_param(ParamSpec::bool("value", false)),
    );
}

fn register_integer(registry: &mut MethodRegistry, sql_type: SqlType, min: i64, max: i64) {
    let (lo, hi) = (min as f64, max as f64);

    registry.register_method(
        sql_type.clone(),
        MethodSpec::new(MethodId::Uniform, "uniform in [min, max]")
            .with_param(ParamSpec::int("min", 0).within(lo, hi))
            .with_param(ParamSpec::int("max", max.min(DEFAULT_INT_MAX)).within(lo, hi)),
    );
    registry.register_method(
        sql_type.clone(),
        MethodSpec::new(MethodId::Constant, "always the same value")
            .with_param(ParamSpec::int("value", 0).within(lo, hi)),
    );
    registry.register_method(
        sql_type.clone(),
        MethodSpec::new(MethodId::Increment, "start, start + step, ...")
            .with_param(ParamSpec::int("start", 0).within(lo, hi))
            .with_param(ParamSpec::int("step", 1).within(lo, hi)),
    );
    registry.register_method(
        sql_type.clone(),
        MethodSpec::new(MethodId::Normal, "normal distribution, rounded")
            .with_param(ParamSpec::float("mean", 0.0).within(lo, hi))
            .with_param(ParamSpec::float("std_dev", 1.0).within(0.0, f64::MAX)),
    );
    registry.register_method(
        sql_type,
        MethodSpec::new(MethodId::Exponential, "exponential distribution, rounded")
            .with_param(ParamSpec::float("lambda", 1.0).within(f64::MIN_POSITIVE, f64::MAX)),
    );
}

fn float_methods(lo: f64, hi: f64) -> Vec<MethodSpec> {
    vec![
        MethodSpec::new(MethodId::Uniform, "uniform in [min, max]")
            .with_param(ParamSpec::float("min", DEFAULT_FLOAT_MIN).within(lo, hi))
            .with_param(ParamSpec::float("max", DEFAULT_FLOAT_MAX).within(lo, hi)),
        MethodSpec::new(MethodId::Constant, "always the same value")
            .with_param(ParamSpec::float("value", 0.0).within(lo, hi)),
        MethodSpec::new(MethodId::Normal, "normal distribution")
            .with_param(ParamSpec::float("mean", 0.0).within(lo, hi))
            .with_param(ParamSpec::float("std_dev", 1.0).within(0.0, hi)),
        MethodSpec::new(MethodId::Exponential, "exponential distribution")
            .with_param(ParamSpec::float("lambda", 1.0).within(f64::MIN_POSITIVE, f64::MAX)),
    ]
}
