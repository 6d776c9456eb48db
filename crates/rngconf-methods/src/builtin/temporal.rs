use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use rngconf_core::SqlType;

use crate::method::{MethodId, MethodSpec};
use crate::params::ParamSpec;
use crate::registry::MethodRegistry;

pub fn register(registry: &mut MethodRegistry) {
    let first_day = date(1970, 1, 1);
    let last_day = date(2099, 12, 31);
    let reference_day = date(2024, 1, 1);
    let midnight = time(0, 0, 0);
    let noon = time(12, 0, 0);
    let end_of_day = time(23, 59, 59);

    registry.register_method(
        SqlType::Date,
        MethodSpec::new(MethodId::Uniform, "uniform between min and max")
            .with_param(ParamSpec::date("min", first_day))
            .with_param(ParamSpec::date("max", last_day)),
    );
    registry.register_method(
        SqlType::Date,
        MethodSpec::new(MethodId::Constant, "always the same date")
            .with_param(ParamSpec::date("value", reference_day)),
    );

    registry.register_method(
        SqlType::Time,
        MethodSpec::new(MethodId::Uniform, "uniform between min and max")
            .with_param(ParamSpec::time("min", midnight))
            .with_param(ParamSpec::time("max", end_of_day)),
    );
    registry.register_method(
        SqlType::Time,
        MethodSpec::new(MethodId::Constant, "always the same time")
            .with_param(ParamSpec::time("value", noon)),
    );

    registry.register_method(
        SqlType::Timestamp,
        MethodSpec::new(MethodId::Uniform, "uniform between min and max")
            .with_param(ParamSpec::timestamp(
                "min",
                NaiveDateTime::new(first_day, midnight),
            ))
            .with_param(ParamSpec::timestamp(
                "max",
                NaiveDateTime::new(last_day, end_of_day),
            )),
    );
    registry.register_method(
        SqlType::Timestamp,
        MethodSpec::new(MethodId::Constant, "always the same timestamp").with_param(
            ParamSpec::timestamp("value", NaiveDateTime::new(reference_day, midnight)),
        ),
    );
    registry.register_method(
        SqlType::Timestamp,
        MethodSpec::new(MethodId::Now, "the wall-clock time of generation"),
    );
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn time(hour: u32, min: u32, sec: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, min, sec).unwrap_or_default()
}
