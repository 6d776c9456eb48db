use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use serde_json::{Map, Value};

use crate::value::{ConfigValue, TypedConfig};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Bool,
    Int,
    Float,
    String,
    /// A string that must compile as a regular expression.
    Pattern,
    Date,
    Time,
    Timestamp,
}

impl ParamKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ParamKind::Bool => "bool",
            ParamKind::Int => "int",
            ParamKind::Float => "float",
            ParamKind::String => "string",
            ParamKind::Pattern => "pattern",
            ParamKind::Date => "date",
            ParamKind::Time => "time",
            ParamKind::Timestamp => "timestamp",
        }
    }
}

/// Inclusive numeric range a value must fall in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// Declared config key of a generator method.
#[derive(Clone, Debug, PartialEq)]
pub struct ParamSpec {
    pub key: &'static str,
    pub kind: ParamKind,
    pub default: ConfigValue,
    pub bounds: Option<Bounds>,
}

impl ParamSpec {
    fn new(key: &'static str, kind: ParamKind, default: ConfigValue) -> Self {
        Self {
            key,
            kind,
            default,
            bounds: None,
        }
    }

    pub fn bool(key: &'static str, default: bool) -> Self {
        Self::new(key, ParamKind::Bool, ConfigValue::Bool(default))
    }

    pub fn int(key: &'static str, default: i64) -> Self {
        Self::new(key, ParamKind::Int, ConfigValue::Int(default))
    }

    pub fn float(key: &'static str, default: f64) -> Self {
        Self::new(key, ParamKind::Float, ConfigValue::Float(default))
    }

    pub fn string(key: &'static str, default: &str) -> Self {
        Self::new(key, ParamKind::String, ConfigValue::Text(default.to_string()))
    }

    pub fn pattern(key: &'static str, default: &str) -> Self {
        Self::new(key, ParamKind::Pattern, ConfigValue::Text(default.to_string()))
    }

    pub fn date(key: &'static str, default: NaiveDate) -> Self {
        Self::new(key, ParamKind::Date, ConfigValue::Date(default))
    }

    pub fn time(key: &'static str, default: NaiveTime) -> Self {
        Self::new(key, ParamKind::Time, ConfigValue::Time(default))
    }

    pub fn timestamp(key: &'static str, default: NaiveDateTime) -> Self {
        Self::new(key, ParamKind::Timestamp, ConfigValue::Timestamp(default))
    }

    /// Restrict a numeric key to an inclusive range.
    pub fn within(mut self, min: f64, max: f64) -> Self {
        self.bounds = Some(Bounds::new(min, max));
        self
    }

    /// Interpret an untrusted JSON value as this key's kind.
    ///
    /// Returns `None` when the value has the wrong kind, does not parse, or is
    /// outside the declared bounds.
    pub fn accept(&self, value: &Value) -> Option<ConfigValue> {
        let accepted = match self.kind {
            ParamKind::Bool => value.as_bool().map(ConfigValue::Bool),
            ParamKind::Int => as_integral(value).map(ConfigValue::Int),
            ParamKind::Float => value
                .as_f64()
                .filter(|value| value.is_finite())
                .map(ConfigValue::Float),
            ParamKind::String => value.as_str().map(|value| ConfigValue::Text(value.to_string())),
            ParamKind::Pattern => value
                .as_str()
                .filter(|value| Regex::new(value).is_ok())
                .map(|value| ConfigValue::Text(value.to_string())),
            ParamKind::Date => value
                .as_str()
                .and_then(parse_date_value)
                .map(ConfigValue::Date),
            ParamKind::Time => value
                .as_str()
                .and_then(parse_time_value)
                .map(ConfigValue::Time),
            ParamKind::Timestamp => value
                .as_str()
                .and_then(parse_timestamp_value)
                .map(ConfigValue::Timestamp),
        }?;

        match (self.bounds, accepted.as_f64()) {
            (Some(bounds), Some(number)) if !bounds.contains(number) => None,
            _ => Some(accepted),
        }
    }
}

/// Outcome of projecting an untrusted config map onto declared keys.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub config: TypedConfig,
    /// Declared keys that fell back to their default although the source map
    /// held a value for them.
    pub rejected: Vec<&'static str>,
    /// Source keys that no spec declares.
    pub discarded: Vec<String>,
}

/// Project an untrusted config map onto a method's declared keys.
///
/// Each declared key takes the source value when it is acceptable, otherwise
/// its default. Undeclared source keys are dropped. This never fails.
pub fn project_config(specs: &[ParamSpec], source: Option<&Map<String, Value>>) -> Projection {
    let mut config = TypedConfig::new();
    let mut rejected = Vec::new();

    for spec in specs {
        let raw = source.and_then(|map| map.get(spec.key));
        let value = match raw.map(|raw| spec.accept(raw)) {
            Some(Some(value)) => value,
            Some(None) => {
                rejected.push(spec.key);
                spec.default.clone()
            }
            None => spec.default.clone(),
        };
        config.insert(spec.key, value);
    }

    let discarded = source
        .map(|map| {
            map.keys()
                .filter(|key| !specs.iter().any(|spec| spec.key == key.as_str()))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    Projection {
        config,
        rejected,
        discarded,
    }
}

fn as_integral(value: &Value) -> Option<i64> {
    if let Some(value) = value.as_i64() {
        return Some(value);
    }
    let value = value.as_f64()?;
    if value.fract() == 0.0 && value >= i64::MIN as f64 && value < i64::MAX as f64 {
        Some(value as i64)
    } else {
        None
    }
}

pub fn parse_date_value(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

pub fn parse_time_value(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M:%S")
        .ok()
        .or_else(|| NaiveTime::parse_from_str(value, "%H:%M:%S%.f").ok())
}

pub fn parse_timestamp_value(value: &str) -> Option<NaiveDateTime> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.naive_utc())
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").ok())
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f").ok())
        .or_else(|| NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S").ok())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn int_accepts_integral_floats_only() {
        let spec = ParamSpec::int("min", 0);
        assert_eq!(spec.accept(&json!(3)), Some(ConfigValue::Int(3)));
        assert_eq!(spec.accept(&json!(3.0)), Some(ConfigValue::Int(3)));
        assert_eq!(spec.accept(&json!(3.5)), None);
        assert_eq!(spec.accept(&json!("3")), None);
    }

    #[test]
    fn bounds_reject_out_of_range_numbers() {
        let spec = ParamSpec::float("p", 0.5).within(0.0, 1.0);
        assert_eq!(spec.accept(&json!(1)), Some(ConfigValue::Float(1.0)));
        assert_eq!(spec.accept(&json!(1.5)), None);
        assert_eq!(spec.accept(&json!(-0.1)), None);
    }

    #[test]
    fn pattern_must_compile() {
        let spec = ParamSpec::pattern("pattern", "[a-z]+");
        assert_eq!(
            spec.accept(&json!("[0-9]{3}")),
            Some(ConfigValue::Text("[0-9]{3}".to_string()))
        );
        assert_eq!(spec.accept(&json!("[unclosed")), None);
    }

    #[test]
    fn temporal_kinds_parse_strings() {
        let date = ParamSpec::date("min", NaiveDate::default());
        assert!(matches!(date.accept(&json!("2024-02-29")), Some(ConfigValue::Date(_))));
        assert_eq!(date.accept(&json!("2023-02-29")), None);

        let timestamp = ParamSpec::timestamp("min", NaiveDateTime::default());
        assert!(timestamp.accept(&json!("2024-01-01T10:00:00Z")).is_some());
        assert!(timestamp.accept(&json!("2024-01-01 10:00:00")).is_some());
        assert_eq!(timestamp.accept(&json!(1_700_000_000)), None);
    }

    #[test]
    fn projection_reports_rejected_and_discarded_keys() {
        let specs = [ParamSpec::int("min", 0), ParamSpec::int("max", 10)];
        let source = json!({"min": "low", "max": 5, "legacy": true});
        let projection = project_config(&specs, source.as_object());

        assert_eq!(projection.config.get("min"), Some(&ConfigValue::Int(0)));
        assert_eq!(projection.config.get("max"), Some(&ConfigValue::Int(5)));
        assert_eq!(projection.rejected, vec!["min"]);
        assert_eq!(projection.discarded, vec!["legacy".to_string()]);
    }
}
