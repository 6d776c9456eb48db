use rngconf_core::{ColumnType, SqlType};
use rngconf_methods::{MethodId, MethodRegistry, MethodSpec, ParamSpec, TypedConfig};
use rngconf_settings::ResolvedFieldConfig;
use serde::Serialize;
use serde_json::Value;

/// A field's resolved configuration as printed by the CLI.
#[derive(Debug, Serialize)]
pub struct ResolvedView<'a> {
    pub field: &'a str,
    /// Column type as shown next to the settings, e.g. `DECIMAL(10, 2) NOT NULL`.
    pub display_type: String,
    pub column_type: &'a ColumnType,
    pub method: MethodId,
    pub config: &'a TypedConfig,
}

pub fn resolved_view(resolved: &ResolvedFieldConfig) -> ResolvedView<'_> {
    ResolvedView {
        field: &resolved.field.name,
        display_type: resolved.field.column_type.display(),
        column_type: &resolved.field.column_type,
        method: resolved.method,
        config: &resolved.config,
    }
}

#[derive(Debug, Serialize)]
pub struct TypeMethods {
    #[serde(rename = "type")]
    pub sql_type: String,
    pub supported: bool,
    pub methods: Vec<MethodView>,
}

#[derive(Debug, Serialize)]
pub struct MethodView {
    pub method: &'static str,
    pub description: &'static str,
    pub default: bool,
    pub params: Vec<ParamView>,
}

#[derive(Debug, Serialize)]
pub struct ParamView {
    pub key: &'static str,
    pub kind: &'static str,
    pub default: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// Registered methods of each type; the first method listed is the type default.
pub fn method_catalog(registry: &MethodRegistry, types: &[SqlType]) -> Vec<TypeMethods> {
    types
        .iter()
        .map(|sql_type| {
            let methods = registry.methods(sql_type);
            TypeMethods {
                sql_type: sql_type.as_str().to_string(),
                supported: rngconf_core::is_supported(sql_type),
                methods: methods
                    .iter()
                    .enumerate()
                    .map(|(idx, spec)| method_view(spec, idx == 0))
                    .collect(),
            }
        })
        .collect()
}

fn method_view(spec: &MethodSpec, default: bool) -> MethodView {
    MethodView {
        method: spec.id.title(),
        description: spec.description,
        default,
        params: spec.params.iter().map(param_view).collect(),
    }
}

fn param_view(param: &ParamSpec) -> ParamView {
    ParamView {
        key: param.key,
        kind: param.kind.as_str(),
        default: param.default.to_json(),
        min: param.bounds.map(|bounds| bounds.min),
        max: param.bounds.map(|bounds| bounds.max),
    }
}

#[cfg(test)]
mod tests {
    use rngconf_core::Field;
    use rngconf_settings::reconcile;
    use serde_json::json;

    use super::*;

    #[test]
    fn resolved_view_shows_the_display_type() {
        let registry = MethodRegistry::new();
        let mut amount = Field::new("amount", SqlType::Decimal, false);
        amount.column_type.precision = Some(10);
        amount.column_type.scale = Some(2);

        let resolved = reconcile(&registry, &amount, None);
        let value = serde_json::to_value(resolved_view(&resolved)).expect("serialize");

        assert_eq!(value["field"], json!("amount"));
        assert_eq!(value["display_type"], json!("DECIMAL(10, 2) NOT NULL"));
        assert_eq!(value["column_type"]["type"], json!("DECIMAL"));
        assert_eq!(value["method"], json!("Uniform"));
        assert_eq!(value["config"], json!({"min": 0.0, "max": 1.0}));
    }

    #[test]
    fn catalog_marks_the_default_method() {
        let registry = MethodRegistry::new();
        let catalog = method_catalog(&registry, &[SqlType::Boolean, SqlType::Binary]);

        let value = serde_json::to_value(&catalog).expect("serialize");
        assert_eq!(value[0]["type"], json!("BOOLEAN"));
        assert_eq!(value[0]["methods"][0]["method"], json!("Bernoulli"));
        assert_eq!(value[0]["methods"][0]["default"], json!(true));
        assert_eq!(value[0]["methods"][0]["params"][0]["key"], json!("p"));
        assert_eq!(value[0]["methods"][0]["params"][0]["max"], json!(1.0));
        assert_eq!(value[1]["supported"], json!(false));
        assert_eq!(value[1]["methods"], json!([]));
    }
}
