mod config;
mod output;

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use rngconf_core::{Error as CoreError, Relation, RuntimeConfig, SqlType, validate_relation};
use rngconf_methods::MethodRegistry;
use rngconf_settings::{JsonFilePersistence, Mutation, ResolvedFieldConfig, SettingsSession};
use schemars::schema_for;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

use config::{ConfigError, DEFAULT_CONFIG_PATH, init_logging, load_or_create_config};

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("core error: {0}")]
    Core(#[from] CoreError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("write ignored for field '{field}': {reason}")]
    Ignored { field: String, reason: &'static str },
    #[error("doctor found {0} issue(s)")]
    DoctorIssues(usize),
}

#[derive(Parser, Debug)]
#[command(name = "rngconf", version, about = "Random generation settings for relation fields")]
struct Cli {
    /// Configuration file (created with defaults when missing).
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Settings store file; overrides `settings_path` from the config file.
    #[arg(long, global = true)]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the resolved generator configuration of every field.
    Reconcile(RelationArgs),
    /// Change a field's method and/or config values.
    Set(SetArgs),
    /// Forget a field's settings.
    Reset(FieldArgs),
    /// List the generator methods available per SQL type.
    Methods(MethodsArgs),
    /// Report stored settings that are ignored or partly defaulted.
    Doctor(RelationArgs),
    /// Remove settings of unknown or unsupported fields.
    Prune(RelationArgs),
    /// Print the JSON schema of the pipeline runtime configuration.
    RuntimeSchema,
}

#[derive(Args, Debug)]
struct RelationArgs {
    /// Relation schema as JSON (`{"name": ..., "fields": [...]}`).
    #[arg(long)]
    relation: PathBuf,
}

#[derive(Args, Debug)]
struct FieldArgs {
    #[command(flatten)]
    relation: RelationArgs,
    /// Field name (case-insensitive).
    #[arg(long)]
    field: String,
}

#[derive(Args, Debug)]
struct SetArgs {
    #[command(flatten)]
    target: FieldArgs,
    /// Generator method title (e.g. `Uniform`).
    #[arg(long)]
    method: Option<String>,
    /// Config value as `key=value`; the value is read as JSON, or as a string
    /// when it is not valid JSON.
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_param)]
    params: Vec<(String, Value)>,
}

#[derive(Args, Debug)]
struct MethodsArgs {
    /// Only list methods for this SQL type.
    #[arg(long = "type", value_name = "SQL_TYPE")]
    sql_type: Option<String>,
}

fn main() -> Result<(), CliError> {
    let cli = Cli::parse();

    let mut config = load_or_create_config(&cli.config)?;
    if let Some(settings) = cli.settings {
        config.settings_path = settings;
    }
    init_logging(&config.log)?;
    tracing::debug!(
        event = "config_loaded",
        path = %cli.config.display(),
        settings_path = %config.settings_path.display()
    );

    let registry = MethodRegistry::new();
    match cli.command {
        Command::Reconcile(args) => {
            let session = open_session(registry, &args.relation, &config.settings_path)?;
            let resolved = session.resolved();
            let views: Vec<_> = resolved.iter().map(output::resolved_view).collect();
            print_json(&views)
        }
        Command::Set(args) => run_set(registry, args, &config.settings_path),
        Command::Reset(args) => {
            let mut session = open_session(registry, &args.relation.relation, &config.settings_path)?;
            if session.relation().field(&args.field).is_none() {
                return Err(CliError::InvalidArgument(format!(
                    "no field '{}' in relation",
                    args.field
                )));
            }
            if !session.reset(&args.field) {
                tracing::warn!(event = "settings_not_saved", field = %args.field);
            }
            print_resolved(session.resolve(&args.field).as_ref())
        }
        Command::Methods(args) => {
            let types: Vec<SqlType> = match args.sql_type {
                Some(name) => vec![SqlType::from(name)],
                None => rngconf_core::RNG_SUPPORTED_TYPES.to_vec(),
            };
            print_json(&output::method_catalog(&registry, &types))
        }
        Command::Doctor(args) => {
            let session = open_session(registry, &args.relation, &config.settings_path)?;
            let report = session.doctor();
            print_json(&report)?;
            if report.is_clean() {
                Ok(())
            } else {
                Err(CliError::DoctorIssues(report.issues.len()))
            }
        }
        Command::Prune(args) => {
            let mut session = open_session(registry, &args.relation, &config.settings_path)?;
            let outcome = session.prune();
            if !outcome.persisted {
                tracing::warn!(event = "settings_not_saved", removed = outcome.removed.len());
            }
            print_json(&outcome)
        }
        Command::RuntimeSchema => print_json(&schema_for!(RuntimeConfig)),
    }
}

fn run_set(registry: MethodRegistry, args: SetArgs, settings_path: &Path) -> Result<(), CliError> {
    let SetArgs {
        target,
        method,
        params,
    } = args;
    if method.is_none() && params.is_empty() {
        return Err(CliError::InvalidArgument(
            "nothing to set: pass --method and/or --param".to_string(),
        ));
    }

    let mut session = open_session(registry, &target.relation.relation, settings_path)?;
    let mut persisted = true;

    if let Some(method) = method {
        let outcome = session.set_method(&target.field, &method);
        ensure_applied(&target.field, &outcome.mutation)?;
        persisted &= outcome.persisted;
    }
    if !params.is_empty() {
        let partial: Map<String, Value> = params.into_iter().collect();
        let outcome = session.update(&target.field, &partial);
        ensure_applied(&target.field, &outcome.mutation)?;
        persisted &= outcome.persisted;
    }

    if !persisted {
        tracing::warn!(event = "settings_not_saved", field = %target.field);
    }
    print_resolved(session.resolve(&target.field).as_ref())
}

fn open_session(
    registry: MethodRegistry,
    relation_path: &Path,
    settings_path: &Path,
) -> Result<SettingsSession<JsonFilePersistence>, CliError> {
    let relation = load_relation(relation_path)?;
    Ok(SettingsSession::open(
        registry,
        relation,
        JsonFilePersistence::new(settings_path),
    ))
}

fn load_relation(path: &Path) -> Result<Relation, CliError> {
    let content = std::fs::read_to_string(path)?;
    let relation: Relation = serde_json::from_str(&content)?;
    validate_relation(&relation)?;
    tracing::debug!(
        event = "relation_loaded",
        relation = %relation.name,
        fields = relation.fields.len()
    );
    Ok(relation)
}

fn ensure_applied(field: &str, mutation: &Mutation) -> Result<(), CliError> {
    match mutation {
        Mutation::Applied(_) => Ok(()),
        Mutation::Ignored(reason) => Err(CliError::Ignored {
            field: field.to_string(),
            reason: reason.as_str(),
        }),
    }
}

fn parse_param(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{raw}'"));
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

fn print_resolved(resolved: Option<&ResolvedFieldConfig>) -> Result<(), CliError> {
    print_json(&resolved.map(output::resolved_view))
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
