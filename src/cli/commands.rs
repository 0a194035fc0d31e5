//! CLI command implementations

use std::io::{self, Read, Write};
use std::path::PathBuf;

use serde_json::{json, Map, Value};

use super::args::{Cli, Command, ProjectionArgs};
use super::config::Config;
use super::errors::{CliError, CliResult};
use super::io::{read_request_from, write_error_to, write_response_to};
use crate::observability::{log_event_with_fields, Event, Logger, Severity};
use crate::projection::{ProjectedSchema, SchemaProjector, Selection};
use crate::record::Instantiator;
use crate::schema::{ExtraFieldPolicy, FieldDef, Schema, SchemaLoader, SchemaResult};

/// Dispatch a parsed command line
pub fn run_command(cli: Cli) -> CliResult<()> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let severity: Severity = match &cli.log_level {
        Some(level) => level
            .parse()
            .map_err(|e: String| CliError::usage(format!("--log-level: {}", e)))?,
        None => config.log_severity()?,
    };
    Logger::set_min_severity(severity);

    if let Some(path) = &cli.config {
        let shown = path.display().to_string();
        log_event_with_fields(
            Event::ConfigLoaded,
            &[("path", shown.as_str()), ("policy", config.extra_field_policy.as_str())],
        );
    }

    match cli.command {
        Command::Demo => demo(&mut io::stdout().lock()),
        Command::Project { target } => project(&config, &target),
        Command::Instantiate {
            target,
            lenient,
            strict,
        } => instantiate(&config, &target, choose_policy(&config, lenient, strict)),
    }
}

/// `--lenient` and `--strict` override the config file's policy.
pub fn choose_policy(config: &Config, lenient: bool, strict: bool) -> ExtraFieldPolicy {
    if lenient {
        ExtraFieldPolicy::Lenient
    } else if strict {
        ExtraFieldPolicy::Strict
    } else {
        config.extra_field_policy
    }
}

/// Print a projected schema.
pub fn project(config: &Config, target: &ProjectionArgs) -> CliResult<()> {
    project_to(config, target, &mut io::stdout().lock())
}

pub fn project_to<W: Write>(config: &Config, target: &ProjectionArgs, out: &mut W) -> CliResult<()> {
    let projected = resolve(config, target)?;
    write_response_to(out, serde_json::to_value(&projected)?)
}

/// Validate one record from stdin and print it.
pub fn instantiate(config: &Config, target: &ProjectionArgs, policy: ExtraFieldPolicy) -> CliResult<()> {
    instantiate_with(config, target, policy, io::stdin().lock(), &mut io::stdout().lock())
}

/// Validate one record read from `input`. A rejected record is reported
/// on `out` as an error envelope and also returned as the error.
pub fn instantiate_with<R: Read, W: Write>(
    config: &Config,
    target: &ProjectionArgs,
    policy: ExtraFieldPolicy,
    input: R,
    out: &mut W,
) -> CliResult<()> {
    let projected = resolve(config, target)?;
    let request = read_request_from(input)?;

    match Instantiator::new(policy).instantiate(&projected, &request) {
        Ok(record) => write_response_to(out, serde_json::to_value(&record)?),
        Err(err) => {
            write_error_to(out, err.code().code(), err.message())?;
            Err(err.into())
        }
    }
}

/// Loads the source schema and applies the requested selection. No
/// selection means the identity projection.
fn resolve(config: &Config, target: &ProjectionArgs) -> CliResult<ProjectedSchema> {
    let dir: PathBuf = target
        .schema_dir
        .clone()
        .or_else(|| config.schema_dir.clone())
        .ok_or_else(|| CliError::usage("no schema directory: pass --schema-dir or set schema_dir in config"))?;

    let mut loader = SchemaLoader::new(&dir);
    loader.load_all()?;
    let schema = loader.require(&target.schema)?;

    let selection = target.selection().unwrap_or_else(|| Selection::omit(Vec::<String>::new()));
    Ok(SchemaProjector::project(schema, &selection)?)
}

/// The canonical example: a user model with sensitive fields.
pub fn demo_user_schema() -> SchemaResult<Schema> {
    let fields = vec![
        FieldDef::required_int("id").with_description("User ID"),
        FieldDef::required_string("username").with_description("Public username"),
        FieldDef::required_string("email").with_description("Email address"),
        FieldDef::required_string("password_hash").with_description("Hashed password"),
        FieldDef::required_string("api_key").with_description("API access key"),
        FieldDef::required_string("ssn").with_description("Social Security Number"),
        FieldDef::required_string("created_at").with_description("Account creation timestamp"),
    ];
    Ok(Schema::new("User", fields)?.with_description("Private user model with sensitive fields"))
}

/// Serialization-time exclusion: the full record is filtered while being
/// written out. A misspelled name filters nothing and no error is raised.
fn dump_excluding(record: &Map<String, Value>, exclude: &[&str]) -> Map<String, Value> {
    record
        .iter()
        .filter(|(k, _)| !exclude.contains(&k.as_str()))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Walk through the unsafe exclusion path and the two schema projections.
pub fn demo<W: Write>(out: &mut W) -> CliResult<()> {
    let user = demo_user_schema()?;
    let strict = Instantiator::strict();

    let original_input = json!({
        "id": 123,
        "username": "john_doe",
        "email": "john@example.com",
        "password_hash": "$2b$12$abcd1234...",
        "api_key": "sk-1234567890abcdef",
        "ssn": "123-45-6789",
        "created_at": "2024-01-15T10:30:00Z"
    });
    let original = strict.instantiate(&user, &original_input)?;
    writeln!(out, "Original User (contains sensitive data):")?;
    writeln!(out, "{}", serde_json::to_string(&original)?)?;
    writeln!(out)?;

    // Typo: "ss" instead of "ssn"
    let typo = ["password_hash", "api_key", "ss"];
    let full = original_input.as_object().cloned().unwrap_or_default();
    let serialized = dump_excluding(&full, &typo);
    writeln!(out, "Serialization with 'exclude' (typo in field name):")?;
    writeln!(out, "{}", serde_json::to_string(&serialized)?)?;
    if serialized.contains_key("ssn") {
        writeln!(out, "SECURITY RISK: SSN leaked due to typo!")?;
    }
    writeln!(out)?;

    writeln!(out, "Same typo passed to omit:")?;
    match SchemaProjector::omit(&user, typo) {
        Ok(_) => writeln!(out, "accepted")?,
        Err(e) => writeln!(out, "rejected: {}", e)?,
    }
    writeln!(out)?;

    let public_user = SchemaProjector::omit(&user, ["password_hash", "api_key", "ssn"])?;
    let public = strict.instantiate(
        &public_user,
        &json!({
            "id": 123,
            "username": "john_doe",
            "email": "john@example.com",
            "created_at": "2024-01-15T10:30:00Z"
        }),
    )?;
    writeln!(out, "Public User (sensitive fields omitted from the schema):")?;
    writeln!(out, "{}", serde_json::to_string(&public)?)?;
    writeln!(out)?;

    writeln!(out, "Public User given the full record:")?;
    match strict.instantiate(&public_user, &original_input) {
        Ok(record) => writeln!(out, "{}", serde_json::to_string(&record)?)?,
        Err(e) => writeln!(out, "rejected (strict): {}", e)?,
    }
    let trimmed = Instantiator::lenient().instantiate(&public_user, &original_input)?;
    writeln!(out, "dropped (lenient): {}", serde_json::to_string(&trimmed)?)?;
    writeln!(out)?;

    let minimal_user = SchemaProjector::pick(&user, ["id", "username"])?;
    let minimal = strict.instantiate(&minimal_user, &json!({ "id": 123, "username": "john_doe" }))?;
    writeln!(out, "Minimal User (only safe fields picked into the schema):")?;
    writeln!(out, "{}", serde_json::to_string(&minimal)?)?;

    out.flush()?;
    Ok(())
}
