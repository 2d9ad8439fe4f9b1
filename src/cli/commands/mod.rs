//! CLI command dispatch and handlers
//!
//! Routes parsed CLI arguments to the appropriate command handler.

pub mod check_scene;
pub mod completions;
pub mod show;
pub mod validate;
pub mod version;

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;

use crate::cli::args::{Cli, Commands, OutputFormat};
use crate::config::{LoadWarning, Schema, SchemaLoader, SchemaSource};
use crate::error::{LoadError, SceneSchemaError};

/// Dispatch a parsed CLI invocation to the appropriate command handler.
///
/// # Errors
///
/// Returns an error if the dispatched command handler fails.
pub fn dispatch(cli: Cli) -> Result<(), SceneSchemaError> {
    match cli.command {
        Commands::Validate(args) => validate::run(&args),
        Commands::Show(args) => show::run(&args),
        Commands::CheckScene(args) => check_scene::run(&args),
        Commands::Completions(args) => {
            completions::run(&args);
            Ok(())
        }
        Commands::Version(args) => version::run(&args),
    }
}

/// Loads the schema file given on the command line, or the built-in one.
///
/// Warnings are logged; schema errors are printed one per line before the
/// error is returned.
pub(crate) fn load_schema(path: Option<&Path>) -> Result<Arc<Schema>, SceneSchemaError> {
    let source = path.map_or(SchemaSource::Builtin, |p| SchemaSource::File(p.to_path_buf()));
    tracing::debug!(origin = %source.origin(), "loading schema");

    match SchemaLoader::with_defaults().load(&source) {
        Ok(result) => {
            log_warnings(&result.warnings);
            Ok(result.schema)
        }
        Err(err) => {
            print_schema_errors(&err);
            Err(err.into())
        }
    }
}

pub(crate) fn log_warnings(warnings: &[LoadWarning]) {
    for warning in warnings {
        tracing::warn!(
            location = warning.location.as_deref().unwrap_or("<unknown>"),
            "{}",
            warning.message
        );
    }
}

pub(crate) fn print_schema_errors(err: &LoadError) {
    for issue in err.schema_errors() {
        eprintln!("  {issue}");
    }
}

/// Prints a value as YAML (human format) or pretty JSON.
pub(crate) fn emit<T: Serialize + ?Sized>(
    value: &T,
    format: OutputFormat,
) -> Result<(), SceneSchemaError> {
    match format {
        OutputFormat::Human => print!("{}", serde_yaml::to_string(value)?),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(value)?),
    }
    Ok(())
}
