//! `check-scene` command
//!
//! Checks every item of a drawing document against a schema and lists the
//! entries that would be skipped on load.

use serde::Serialize;
use serde_yaml::Value;

use crate::cli::args::{CheckSceneArgs, OutputFormat};
use crate::cli::commands::load_schema;
use crate::error::SceneSchemaError;
use crate::scene::{ItemInstance, SceneReport};

#[derive(Debug, Serialize)]
struct Output<'a> {
    scene: String,
    items: &'a [ItemInstance],
    failures: Vec<Failure>,
}

#[derive(Debug, Serialize)]
struct Failure {
    #[serde(skip_serializing_if = "Option::is_none")]
    index: Option<usize>,
    message: String,
}

/// Runs the scene check.
///
/// # Errors
///
/// Returns [`SceneSchemaError::SceneRejected`] if any entry fails, or an
/// error if the schema or the scene document cannot be read.
pub fn run(args: &CheckSceneArgs) -> Result<(), SceneSchemaError> {
    let schema = load_schema(args.schema.as_deref())?;

    tracing::info!(scene = %args.scene.display(), "checking scene document");
    let text = std::fs::read_to_string(&args.scene)?;
    let doc: Value = serde_yaml::from_str(&text)?;

    let report = schema.check_scene(&doc);
    tracing::info!(
        accepted = report.items.len(),
        rejected = report.failures.len(),
        "scene checked"
    );

    match args.format {
        OutputFormat::Human => print_human(&report),
        OutputFormat::Json => {
            let output = Output {
                scene: args.scene.display().to_string(),
                items: &report.items,
                failures: report
                    .failures
                    .iter()
                    .map(|f| Failure {
                        index: f.index,
                        message: f.error.to_string(),
                    })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    if report.is_clean() {
        Ok(())
    } else {
        Err(SceneSchemaError::SceneRejected {
            rejected: report.failures.len(),
        })
    }
}

fn print_human(report: &SceneReport) {
    for item in &report.items {
        println!("ok: {} -> {}", item.type_and_name().trim_end(), item.constructor);
    }
    for failure in &report.failures {
        eprintln!("rejected: {failure}");
    }
}
