//! `validate` command
//!
//! Loads each schema file and reports whether it passes, with every error and
//! warning found. All files are checked even after a failure.

use std::path::Path;

use serde::Serialize;

use crate::cli::args::{OutputFormat, ValidateArgs};
use crate::cli::commands::log_warnings;
use crate::config::{LoadResult, LoaderOptions, SchemaLoader};
use crate::error::{LoadError, SceneSchemaError};

/// Outcome for one file, also the JSON shape of `files[]`.
#[derive(Debug, Serialize)]
struct FileReport {
    file: String,
    valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    item_types: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    properties: Option<usize>,
    errors: Vec<Issue>,
    warnings: Vec<Issue>,
}

#[derive(Debug, Serialize)]
struct Issue {
    #[serde(skip_serializing_if = "Option::is_none")]
    kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<String>,
    message: String,
}

#[derive(Debug, Serialize)]
struct Summary {
    total: usize,
    valid: usize,
    invalid: usize,
}

#[derive(Debug, Serialize)]
struct Output<'a> {
    files: &'a [FileReport],
    summary: Summary,
}

impl FileReport {
    fn passed(path: &Path, result: &LoadResult) -> Self {
        Self {
            file: path.display().to_string(),
            valid: true,
            item_types: Some(result.schema.item_types().count()),
            properties: Some(result.schema.properties().count()),
            errors: Vec::new(),
            warnings: result
                .warnings
                .iter()
                .map(|w| Issue {
                    kind: None,
                    location: w.location.clone(),
                    message: w.message.clone(),
                })
                .collect(),
        }
    }

    fn failed(path: &Path, err: &LoadError) -> Self {
        let errors = match err {
            LoadError::Invalid { errors, .. } => errors
                .iter()
                .map(|e| Issue {
                    kind: Some(e.kind.as_str()),
                    location: Some(e.path.clone()),
                    message: e.detail.clone(),
                })
                .collect(),
            other => vec![Issue {
                kind: None,
                location: None,
                message: other.to_string(),
            }],
        };

        Self {
            file: path.display().to_string(),
            valid: false,
            item_types: None,
            properties: None,
            errors,
            warnings: Vec::new(),
        }
    }

    fn print_human(&self) {
        if self.valid {
            println!(
                "{}: ok ({} item types, {} properties)",
                self.file,
                self.item_types.unwrap_or_default(),
                self.properties.unwrap_or_default()
            );
            for w in &self.warnings {
                println!("  {}", w.line("warning"));
            }
        } else {
            eprintln!("{}: invalid", self.file);
            for e in &self.errors {
                eprintln!("  {}", e.line("error"));
            }
        }
    }
}

impl Issue {
    fn line(&self, severity: &str) -> String {
        match &self.location {
            Some(location) => format!("{severity}: {} at {location}", self.message),
            None => format!("{severity}: {}", self.message),
        }
    }
}

/// Validates every file named on the command line.
///
/// # Errors
///
/// Returns [`SceneSchemaError::ValidationFailed`] if any file fails to load,
/// or a serialization error for JSON output.
pub fn run(args: &ValidateArgs) -> Result<(), SceneSchemaError> {
    let loader = SchemaLoader::new(LoaderOptions {
        strict: args.strict,
        ..LoaderOptions::default()
    });

    let mut reports = Vec::with_capacity(args.files.len());
    for path in &args.files {
        tracing::info!(file = %path.display(), strict = args.strict, "validating schema");

        let report = match loader.load_file(path) {
            Ok(result) => {
                log_warnings(&result.warnings);
                tracing::info!(file = %path.display(), "schema valid");
                FileReport::passed(path, &result)
            }
            Err(err) => {
                tracing::debug!(file = %path.display(), error = %err, "schema rejected");
                FileReport::failed(path, &err)
            }
        };

        if args.format == OutputFormat::Human {
            report.print_human();
        }
        reports.push(report);
    }

    let invalid = reports.iter().filter(|r| !r.valid).count();

    if args.format == OutputFormat::Json {
        let output = Output {
            files: &reports,
            summary: Summary {
                total: reports.len(),
                valid: reports.len() - invalid,
                invalid,
            },
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    }

    if invalid > 0 {
        return Err(SceneSchemaError::ValidationFailed { count: invalid });
    }
    Ok(())
}
