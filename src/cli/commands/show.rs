//! `show` command
//!
//! Read-only lookups against a loaded schema, printed as YAML or JSON.

use serde::Serialize;

use crate::cli::args::{ShowArgs, ShowTarget};
use crate::cli::commands::{emit, load_schema};
use crate::error::SceneSchemaError;

/// Row of `show types`.
#[derive(Debug, Serialize)]
struct TypeSummary<'a> {
    #[serde(rename = "type")]
    type_name: &'a str,
    constructor: &'a str,
    creatable: bool,
}

/// Prints the requested schema entry.
///
/// # Errors
///
/// Returns an error if the schema cannot be loaded, the name is unknown, or
/// output serialization fails.
pub fn run(args: &ShowArgs) -> Result<(), SceneSchemaError> {
    let schema = load_schema(args.schema.as_deref())?;

    match &args.target {
        ShowTarget::Types => {
            let rows: Vec<TypeSummary<'_>> = schema
                .item_types()
                .map(|item| TypeSummary {
                    type_name: &item.type_name,
                    constructor: &item.constructor,
                    creatable: item.default.is_some(),
                })
                .collect();
            emit(&rows, args.format)
        }
        ShowTarget::Item { name } => emit(schema.item_type(name)?, args.format),
        ShowTarget::Property { name } => emit(schema.property(name)?, args.format),
        ShowTarget::Defaults { item_type } => {
            emit(&schema.effective_defaults(item_type)?, args.format)
        }
        ShowTarget::Widgets { item_type } => {
            emit(&schema.edit_widgets(item_type)?, args.format)
        }
    }
}
