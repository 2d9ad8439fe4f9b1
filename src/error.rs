//! Error types for `sceneschema`
//!
//! Three families cover the loader's contract: [`LoadError`] for documents
//! that cannot be turned into a schema (syntax, shape, or [`SchemaError`]
//! violations), [`NotFoundError`] for lookups against a loaded schema, and
//! [`InstanceError`] for concrete scene items checked against it.
//! [`SceneSchemaError`] aggregates them for the CLI and maps each to an exit
//! code.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

// ============================================================================
// Exit Codes
// ============================================================================

/// Exit codes for `sceneschema` CLI operations.
pub struct ExitCode;

impl ExitCode {
    /// Successful execution
    pub const SUCCESS: i32 = 0;

    /// General error
    pub const ERROR: i32 = 1;

    /// Schema error (invalid YAML, validation failure, rejected scene items)
    pub const SCHEMA_ERROR: i32 = 2;

    /// I/O error (file not found, permission denied)
    pub const IO_ERROR: i32 = 3;

    /// Lookup of an unknown item type or property
    pub const NOT_FOUND: i32 = 4;

    /// Usage error (invalid arguments, missing required options)
    pub const USAGE_ERROR: i32 = 64;
}

// ============================================================================
// Top-Level Error
// ============================================================================

/// Top-level error type for `sceneschema` operations.
///
/// Aggregates the domain errors and provides the exit code mapping used by
/// the binary.
#[derive(Debug, Error)]
pub enum SceneSchemaError {
    /// Schema document could not be loaded
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Lookup against a loaded schema failed
    #[error(transparent)]
    NotFound(#[from] NotFoundError),

    /// A scene item definition was rejected
    #[error(transparent)]
    Instance(#[from] InstanceError),

    /// One or more schema files failed validation
    #[error("{count} file(s) failed validation")]
    ValidationFailed {
        /// Number of files that failed validation.
        count: usize,
    },

    /// One or more entries of a scene document were rejected
    #[error("{rejected} scene item(s) rejected")]
    SceneRejected {
        /// Number of rejected entries.
        rejected: usize,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing or serialization error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl SceneSchemaError {
    /// Returns the appropriate exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Load(LoadError::MissingFile { .. } | LoadError::Read { .. }) | Self::Io(_) => {
                ExitCode::IO_ERROR
            }
            Self::Load(_)
            | Self::Instance(_)
            | Self::ValidationFailed { .. }
            | Self::SceneRejected { .. }
            | Self::Yaml(_) => ExitCode::SCHEMA_ERROR,
            Self::NotFound(_) => ExitCode::NOT_FOUND,
            Self::Json(_) => ExitCode::ERROR,
        }
    }
}

// ============================================================================
// Load Errors
// ============================================================================

/// Failures while turning a source into a [`Schema`](crate::config::Schema).
///
/// Loading is all-or-nothing: any of these means no schema was produced.
#[derive(Debug, Error)]
pub enum LoadError {
    /// YAML syntax error, empty document, or wrong top-level shape
    #[error("parse error in {origin}{}: {message}", .line.map_or_else(String::new, |l| format!(" (line {l})")))]
    Parse {
        /// Where the document came from (file path, `<builtin>`, ...)
        origin: String,
        /// Line number where the error occurred (if available)
        line: Option<usize>,
        /// Error message from the parser
        message: String,
    },

    /// Document parsed but violates the schema rules
    #[error("schema validation failed for {origin}: {} error(s)", .errors.len())]
    Invalid {
        /// Where the document came from
        origin: String,
        /// Every violation found, in document order
        errors: Vec<SchemaError>,
    },

    /// Schema file does not exist or is not a regular file
    #[error("file not found: {path}")]
    MissingFile {
        /// Path to the missing file
        path: PathBuf,
    },

    /// Reading the source failed midway
    #[error("failed to read {origin}: {source}")]
    Read {
        /// Where the document came from
        origin: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Source exceeds the configured size limit
    #[error("{origin} is {size} bytes, at most {limit} bytes allowed")]
    TooLarge {
        /// Where the document came from
        origin: String,
        /// Actual size in bytes
        size: usize,
        /// Configured limit in bytes
        limit: usize,
    },
}

impl LoadError {
    /// Returns the schema violations if this is a validation failure.
    #[must_use]
    pub fn schema_errors(&self) -> &[SchemaError] {
        match self {
            Self::Invalid { errors, .. } => errors,
            _ => &[],
        }
    }
}

// ============================================================================
// Schema Errors
// ============================================================================

/// A single violation found while validating a schema document.
///
/// `name` identifies the offending item type or property (or the general
/// field / section); `path` locates it in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaError {
    /// What rule was violated
    pub kind: SchemaErrorKind,
    /// Item type, property, or field the violation is about
    pub name: String,
    /// Document path (e.g., `items[2].item.editable_properties`)
    pub path: String,
    /// Human-readable description
    pub detail: String,
    /// Whether this blocks loading
    pub severity: Severity,
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
        };
        write!(f, "{}: {} at {}", prefix, self.detail, self.path)
    }
}

impl std::error::Error for SchemaError {}

/// Kind of schema violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SchemaErrorKind {
    /// A top-level section (`version`, `general`, `items`, `properties`) is absent
    MissingSection,
    /// `general` lacks one of its four fields
    MissingGeneralField,
    /// A required key of an item or property is missing or empty
    MissingField,
    /// Two item types share a `type`
    DuplicateItemType,
    /// Two properties share a `name`
    DuplicateProperty,
    /// Property `type` is not a known widget type
    UnknownWidgetType,
    /// Item lists a property name absent from the catalog
    DanglingPropertyReference,
    /// Slider `parms` is not `[min, max, scale]` with `min < max`
    InvalidSliderParams,
    /// `EditNumberSpin` `parms` is not `{step, maximum}`
    InvalidSpinParams,
    /// A geometric field has the wrong shape
    InvalidGeometry,
    /// A default or widget value has an unsupported shape
    InvalidValue,
    /// A value lies outside the widget's declared range
    ValueOutOfRange,
    /// An item's `default` sets a property it does not list
    UnlistedDefault,
    /// An item's `default` omits a required property
    IncompleteDefault,
    /// A property name appears twice in one list
    DuplicateReference,
    /// Document exceeds a configured count limit
    LimitExceeded,
}

impl SchemaErrorKind {
    /// Returns the snake-case identifier used in machine-readable output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MissingSection => "missing_section",
            Self::MissingGeneralField => "missing_general_field",
            Self::MissingField => "missing_field",
            Self::DuplicateItemType => "duplicate_item_type",
            Self::DuplicateProperty => "duplicate_property",
            Self::UnknownWidgetType => "unknown_widget_type",
            Self::DanglingPropertyReference => "dangling_property_reference",
            Self::InvalidSliderParams => "invalid_slider_params",
            Self::InvalidSpinParams => "invalid_spin_params",
            Self::InvalidGeometry => "invalid_geometry",
            Self::InvalidValue => "invalid_value",
            Self::ValueOutOfRange => "value_out_of_range",
            Self::UnlistedDefault => "unlisted_default",
            Self::IncompleteDefault => "incomplete_default",
            Self::DuplicateReference => "duplicate_reference",
            Self::LimitExceeded => "limit_exceeded",
        }
    }
}

impl fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity level for schema violations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Error - violation that prevents the schema from being used
    Error,
    /// Warning - suspicious authoring that does not prevent loading
    Warning,
}

// ============================================================================
// Lookup Errors
// ============================================================================

/// Lookup of a name the loaded schema does not define.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFoundError {
    /// Unknown item type
    #[error("unknown item type '{name}'{}", did_you_mean(.suggestion))]
    ItemType {
        /// Requested type
        name: String,
        /// Closest known type, if any is close enough
        suggestion: Option<String>,
    },

    /// Unknown property
    #[error("unknown property '{name}'{}", did_you_mean(.suggestion))]
    Property {
        /// Requested property name
        name: String,
        /// Closest known property, if any is close enough
        suggestion: Option<String>,
    },
}

fn did_you_mean(suggestion: &Option<String>) -> String {
    suggestion
        .as_ref()
        .map_or_else(String::new, |s| format!(" (did you mean '{s}'?)"))
}

// ============================================================================
// Instance Errors
// ============================================================================

/// A concrete scene item definition that cannot be constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InstanceError {
    /// Scene document has no `items` sequence
    #[error("'items' group not present in scene document")]
    MissingItemsGroup,

    /// Scene entry is not wrapped in an `item` key
    #[error("'item' not present in scene entry, ignored")]
    MissingItemKey,

    /// Item definition has no `type`
    #[error("'type' not present in item definition, ignored")]
    MissingType,

    /// Item type is not defined by the schema
    #[error("item type is not implemented: {0}")]
    UnknownType(NotFoundError),

    /// A required property is absent
    #[error("required property '{property}' not present in {item_type} definition, ignored")]
    MissingRequired {
        /// Item type being constructed
        item_type: String,
        /// Missing property name
        property: String,
    },

    /// A field holds a value of the wrong shape
    #[error("invalid value for '{field}' in {item_type} definition: {detail}")]
    InvalidValue {
        /// Item type being constructed (empty if not yet known)
        item_type: String,
        /// Offending field
        field: String,
        /// What was expected
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let issue = SchemaError {
            kind: SchemaErrorKind::DanglingPropertyReference,
            name: "circle".to_string(),
            path: "items[1].item.editable_properties".to_string(),
            detail: "unknown property 'colour'".to_string(),
            severity: Severity::Error,
        };
        assert_eq!(
            issue.to_string(),
            "error: unknown property 'colour' at items[1].item.editable_properties"
        );
    }

    #[test]
    fn test_schema_error_warning_display() {
        let issue = SchemaError {
            kind: SchemaErrorKind::ValueOutOfRange,
            name: "corridor".to_string(),
            path: "items[3].item.default.alpha".to_string(),
            detail: "value 30 outside slider range [0, 10]".to_string(),
            severity: Severity::Warning,
        };
        assert!(issue.to_string().starts_with("warning: "));
    }

    #[test]
    fn test_parse_error_display_with_line() {
        let err = LoadError::Parse {
            origin: "items.yaml".to_string(),
            line: Some(12),
            message: "unexpected token".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("items.yaml"));
        assert!(text.contains("(line 12)"));
        assert!(text.contains("unexpected token"));
    }

    #[test]
    fn test_not_found_suggestion_display() {
        let err = NotFoundError::ItemType {
            name: "circel".to_string(),
            suggestion: Some("circle".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "unknown item type 'circel' (did you mean 'circle'?)"
        );

        let err = NotFoundError::Property {
            name: "zzz".to_string(),
            suggestion: None,
        };
        assert_eq!(err.to_string(), "unknown property 'zzz'");
    }

    #[test]
    fn test_exit_codes() {
        let err = SceneSchemaError::from(NotFoundError::Property {
            name: "x".to_string(),
            suggestion: None,
        });
        assert_eq!(err.exit_code(), ExitCode::NOT_FOUND);

        let err = SceneSchemaError::from(LoadError::MissingFile {
            path: PathBuf::from("missing.yaml"),
        });
        assert_eq!(err.exit_code(), ExitCode::IO_ERROR);

        let err = SceneSchemaError::ValidationFailed { count: 2 };
        assert_eq!(err.exit_code(), ExitCode::SCHEMA_ERROR);
    }

    #[test]
    fn test_schema_errors_accessor() {
        let err = LoadError::Invalid {
            origin: "x".to_string(),
            errors: vec![SchemaError {
                kind: SchemaErrorKind::MissingSection,
                name: "items".to_string(),
                path: "items".to_string(),
                detail: "missing".to_string(),
                severity: Severity::Error,
            }],
        };
        assert_eq!(err.schema_errors().len(), 1);
        assert!(
            LoadError::MissingFile {
                path: PathBuf::from("a")
            }
            .schema_errors()
            .is_empty()
        );
    }
}
