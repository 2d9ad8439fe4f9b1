//! Schema loader
//!
//! This module implements the loading pipeline:
//! 1. Read the source (size limit, UTF-8 BOM handling)
//! 2. YAML parsing
//! 3. Deserialization to the raw document
//! 4. Validation and conversion to a typed [`Schema`]
//! 5. Freeze with `Arc`
//!
//! Loading is all-or-nothing: any error means no schema is returned.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_yaml::Value;

use crate::config::catalog::Schema;
use crate::config::schema::SchemaDocument;
use crate::config::validation::Validator;
use crate::error::{LoadError, SchemaError, Severity};

/// The editor's default item schema, embedded at compile time.
pub const BUILTIN_DOCUMENT: &str = include_str!("../../schemas/editable_items.yaml");

/// Origin label used for the embedded document.
pub const BUILTIN_ORIGIN: &str = "<builtin>";

// ============================================================================
// Public API
// ============================================================================

/// Where a schema document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemaSource {
    /// A YAML file on disk
    File(PathBuf),
    /// In-memory YAML text
    Text {
        /// Label used in diagnostics
        origin: String,
        /// Document text
        text: String,
    },
    /// The embedded default document
    Builtin,
}

impl SchemaSource {
    /// Label identifying this source in diagnostics.
    #[must_use]
    pub fn origin(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Text { origin, .. } => origin.clone(),
            Self::Builtin => BUILTIN_ORIGIN.to_string(),
        }
    }
}

/// Options for the schema loader.
#[derive(Debug, Clone, Default)]
pub struct LoaderOptions {
    /// Treat validation warnings as errors.
    pub strict: bool,

    /// Limits for document size.
    pub limits: DocumentLimits,
}

/// Limits on document size to keep loading bounded.
#[derive(Debug, Clone)]
pub struct DocumentLimits {
    /// Maximum document size in bytes.
    pub max_document_size: usize,

    /// Maximum number of item types.
    pub max_item_types: usize,

    /// Maximum number of catalog properties.
    pub max_properties: usize,
}

impl Default for DocumentLimits {
    fn default() -> Self {
        Self {
            max_document_size: env_or("SCENESCHEMA_MAX_DOCUMENT_SIZE", 1024 * 1024),
            max_item_types: env_or("SCENESCHEMA_MAX_ITEM_TYPES", 256),
            max_properties: env_or("SCENESCHEMA_MAX_PROPERTIES", 1024),
        }
    }
}

/// Result of loading a schema document.
#[derive(Debug)]
pub struct LoadResult {
    /// The loaded and validated schema.
    pub schema: Arc<Schema>,

    /// Warnings encountered during loading.
    pub warnings: Vec<LoadWarning>,
}

/// Warning during schema loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    /// Warning message.
    pub message: String,

    /// Location where the warning occurred.
    pub location: Option<String>,
}

impl From<SchemaError> for LoadWarning {
    fn from(issue: SchemaError) -> Self {
        Self {
            message: issue.detail,
            location: Some(issue.path),
        }
    }
}

/// Schema loader.
///
/// Handles the full pipeline from YAML source to frozen [`Schema`].
#[derive(Debug, Clone, Default)]
pub struct SchemaLoader {
    options: LoaderOptions,
}

impl SchemaLoader {
    /// Creates a new schema loader with the given options.
    #[must_use]
    pub const fn new(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// Creates a new schema loader with default options.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(LoaderOptions::default())
    }

    /// Loads a schema from any supported source.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read or exceeds the size limit
    /// - YAML parsing fails or the document has the wrong shape
    /// - Validation fails
    pub fn load(&self, source: &SchemaSource) -> Result<LoadResult, LoadError> {
        match source {
            SchemaSource::File(path) => self.load_file(path),
            SchemaSource::Text { origin, text } => self.load_text(text, origin),
            SchemaSource::Builtin => self.load_builtin(),
        }
    }

    /// Loads a schema file.
    ///
    /// # Errors
    ///
    /// See [`SchemaLoader::load`].
    pub fn load_file(&self, path: &Path) -> Result<LoadResult, LoadError> {
        let origin = path.display().to_string();

        let metadata = std::fs::metadata(path).map_err(|_| LoadError::MissingFile {
            path: path.to_path_buf(),
        })?;
        if !metadata.is_file() {
            return Err(LoadError::MissingFile {
                path: path.to_path_buf(),
            });
        }

        let limit = self.options.limits.max_document_size;
        let file_size = usize::try_from(metadata.len()).unwrap_or(usize::MAX);
        if file_size > limit {
            return Err(LoadError::TooLarge {
                origin,
                size: file_size,
                limit,
            });
        }

        let raw = std::fs::read(path).map_err(|source| LoadError::Read {
            origin: origin.clone(),
            source,
        })?;
        let text = String::from_utf8(raw).map_err(|e| LoadError::Parse {
            origin: origin.clone(),
            line: None,
            message: format!("document is not valid UTF-8: {e}"),
        })?;

        self.load_text(&text, &origin)
    }

    /// Loads a schema from in-memory YAML text.
    ///
    /// # Errors
    ///
    /// See [`SchemaLoader::load`].
    pub fn load_str(&self, text: &str) -> Result<LoadResult, LoadError> {
        self.load_text(text, "<string>")
    }

    /// Loads a schema from a reader, reading at most the size limit.
    ///
    /// # Errors
    ///
    /// See [`SchemaLoader::load`].
    pub fn load_reader<R: Read>(&self, reader: R, origin: &str) -> Result<LoadResult, LoadError> {
        let limit = self.options.limits.max_document_size;
        let mut raw = Vec::new();
        // One byte past the limit is enough to detect an oversized source.
        reader
            .take(u64::try_from(limit).unwrap_or(u64::MAX).saturating_add(1))
            .read_to_end(&mut raw)
            .map_err(|source| LoadError::Read {
                origin: origin.to_string(),
                source,
            })?;
        if raw.len() > limit {
            return Err(LoadError::TooLarge {
                origin: origin.to_string(),
                size: raw.len(),
                limit,
            });
        }
        let text = String::from_utf8(raw).map_err(|e| LoadError::Parse {
            origin: origin.to_string(),
            line: None,
            message: format!("document is not valid UTF-8: {e}"),
        })?;
        self.load_text(&text, origin)
    }

    /// Loads the embedded default schema.
    ///
    /// # Errors
    ///
    /// Fails only under strict mode or a size limit below the embedded
    /// document's size.
    pub fn load_builtin(&self) -> Result<LoadResult, LoadError> {
        self.load_text(BUILTIN_DOCUMENT, BUILTIN_ORIGIN)
    }

    /// Runs parsing and validation on document text.
    fn load_text(&self, text: &str, origin: &str) -> Result<LoadResult, LoadError> {
        let limit = self.options.limits.max_document_size;
        if text.len() > limit {
            return Err(LoadError::TooLarge {
                origin: origin.to_string(),
                size: text.len(),
                limit,
            });
        }

        // Handle UTF-8 BOM
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        tracing::debug!(origin, bytes = text.len(), "parsing schema document");

        // Stage 1: YAML parsing
        let root: Value = serde_yaml::from_str(text).map_err(|e| LoadError::Parse {
            origin: origin.to_string(),
            line: e.location().map(|l| l.line()),
            message: e.to_string(),
        })?;

        if root.is_null() {
            return Err(LoadError::Parse {
                origin: origin.to_string(),
                line: None,
                message: "Schema document is empty".to_string(),
            });
        }
        if !root.is_mapping() {
            return Err(LoadError::Parse {
                origin: origin.to_string(),
                line: None,
                message: "Schema document must be a mapping with version, general, items \
                          and properties"
                    .to_string(),
            });
        }

        // Stage 2: Deserialize to the raw document
        let document: SchemaDocument =
            serde_yaml::from_value(root).map_err(|e| LoadError::Parse {
                origin: origin.to_string(),
                line: None,
                message: format!("Failed to deserialize schema document: {e}"),
            })?;

        // Stage 3: Validation
        let mut validator = Validator::new();
        let result = validator.validate(&document, &self.options.limits);

        let mut errors = result.errors;
        let mut warnings = result.warnings;
        if self.options.strict {
            for issue in &mut warnings {
                issue.severity = Severity::Error;
            }
            errors.append(&mut warnings);
        }

        let schema = match result.schema {
            Some(schema) if errors.is_empty() => schema,
            _ => {
                tracing::debug!(origin, errors = errors.len(), "schema document rejected");
                return Err(LoadError::Invalid {
                    origin: origin.to_string(),
                    errors,
                });
            }
        };

        tracing::info!(
            origin,
            item_types = schema.item_types().count(),
            properties = schema.properties().count(),
            warnings = warnings.len(),
            "schema loaded"
        );

        // Stage 4: Freeze
        Ok(LoadResult {
            schema: Arc::new(schema),
            warnings: warnings.into_iter().map(LoadWarning::from).collect(),
        })
    }
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Reads a value from an environment variable, falling back to a default.
fn env_or<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SchemaErrorKind;

    #[test]
    fn test_builtin_loads_without_warnings() {
        let result = SchemaLoader::with_defaults().load_builtin().unwrap();
        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
        assert_eq!(result.schema.item_types().count(), 4);
        assert_eq!(result.schema.version(), "1.0");
    }

    #[test]
    fn test_builtin_is_valid_in_strict_mode() {
        let loader = SchemaLoader::new(LoaderOptions {
            strict: true,
            ..LoaderOptions::default()
        });
        assert!(loader.load(&SchemaSource::Builtin).is_ok());
    }

    #[test]
    fn test_empty_document_rejected() {
        let err = SchemaLoader::with_defaults().load_str("").unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_non_mapping_rejected() {
        let err = SchemaLoader::with_defaults()
            .load_str("- just\n- a list\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_syntax_error_has_line() {
        let err = SchemaLoader::with_defaults()
            .load_str("version: 1\ngeneral: {items_name: [\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { line: Some(_), .. }));
    }

    #[test]
    fn test_wrong_entry_shape_is_parse_error() {
        let err = SchemaLoader::with_defaults()
            .load_str("version: 1\nitems:\n  - type: line\n")
            .unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }));
    }

    #[test]
    fn test_wrong_field_type_is_schema_error() {
        let text = BUILTIN_DOCUMENT
            .replacen("title: Name", "title: 10", 1)
            .replacen("required_properties: [start, end]", "required_properties: start", 1);
        let err = SchemaLoader::with_defaults().load_str(&text).unwrap_err();

        let LoadError::Invalid { errors, .. } = err else {
            panic!("expected schema errors, got {err:?}");
        };
        assert!(errors.iter().any(|e| e.name == "name" && e.path.ends_with(".title")));
        assert!(
            errors
                .iter()
                .any(|e| e.name == "line" && e.path == "items[0].item.required_properties")
        );
    }

    #[test]
    fn test_bom_is_stripped() {
        let text = format!("\u{feff}{BUILTIN_DOCUMENT}");
        assert!(SchemaLoader::with_defaults().load_str(&text).is_ok());
    }

    #[test]
    fn test_size_limit() {
        let loader = SchemaLoader::new(LoaderOptions {
            strict: false,
            limits: DocumentLimits {
                max_document_size: 16,
                ..DocumentLimits::default()
            },
        });
        let err = loader.load_builtin().unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { limit: 16, .. }));

        let err = loader
            .load_reader(BUILTIN_DOCUMENT.as_bytes(), "reader")
            .unwrap_err();
        assert!(matches!(err, LoadError::TooLarge { .. }));
    }

    #[test]
    fn test_load_reader() {
        let result = SchemaLoader::with_defaults()
            .load_reader(BUILTIN_DOCUMENT.as_bytes(), "reader")
            .unwrap();
        assert!(result.schema.item_type("corridor").is_ok());
    }

    #[test]
    fn test_missing_file() {
        let err = SchemaLoader::with_defaults()
            .load_file(Path::new("/nonexistent/sceneschema/items.yaml"))
            .unwrap_err();
        assert!(matches!(err, LoadError::MissingFile { .. }));
    }

    #[test]
    fn test_strict_promotes_warnings() {
        let text = BUILTIN_DOCUMENT.replace("alpha: 3", "alpha: 30");
        let lenient = SchemaLoader::with_defaults().load_str(&text).unwrap();
        assert_eq!(lenient.warnings.len(), 1);

        let strict = SchemaLoader::new(LoaderOptions {
            strict: true,
            ..LoaderOptions::default()
        });
        let err = strict.load_str(&text).unwrap_err();
        let errors = err.schema_errors();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, SchemaErrorKind::ValueOutOfRange);
        assert_eq!(errors[0].severity, Severity::Error);
    }

    #[test]
    fn test_source_origin() {
        assert_eq!(SchemaSource::Builtin.origin(), "<builtin>");
        assert_eq!(
            SchemaSource::File(PathBuf::from("a/b.yaml")).origin(),
            "a/b.yaml"
        );
    }

    #[test]
    fn test_env_or_falls_back() {
        assert_eq!(env_or("SCENESCHEMA_TEST_UNSET_VARIABLE", 7usize), 7);
    }
}
