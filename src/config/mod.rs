//! Schema configuration module
//!
//! Loads and validates editable-item schema documents: item types, the
//! property catalog and the general fallback settings.

pub mod catalog;
pub mod loader;
pub mod schema;
pub mod validation;

pub use catalog::Schema;
pub use loader::{
    DocumentLimits, LoadResult, LoadWarning, LoaderOptions, SchemaLoader, SchemaSource,
};
pub use schema::*;
pub use validation::{ValidationResult, Validator};
