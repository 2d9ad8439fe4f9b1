//! `sceneschema` - Editable scene-item schema loader
//!
//! Loads the YAML metadata document that describes which scene items an
//! editor can create and edit: item types, the shared property catalog with
//! its edit widgets, and fallback settings. A loaded [`config::Schema`] is
//! immutable and answers lookups, merged defaults and scene-item checks.

pub mod cli;
pub mod config;
pub mod error;
pub mod observability;
pub mod scene;
