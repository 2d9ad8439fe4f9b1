//! Observability module
//!
//! Structured logging for schema loading and the CLI.

pub mod logging;

pub use logging::{LogFormat, init_logging};
