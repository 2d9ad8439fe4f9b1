//! Command-line interface
//!
//! Argument parsing and command handlers for the `sceneschema` binary.

pub mod args;
pub mod commands;
