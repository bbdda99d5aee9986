// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! CLI module for the converter.
//!
//! This module contains the command-line interface logic, including argument
//! parsing and the `convert` command implementation.

// Modules
/// CLI arguments.
pub mod args;

/// Conversion logic.
pub mod convert;

/// Logging utilities.
pub mod logging;
