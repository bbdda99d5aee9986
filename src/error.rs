// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the export pipeline.

use std::fmt;

/// Result type alias for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Main error type for the export pipeline.
#[derive(Debug)]
pub enum ExportError {
    /// Input directory missing, empty, or otherwise unusable.
    InputError(String),
    /// A per-frame detection record could not be parsed.
    ParseError(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Error writing the output file.
    WriteError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InputError(msg) => write!(f, "Input error: {msg}"),
            Self::ParseError(msg) => write!(f, "Parse error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::WriteError(msg) => write!(f, "Write error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        Self::ParseError(err.to_string())
    }
}
