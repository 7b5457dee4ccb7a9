//! Error handling for the isle CLI.
//!
//! - [`CliError`] is returned by every command and wraps the domain errors.
//! - [`ConfigError`] covers `isle.config.json` loading and validation.
//! - Bundler errors pass through untouched so their diagnostics survive.
//!
//! # Example
//!
//! ```rust,no_run
//! use isle_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn page_len(path: &Path) -> Result<usize> {
//!     Ok(std::fs::read_to_string(path).context("Reading page")?.len())
//! }
//! ```

mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration errors (missing file, invalid values)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Errors from the bundling pass
    #[error(transparent)]
    Bundle(#[from] isle_bundler::Error),

    /// Invalid command-line arguments
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Build output directory doesn't exist
    #[error("Directory not found: {}\n\nHint: Run the site build first, then point isle at its output directory", .0.display())]
    DirectoryNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Errors with a custom message
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file passed with `--config` doesn't exist
    #[error("Config file not found: {}\n\nHint: Create an isle.config.json file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Invalid value for a configuration option
    #[error("Invalid value for '{field}': {value}\n\nHint: {hint}")]
    InvalidValue {
        /// Name of the field with invalid value
        field: String,
        /// The invalid value
        value: String,
        /// Helpful hint for correct values
        hint: String,
    },
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_not_found() {
        let err = ConfigError::NotFound(PathBuf::from("isle.config.json"));
        let msg = err.to_string();
        assert!(msg.contains("Config file not found"));
        assert!(msg.contains("isle.config.json"));
        assert!(msg.contains("Hint:"));
    }

    #[test]
    fn test_config_error_invalid_value() {
        let err = ConfigError::InvalidValue {
            field: "assetsDir".to_string(),
            value: "a/b".to_string(),
            hint: "Use a single directory name".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for 'assetsDir': a/b\n\nHint: Use a single directory name"
        );
    }

    #[test]
    fn test_bundle_error_is_transparent() {
        let err = CliError::from(isle_bundler::Error::InvalidConfig("bad".into()));
        assert_eq!(err.to_string(), "Invalid configuration: bad");
    }

    #[test]
    fn test_context_prefixes_message() {
        let result: Result<()> = Err(CliError::Custom("failed".into()));
        let err = result.context("Rendering schema").unwrap_err();
        assert_eq!(err.to_string(), "Rendering schema: failed");
    }

    #[test]
    fn test_context_wraps_io_errors() {
        let result: std::result::Result<(), std::io::Error> =
            Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        let err = result.context("Reading page").unwrap_err();
        assert_eq!(err.to_string(), "Reading page: I/O error: gone");
    }
}
