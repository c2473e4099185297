//! Error handling for the pagecheck CLI.
//!
//! `CliError` is what a run returns when the smoke test itself could not be
//! carried out: bad configuration, a missing target file, a browser that
//! would not start or a page that never loaded. Console errors produced by
//! the page under test are *not* `CliError`s; they are part of the report.
//!
//! # Example
//!
//! ```rust,no_run
//! use pagecheck_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_target(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

use pagecheck_browser::BrowserError;
use std::path::PathBuf;
use thiserror::Error;

pub mod diagnostic;

pub use diagnostic::cli_error_to_miette;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration-related errors (file not found, invalid syntax, etc.)
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Browser launch, navigation or interaction failed
    #[error("{0}")]
    Browser(#[from] BrowserError),

    /// The HTML file under test does not exist
    #[error("Target not found: {}\n\nHint: Pass the HTML file to test, e.g. 'pagecheck site/index.html'", .0.display())]
    TargetNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file given with --config doesn't exist
    #[error("Config file not found: {}\n\nHint: Create a pagecheck.toml file or fix the --config path", .0.display())]
    NotFound(PathBuf),

    /// Config sources could not be merged or deserialized
    #[error("Invalid configuration: {0}\n\nHint: Check pagecheck.toml syntax and PAGECHECK_* environment variables")]
    Invalid(String),

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

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        ConfigError::Invalid(err.to_string())
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turns a not-found I/O error into `TargetNotFound` for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            match err {
                CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                    CliError::TargetNotFound(path.as_ref().to_path_buf())
                }
                other => other,
            }
        })
    }
}
