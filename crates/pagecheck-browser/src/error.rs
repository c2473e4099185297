//! Error types for browser operations.
//!
//! Distinguishes the ways a smoke run can break down: the browser fails to
//! launch, the page fails to load, a wait times out, or an interaction with
//! the page goes wrong. Console errors emitted *by the page* are not errors
//! here; they are captured as data by [`crate::console`].

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// The main error type for all browser operations.
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Failed to launch the browser process.
    ///
    /// This typically occurs when Chrome/Chromium is not installed,
    /// or when there are permission issues with the executable.
    #[error("failed to launch browser: {reason}")]
    LaunchFailed {
        /// Human-readable reason for the launch failure
        reason: String,
        /// Optional underlying error that caused the failure
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Failed to establish or use the Chrome DevTools Protocol connection.
    #[error("CDP connection failed: {0}")]
    ConnectionFailed(String),

    /// Navigation to a URL failed.
    #[error("navigation to '{url}' failed: {reason}")]
    NavigationFailed {
        /// The URL that failed to load
        url: String,
        /// Reason for the navigation failure
        reason: String,
    },

    /// A local file could not be turned into a `file://` URL.
    #[error("cannot build a file URL for '{}'", .0.display())]
    InvalidFilePath(PathBuf),

    /// A wait condition was not satisfied within the timeout.
    #[error("wait condition '{condition}' timed out after {timeout:?}")]
    WaitTimeout {
        /// Description of the condition that timed out
        condition: String,
        /// How long we waited before timing out
        timeout: Duration,
    },

    /// JavaScript execution in the page context failed.
    #[error("JavaScript execution failed: {0}")]
    ScriptExecutionFailed(String),

    /// Hovering, clicking or otherwise driving an element failed.
    #[error("interaction with '{selector}' failed: {reason}")]
    InteractionFailed {
        /// Selector of the element being driven
        selector: String,
        /// Reason reported by the browser
        reason: String,
    },

    /// The browser process crashed or was killed unexpectedly.
    #[error("browser process terminated unexpectedly")]
    ProcessTerminated,

    /// An operation was attempted on a closed browser instance.
    #[error("browser instance is already closed")]
    AlreadyClosed,

    /// Wraps errors from the chromiumoxide library.
    #[error("chromiumoxide error: {0}")]
    ChromiumOxide(#[from] chromiumoxide::error::CdpError),

    /// Generic I/O errors (file access, profile directory, etc.).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for browser operations.
pub type Result<T> = std::result::Result<T, BrowserError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_timeout_message_names_condition() {
        let err = BrowserError::WaitTimeout {
            condition: "network idle".to_string(),
            timeout: Duration::from_secs(30),
        };
        let msg = err.to_string();
        assert!(msg.contains("network idle"));
        assert!(msg.contains("30s"));
    }

    #[test]
    fn interaction_failed_message_names_selector() {
        let err = BrowserError::InteractionFailed {
            selector: ".gallery-item".to_string(),
            reason: "node is detached".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "interaction with '.gallery-item' failed: node is detached"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BrowserError = io.into();
        assert!(matches!(err, BrowserError::Io(_)));
    }
}
