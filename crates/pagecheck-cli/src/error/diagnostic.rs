//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;
use pagecheck_browser::BrowserError;

/// Convert a failed run into the `Test failed: ...` report printed on exit.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Browser(e) => browser_error_to_miette(e),
        CliError::Config(ConfigError::Invalid(msg)) => miette::miette!(
            help = "Check pagecheck.toml syntax and PAGECHECK_* environment variables",
            "Test failed: invalid configuration: {}",
            msg
        ),
        other => miette::miette!("Test failed: {}", other),
    }
}

/// Convert a browser failure, adding a hint where one is actionable.
pub fn browser_error_to_miette(err: BrowserError) -> Report {
    match err {
        BrowserError::LaunchFailed { .. } => miette::miette!(
            help = "Install Chrome or Chromium, or point chrome_path / --chrome at the executable",
            "Test failed: {}",
            err
        ),
        BrowserError::WaitTimeout { .. } => miette::miette!(
            help = "Raise navigation_timeout_secs if the page is slow to settle",
            "Test failed: {}",
            err
        ),
        _ => miette::miette!("Test failed: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn test_report_is_prefixed() {
        let report = cli_error_to_miette(CliError::TargetNotFound(PathBuf::from("index.html")));
        assert!(report.to_string().starts_with("Test failed: Target not found"));
    }

    #[test]
    fn test_launch_failure_has_help() {
        let report = browser_error_to_miette(BrowserError::LaunchFailed {
            reason: "no chrome".to_string(),
            source: None,
        });
        assert_eq!(
            report.to_string(),
            "Test failed: failed to launch browser: no chrome"
        );
        assert!(report.help().is_some());
    }

    #[test]
    fn test_timeout_has_help() {
        let report = cli_error_to_miette(CliError::Browser(BrowserError::WaitTimeout {
            condition: "network idle".to_string(),
            timeout: Duration::from_secs(30),
        }));
        assert!(report.to_string().contains("network idle"));
        assert!(report.help().is_some());
    }
}
