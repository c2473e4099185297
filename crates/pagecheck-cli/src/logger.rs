//! Logging setup for the pagecheck CLI.
//!
//! Logs go to stderr through `tracing-subscriber`; stdout carries only the
//! report, so `pagecheck > report.txt` captures a clean summary.
//!
//! # Verbosity Levels
//!
//! 1. `--verbose`: DEBUG for pagecheck crates
//! 2. `--quiet`: ERROR only
//! 3. `RUST_LOG`: custom filter
//! 4. Default: INFO for pagecheck crates, everything else off

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub(crate) const VERBOSE_FILTER: &str =
    "pagecheck=debug,pagecheck_cli=debug,pagecheck_browser=debug";
pub(crate) const QUIET_FILTER: &str = "pagecheck=error,pagecheck_cli=error,pagecheck_browser=error";
pub(crate) const DEFAULT_FILTER: &str = "pagecheck=info,pagecheck_cli=info,pagecheck_browser=info";

/// Picks the filter directives for the given flags.
///
/// `None` means "use `RUST_LOG`, falling back to the default".
pub(crate) fn filter_directives(verbose: bool, quiet: bool) -> Option<&'static str> {
    if verbose {
        Some(VERBOSE_FILTER)
    } else if quiet {
        Some(QUIET_FILTER)
    } else {
        None
    }
}

/// Initialize the tracing subscriber. Call once, before any logging.
///
/// ```rust,no_run
/// use pagecheck_cli::logger::init_logger;
///
/// init_logger(false, false, false);
/// tracing::info!("Launching browser");
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    let filter = match filter_directives(verbose, quiet) {
        Some(directives) => EnvFilter::new(directives),
        None => {
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
        }
    };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && should_use_colors())
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

/// Whether stderr should get ANSI colours.
///
/// `NO_COLOR` disables, `FORCE_COLOR` forces, otherwise the terminal decides.
pub fn should_use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    console::Term::stderr().features().colors_supported()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_verbose_wins_over_quiet() {
        assert_eq!(filter_directives(true, true), Some(VERBOSE_FILTER));
        assert_eq!(filter_directives(false, true), Some(QUIET_FILTER));
        assert_eq!(filter_directives(false, false), None);
    }

    #[test]
    fn test_filters_parse() {
        for directives in [VERBOSE_FILTER, QUIET_FILTER, DEFAULT_FILTER] {
            assert!(EnvFilter::try_new(directives).is_ok(), "{directives}");
        }
    }

    #[test]
    #[serial]
    fn test_no_color_disables_colors() {
        unsafe {
            std::env::set_var("NO_COLOR", "1");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(!should_use_colors());
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::remove_var("FORCE_COLOR");
        }
    }

    #[test]
    #[serial]
    fn test_force_color_enables_colors() {
        unsafe {
            std::env::remove_var("NO_COLOR");
            std::env::set_var("FORCE_COLOR", "1");
        }
        assert!(should_use_colors());
        unsafe {
            std::env::remove_var("FORCE_COLOR");
        }
    }
}
