//! Terminal styling for the report.
//!
//! The report is the program's output proper and goes to stdout, so colour
//! support is judged on stdout here (the logger judges stderr separately).

use owo_colors::OwoColorize;

/// Check if running in a CI environment.
pub fn is_ci() -> bool {
    ["CI", "GITHUB_ACTIONS", "GITLAB_CI", "CIRCLECI", "TRAVIS"]
        .iter()
        .any(|var| std::env::var_os(var).is_some())
}

/// Whether the stdout report should be coloured.
///
/// `--no-color` and `NO_COLOR` disable colour, `FORCE_COLOR` forces it, CI
/// logs stay plain, otherwise the terminal decides.
pub fn should_use_color(no_color_flag: bool) -> bool {
    if no_color_flag || std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    !is_ci() && console::Term::stdout().features().colors_supported()
}

/// The status markers used by the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marks {
    /// Passed check / success verdict
    pub ok: String,
    /// Collected error line
    pub fail: String,
    /// Collected warning line / error verdict
    pub warn: String,
}

impl Marks {
    /// Plain markers, or coloured ones when `color` is set.
    #[must_use]
    pub fn new(color: bool) -> Self {
        if color {
            Self {
                ok: "✓".green().bold().to_string(),
                fail: "✗".red().bold().to_string(),
                warn: "⚠".yellow().bold().to_string(),
            }
        } else {
            Self::plain()
        }
    }

    /// Markers without ANSI escapes.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            ok: "✓".to_string(),
            fail: "✗".to_string(),
            warn: "⚠".to_string(),
        }
    }
}
