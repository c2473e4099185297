//! The human-readable summary printed after a run.

use crate::ui::Marks;
use std::io::{self, Write};

/// Whether one of the fixed selectors matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElementCheck {
    /// Name shown in the report
    pub label: &'static str,
    /// CSS selector that was queried
    pub selector: &'static str,
    /// At least one element matched
    pub found: bool,
}

/// What happened to the hover interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    /// Nothing matched the hover target
    Skipped,
    /// The target was hovered
    Working,
}

/// Everything the summary reports on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmokeReport {
    /// The fixed element checks, in report order
    pub checks: [ElementCheck; 4],
    /// Document title after load
    pub title: String,
    /// Console errors and uncaught exceptions, in page order
    pub errors: Vec<String>,
    /// Console warnings, in page order
    pub warnings: Vec<String>,
    /// Result of the hover step
    pub hover: HoverOutcome,
}

impl SmokeReport {
    /// Number of collected errors.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// True when the page produced no console errors.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Write the summary for `report` to `out`.
///
/// # Errors
///
/// Returns any error from the underlying writer.
pub fn render(report: &SmokeReport, out: &mut impl Write, marks: &Marks) -> io::Result<()> {
    writeln!(out, "\n=== Website Test Results ===\n")?;

    writeln!(out, "Key Elements Check:")?;
    for check in &report.checks {
        let status = if check.found { "FOUND" } else { "MISSING" };
        writeln!(out, "  {} {}: {}", marks.ok, check.label, status)?;
    }
    writeln!(out, "  {} Page Title: \"{}\"", marks.ok, report.title)?;

    render_list(out, "Console Errors", &report.errors, &marks.fail)?;
    render_list(out, "Warnings", &report.warnings, &marks.warn)?;

    if report.hover == HoverOutcome::Working {
        writeln!(out, "  {} Hover effects: WORKING", marks.ok)?;
    }

    writeln!(out, "\n=== Test Complete ===\n")?;

    if report.passed() {
        writeln!(
            out,
            "{} Website loaded successfully with no critical errors!",
            marks.ok
        )
    } else {
        writeln!(
            out,
            "{} Website has {} error(s) that may need attention.",
            marks.warn,
            report.error_count()
        )
    }
}

fn render_list(
    out: &mut impl Write,
    heading: &str,
    items: &[String],
    mark: &str,
) -> io::Result<()> {
    if items.is_empty() {
        return writeln!(out, "\n{heading}: NONE");
    }

    writeln!(out, "\n{heading}:")?;
    for item in items {
        writeln!(out, "  {mark} {item}")?;
    }
    Ok(())
}
