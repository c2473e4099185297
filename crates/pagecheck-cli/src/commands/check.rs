//! Check command implementation.

use crate::cli::Cli;
use crate::config::SmokeConfig;
use crate::error::Result;
use crate::report;
use crate::smoke;
use crate::ui::{self, Marks};
use std::io::Write;

/// Execute the smoke test and print the report to stdout.
///
/// # Steps
///
/// 1. Load configuration (defaults, `pagecheck.toml`, `PAGECHECK_*`, flags)
/// 2. Run the smoke sequence in headless Chrome
/// 3. Render the report
///
/// # Errors
///
/// Returns an error if configuration is invalid or the run itself fails.
/// Console errors on the page only show up in the report.
pub async fn execute(args: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = SmokeConfig::load_from(&args, &cwd)?;

    let report = smoke::run(&config, &cwd).await?;

    let marks = Marks::new(ui::should_use_color(args.no_color));
    let mut stdout = std::io::stdout().lock();
    report::render(&report, &mut stdout, &marks)?;
    stdout.flush()?;

    Ok(())
}
