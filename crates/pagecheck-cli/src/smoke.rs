//! The smoke-test sequence.
//!
//! One browser, one page, one navigation. The browser is closed exactly once
//! on every path out of [`run`], including failures part-way through.

use crate::config::SmokeConfig;
use crate::error::Result;
use crate::report::{ElementCheck, HoverOutcome, SmokeReport};
use pagecheck_browser::{Page, TestBrowser, file_url, settle};
use std::path::Path;
use tracing::{debug, info, warn};

/// The fixed element checks as `(label, selector)`, in report order.
pub const ELEMENT_CHECKS: [(&str, &str); 4] = [
    ("Hero Section", ".hero"),
    ("Gallery Grid", ".asymmetrical-grid"),
    ("Custom Cursor", ".cursor"),
    ("Preloader", ".preloader"),
];

/// Element hovered to exercise hover effects.
pub const HOVER_TARGET: &str = ".gallery-item";

/// Run the whole sequence against the configured target.
///
/// Relative targets resolve against `cwd`.
///
/// # Errors
///
/// Fails if the target is missing, Chrome cannot be launched, the page does
/// not load in time or any browser call fails. Console errors on the page
/// are not failures; they end up in the report.
pub async fn run(config: &SmokeConfig, cwd: &Path) -> Result<SmokeReport> {
    let target = config.resolve_target(cwd)?;
    let url = file_url(&target)?;
    info!("Testing {}", target.display());

    let browser = TestBrowser::launch(config.browser_config()).await?;

    let outcome = exercise(&browser, &url, config).await;
    let closed = browser.close().await;

    match (outcome, closed) {
        (Ok(report), Ok(())) => Ok(report),
        (Ok(_), Err(close_err)) => Err(close_err.into()),
        (Err(err), Ok(())) => Err(err),
        (Err(err), Err(close_err)) => {
            warn!("Failed to close browser: {}", close_err);
            Err(err)
        }
    }
}

async fn exercise(
    browser: &TestBrowser,
    url: &str,
    config: &SmokeConfig,
) -> Result<SmokeReport> {
    let page = browser.new_page().await?;

    page.navigate_until_idle(url, config.wait_config()).await?;
    settle(config.settle()).await;

    let checks = check_elements(&page).await?;
    let title = page.title().await?;

    // Snapshot before hovering; anything logged later is not reported
    let errors: Vec<String> = page.console().errors().into_iter().map(|m| m.text).collect();
    let warnings: Vec<String> = page
        .console()
        .warnings()
        .into_iter()
        .map(|m| m.text)
        .collect();
    debug!(
        "Collected {} error(s) and {} warning(s)",
        errors.len(),
        warnings.len()
    );

    let hover = if page.hover(HOVER_TARGET).await? {
        settle(config.hover_settle()).await;
        HoverOutcome::Working
    } else {
        HoverOutcome::Skipped
    };

    Ok(SmokeReport {
        checks,
        title,
        errors,
        warnings,
        hover,
    })
}

async fn check_elements(page: &Page) -> Result<[ElementCheck; 4]> {
    let mut checks = ELEMENT_CHECKS.map(|(label, selector)| ElementCheck {
        label,
        selector,
        found: false,
    });

    for check in &mut checks {
        check.found = page.exists(check.selector).await?;
        debug!("{} ({}): found = {}", check.label, check.selector, check.found);
    }

    Ok(checks)
}
