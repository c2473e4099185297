//! Command-line interface definition for pagecheck.
//!
//! There is a single action, so there are no subcommands: every flag
//! tweaks the one smoke run. Flags that are not given fall through to
//! `pagecheck.toml`, `PAGECHECK_*` variables and built-in defaults.


use clap::Parser;
use std::path::PathBuf;

/// pagecheck - smoke-test a static web page in headless Chrome
#[derive(Parser, Debug, Default)]
#[command(
    name = "pagecheck",
    version,
    about = "Smoke-test a static web page in headless Chrome",
    long_about = "Opens a local HTML file in headless Chrome, records console errors,\n\
                  warnings and uncaught exceptions, checks for the page's key elements,\n\
                  exercises a hover interaction and prints a pass/fail summary.\n\n\
                  Exits with status 1 only when the run itself fails; console errors\n\
                  on the page are reported but do not change the exit status."
)]
pub struct Cli {
    /// HTML file to test [default: index.html]
    #[arg(value_name = "FILE")]
    pub target: Option<PathBuf>,

    /// Configuration file [default: ./pagecheck.toml when present]
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pause after the page has loaded, in milliseconds [default: 2000]
    #[arg(long, value_name = "MS")]
    pub settle_ms: Option<u64>,

    /// Pause after hovering, in milliseconds [default: 500]
    #[arg(long, value_name = "MS")]
    pub hover_settle_ms: Option<u64>,

    /// Give up on load and network idle after this many seconds [default: 30]
    #[arg(long = "timeout", value_name = "SECS")]
    pub navigation_timeout_secs: Option<u64>,

    /// Show the browser window instead of running headless
    #[arg(long)]
    pub visible: bool,

    /// Chrome/Chromium executable to launch
    #[arg(long = "chrome", value_name = "PATH")]
    pub chrome_path: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all logging except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}
