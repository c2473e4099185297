//! pagecheck CLI - smoke-test a static web page in headless Chrome.
//!
//! The binary opens one local HTML file, lets it settle, checks for a fixed
//! set of elements, hovers a gallery item and prints what the browser
//! console reported along the way.
//!
//! # Architecture
//!
//! - [`cli`] - Command-line flags
//! - [`config`] - Layered configuration (defaults, file, env, flags)
//! - [`smoke`] - The browser sequence
//! - [`report`] - Summary rendering
//! - [`error`] - Error types with actionable messages
//! - [`logger`] - Structured logging with tracing, on stderr
//! - [`ui`] - Colour detection and report markers
//!
//! # Example
//!
//! ```rust,no_run
//! use pagecheck_cli::{cli::Cli, config::SmokeConfig, report, smoke, ui::Marks};
//! use std::path::Path;
//!
//! # async fn demo() -> pagecheck_cli::Result<()> {
//! let cwd = Path::new("/srv/site");
//! let config = SmokeConfig::load_from(&Cli::default(), cwd)?;
//! let summary = smoke::run(&config, cwd).await?;
//! report::render(&summary, &mut std::io::stdout(), &Marks::plain())?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logger;
pub mod report;
pub mod smoke;
pub mod ui;

// Re-export commonly used types
pub use error::{CliError, ConfigError, Result, ResultExt};
