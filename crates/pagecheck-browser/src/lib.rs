//! # pagecheck-browser
//!
//! Headless Chrome plumbing for pagecheck, built on chromiumoxide.
//!
//! This crate launches Chrome, opens a page with console, exception and
//! network listeners already attached, navigates it to a local file and
//! answers simple questions about the result: does a selector match, what is
//! the title, what did the page log.
//!
//! ## Architecture
//!
//! - **TestBrowser**: Manages the browser process lifecycle
//! - **Page**: A browser tab with navigation, queries and hover
//! - **ConsoleCapture**: Ordered accumulation of console messages and page exceptions
//! - **NetworkTracker**: In-flight request bookkeeping for the network-idle state
//! - **WaitConfig**: Polling waits with timeouts, plus fixed settle pauses
//!
//! ## Example Usage
//!
//! ```ignore
//! use pagecheck_browser::{file_url, TestBrowser, TestBrowserConfig, WaitConfig};
//! use std::path::Path;
//!
//! let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
//! let page = browser.new_page().await?;
//!
//! let url = file_url(Path::new("/srv/site/index.html"))?;
//! page.navigate_until_idle(&url, WaitConfig::default()).await?;
//!
//! let title = page.title().await?;
//! let has_hero = page.exists(".hero").await?;
//! let errors = page.console().errors();
//!
//! browser.close().await?;
//! ```
//!
//! ## Testing Strategy
//!
//! 1. **Unit tests**: logic that needs no browser (console parsing, network
//!    bookkeeping, waits, URL building)
//! 2. **Integration tests**: real browser tests (require Chrome installed)
//!
//! Run with `cargo test` (unit) or `cargo test -- --ignored` (integration).

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod browser;
pub mod console;
pub mod error;
pub mod network;
pub mod page;
pub mod wait;

// Re-export main types for convenience
pub use browser::{TestBrowser, TestBrowserConfig};
pub use console::{ConsoleCapture, ConsoleLevel, ConsoleMessage, MessageOrigin};
pub use error::{BrowserError, Result};
pub use network::{NETWORK_IDLE_QUIET, NetworkTracker};
pub use page::{Page, file_url};
pub use wait::{DEFAULT_POLL_INTERVAL, DEFAULT_TIMEOUT, WaitConfig, settle};
