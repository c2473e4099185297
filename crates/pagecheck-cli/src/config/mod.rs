//! Configuration for a smoke run.
//!
//! Values are layered, lowest priority first:
//!
//! 1. built-in defaults
//! 2. `pagecheck.toml` in the working directory, or the `--config` file
//! 3. `PAGECHECK_*` environment variables (`PAGECHECK_SETTLE_MS=500`)
//! 4. command-line flags
//!
//! ```toml
//! # pagecheck.toml
//! target = "dist/index.html"
//! settle_ms = 1000
//! headless = true
//! ```

mod loading;
mod validation;

use pagecheck_browser::{TestBrowserConfig, WaitConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use loading::DEFAULT_CONFIG_FILE;

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmokeConfig {
    /// HTML file under test; relative paths resolve against the working directory.
    pub target: PathBuf,

    /// Pause after load, before any element is checked.
    pub settle_ms: u64,

    /// Pause after the hover interaction.
    pub hover_settle_ms: u64,

    /// Timeout for the load and network-idle waits.
    pub navigation_timeout_secs: u64,

    /// Run Chrome without a window.
    pub headless: bool,

    /// Chrome executable; auto-detected when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chrome_path: Option<PathBuf>,
}

impl Default for SmokeConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("index.html"),
            settle_ms: 2000,
            hover_settle_ms: 500,
            navigation_timeout_secs: 30,
            headless: true,
            chrome_path: None,
        }
    }
}

impl SmokeConfig {
    /// Pause after load.
    #[must_use]
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Pause after hover.
    #[must_use]
    pub fn hover_settle(&self) -> Duration {
        Duration::from_millis(self.hover_settle_ms)
    }

    /// Wait settings for navigation.
    #[must_use]
    pub fn wait_config(&self) -> WaitConfig {
        WaitConfig::with_timeout(Duration::from_secs(self.navigation_timeout_secs))
    }

    /// Browser launch settings.
    #[must_use]
    pub fn browser_config(&self) -> TestBrowserConfig {
        let mut config = TestBrowserConfig::default();
        if !self.headless {
            config = config.visible();
        }
        if let Some(path) = &self.chrome_path {
            config = config.with_chrome_path(path.clone());
        }
        config
    }
}
