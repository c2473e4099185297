//! Browser lifecycle management and process control.
//!
//! `TestBrowser` is the entry point: it launches Chrome, drives the CDP
//! handler and opens pages.
//!
//! # Resource Safety
//!
//! `close()` consumes the browser, so a browser is shut down at most once.
//! Dropping a browser that was never closed still kills the Chrome process
//! (chromiumoxide's own Drop) and logs a warning.

use crate::error::{BrowserError, Result};
use crate::page::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Configuration for launching a browser.
#[derive(Debug, Clone)]
pub struct TestBrowserConfig {
    /// Run in headless mode (default: true, unless the `visible` feature is on).
    pub headless: bool,

    /// Browser window size (default: 1920x1080).
    pub window_size: (u32, u32),

    /// Additional Chrome arguments.
    pub args: Vec<String>,

    /// Chrome executable path (None = auto-detect).
    pub chrome_path: Option<PathBuf>,
}

impl TestBrowserConfig {
    /// Creates a new config with defaults for headless runs.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables visible mode for debugging.
    #[must_use]
    pub fn visible(mut self) -> Self {
        self.headless = false;
        self
    }

    /// Sets a custom window size.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (width, height);
        self
    }

    /// Adds additional Chrome arguments.
    #[must_use]
    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args.extend(args);
        self
    }

    /// Uses a specific Chrome/Chromium executable.
    #[must_use]
    pub fn with_chrome_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chrome_path = Some(path.into());
        self
    }

    /// Converts to chromiumoxide `BrowserConfig`.
    ///
    /// Each launch gets its own profile directory so parallel runs never hit
    /// Chrome's ProcessSingleton lock.
    fn to_browser_config(&self, user_data_dir: &Path) -> Result<BrowserConfig> {
        let mut config = BrowserConfig::builder();

        if !self.headless {
            config = config.with_head();
        }

        config = config.arg(format!(
            "--window-size={},{}",
            self.window_size.0, self.window_size.1
        ));
        config = config.arg(format!("--user-data-dir={}", user_data_dir.display()));

        for arg in &self.args {
            config = config.arg(arg.clone());
        }

        if let Some(path) = &self.chrome_path {
            config = config.chrome_executable(path.clone());
        }

        config.build().map_err(|e| BrowserError::LaunchFailed {
            reason: format!("invalid browser configuration: {e}"),
            source: None,
        })
    }
}

impl Default for TestBrowserConfig {
    fn default() -> Self {
        Self {
            headless: !cfg!(feature = "visible"),
            window_size: (1920, 1080),
            args: vec![
                // Chrome's sandbox needs user namespaces, which containers
                // and CI runners often lack. Only local files are loaded.
                "--no-sandbox".to_string(),
                // Prevents /dev/shm exhaustion in containerized environments
                "--disable-dev-shm-usage".to_string(),
            ],
            chrome_path: None,
        }
    }
}

/// A managed browser instance.
///
/// ```ignore
/// let browser = TestBrowser::launch(TestBrowserConfig::default()).await?;
/// let page = browser.new_page().await?;
/// page.navigate("file:///srv/site/index.html").await?;
/// browser.close().await?;
/// ```
pub struct TestBrowser {
    inner: Arc<Mutex<Option<Browser>>>,
    user_data_dir: PathBuf,
}

impl TestBrowser {
    /// Launches a new browser instance with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `LaunchFailed` if Chrome is not installed, not executable,
    /// or fails to start.
    pub async fn launch(config: TestBrowserConfig) -> Result<Self> {
        debug!("Launching browser with config: {:?}", config);

        let user_data_dir =
            std::env::temp_dir().join(format!("pagecheck-{}", uuid::Uuid::new_v4()));
        let browser_config = config.to_browser_config(&user_data_dir)?;

        let (browser, mut handler) =
            Browser::launch(browser_config)
                .await
                .map_err(|e| BrowserError::LaunchFailed {
                    reason: "failed to launch Chrome process".to_string(),
                    source: Some(Box::new(e)),
                })?;

        // chromiumoxide only processes CDP traffic while the handler is polled
        tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    warn!("Browser handler error: {}", e);
                }
            }
            debug!("Browser handler finished");
        });

        debug!("Browser launched successfully");

        Ok(Self {
            inner: Arc::new(Mutex::new(Some(browser))),
            user_data_dir,
        })
    }

    /// Opens a new page (tab) on `about:blank`.
    ///
    /// Console, exception and network listeners are attached before this
    /// returns, so the next navigation is observed from its first event.
    ///
    /// # Errors
    ///
    /// Returns `AlreadyClosed` if the browser has been closed.
    pub async fn new_page(&self) -> Result<Page> {
        let browser = self.inner.lock().await;

        let browser = browser.as_ref().ok_or(BrowserError::AlreadyClosed)?;

        let chrome_page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;

        Page::attach(chrome_page).await
    }

    /// Closes the browser and waits for the Chrome process to exit.
    ///
    /// The profile directory is removed whether or not shutdown succeeded.
    ///
    /// # Errors
    ///
    /// Returns an error if the browser fails to close gracefully.
    pub async fn close(self) -> Result<()> {
        let browser = self.inner.lock().await.take();

        let closed = match browser {
            Some(browser) => shutdown(browser).await,
            None => Ok(()),
        };

        finish_close(closed, &self.user_data_dir).await
    }

    /// Returns true if the browser has been closed.
    pub async fn is_closed(&self) -> bool {
        self.inner.lock().await.is_none()
    }
}

async fn shutdown(mut browser: Browser) -> Result<()> {
    debug!("Closing browser gracefully");
    browser
        .close()
        .await
        .map_err(|e| BrowserError::ConnectionFailed(e.to_string()))?;
    if let Err(e) = browser.wait().await {
        debug!("Waiting for Chrome to exit failed: {}", e);
    }
    Ok(())
}

/// Removes the profile directory, then hands back the shutdown result.
async fn finish_close(closed: Result<()>, user_data_dir: &Path) -> Result<()> {
    if let Err(e) = tokio::fs::remove_dir_all(user_data_dir).await {
        debug!(
            "Could not remove profile directory {}: {}",
            user_data_dir.display(),
            e
        );
    }
    closed
}

impl Drop for TestBrowser {
    fn drop(&mut self) {
        // chromiumoxide's Browser::drop kills the process if it is still here
        let still_open = self
            .inner
            .try_lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false);
        if still_open {
            warn!("TestBrowser dropped without explicit close() - forcing shutdown via Drop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_headless_and_container_friendly() {
        let config = TestBrowserConfig::default();
        assert_eq!(config.headless, !cfg!(feature = "visible"));
        assert_eq!(config.window_size, (1920, 1080));
        assert!(config.args.iter().any(|a| a == "--no-sandbox"));
        assert!(config.chrome_path.is_none());
    }

    #[test]
    fn builder_helpers_compose() {
        let config = TestBrowserConfig::new()
            .visible()
            .with_window_size(800, 600)
            .with_args(vec!["--mute-audio".to_string()])
            .with_chrome_path("/usr/bin/chromium");

        assert!(!config.headless);
        assert_eq!(config.window_size, (800, 600));
        assert_eq!(config.args.last().map(String::as_str), Some("--mute-audio"));
        assert_eq!(config.chrome_path, Some(PathBuf::from("/usr/bin/chromium")));
    }

    #[tokio::test]
    async fn failed_shutdown_still_removes_profile() {
        let temp = tempfile::TempDir::new().unwrap();
        let profile = temp.path().join("pagecheck-profile");
        std::fs::create_dir_all(profile.join("Default")).unwrap();

        let result = finish_close(
            Err(BrowserError::ConnectionFailed("browser went away".into())),
            &profile,
        )
        .await;

        assert!(matches!(result, Err(BrowserError::ConnectionFailed(_))));
        assert!(!profile.exists());
    }

    #[tokio::test]
    async fn close_without_browser_removes_profile() {
        let temp = tempfile::TempDir::new().unwrap();
        let profile = temp.path().join("pagecheck-profile");
        std::fs::create_dir_all(&profile).unwrap();

        let browser = TestBrowser {
            inner: Arc::new(Mutex::new(None)),
            user_data_dir: profile.clone(),
        };
        browser.close().await.unwrap();

        assert!(!profile.exists());
    }

    #[tokio::test]
    #[ignore] // Requires Chrome to be installed
    async fn browser_launch_and_close() {
        let browser = TestBrowser::launch(TestBrowserConfig::default())
            .await
            .expect("failed to launch browser");

        assert!(!browser.is_closed().await);

        browser.close().await.expect("failed to close browser");
    }
}
