//! Page-level browser operations and navigation.
//!
//! A [`Page`] wraps one browser tab together with the listeners that observe
//! it: console calls and uncaught exceptions go into a [`ConsoleCapture`],
//! request lifecycle events into a [`NetworkTracker`].

use crate::console::{ConsoleCapture, parse_console_event, parse_exception_event};
use crate::error::{BrowserError, Result};
use crate::network::{NETWORK_IDLE_QUIET, NetworkTracker};
use crate::wait::{WaitConfig, wait_for, wait_for_result};
use chromiumoxide::cdp::browser_protocol::network::{
    EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::cdp::js_protocol::runtime::{EventConsoleApiCalled, EventExceptionThrown};
use chromiumoxide::page::Page as ChromePage;
use futures::StreamExt;
use futures::stream;
use std::path::Path;
use tokio::task::JoinHandle;
use tracing::{debug, trace};

/// Builds the `file://` URL for an absolute path on disk.
///
/// # Errors
///
/// Returns `InvalidFilePath` if the path is relative or not representable
/// as a URL.
pub fn file_url(path: &Path) -> Result<String> {
    url::Url::from_file_path(path)
        .map(String::from)
        .map_err(|()| BrowserError::InvalidFilePath(path.to_path_buf()))
}

enum RequestEvent {
    Started(String),
    Finished(String),
}

/// A browser page (tab) with console and network observation attached.
#[derive(Debug)]
pub struct Page {
    inner: ChromePage,
    console: ConsoleCapture,
    network: NetworkTracker,
    listeners: Vec<JoinHandle<()>>,
}

impl Page {
    /// Subscribes to the page's event streams and wraps it.
    ///
    /// Subscriptions are established before returning; only the draining of
    /// the streams happens on background tasks.
    pub(crate) async fn attach(page: ChromePage) -> Result<Self> {
        let console = ConsoleCapture::new();
        let network = NetworkTracker::new();

        let console_events = page
            .event_listener::<EventConsoleApiCalled>()
            .await?
            .map(|event| parse_console_event(&event));
        let exception_events = page
            .event_listener::<EventExceptionThrown>()
            .await?
            .map(|event| parse_exception_event(&event));

        // select interleaves the streams; ConsoleCapture::push restores page order
        let sink = console.clone();
        let console_task = tokio::spawn(async move {
            let mut messages = std::pin::pin!(stream::select(console_events, exception_events));
            while let Some(message) = messages.next().await {
                trace!("console {:?}: {}", message.level, message.text);
                sink.push(message);
            }
        });

        let started = page
            .event_listener::<EventRequestWillBeSent>()
            .await?
            .map(|event| RequestEvent::Started(event.request_id.inner().clone()));
        let finished = page
            .event_listener::<EventLoadingFinished>()
            .await?
            .map(|event| RequestEvent::Finished(event.request_id.inner().clone()));
        let failed = page
            .event_listener::<EventLoadingFailed>()
            .await?
            .map(|event| RequestEvent::Finished(event.request_id.inner().clone()));

        let tracker = network.clone();
        let network_task = tokio::spawn(async move {
            let mut events =
                std::pin::pin!(stream::select(started, stream::select(finished, failed)));
            while let Some(event) = events.next().await {
                match event {
                    RequestEvent::Started(id) => tracker.request_started(&id),
                    RequestEvent::Finished(id) => tracker.request_finished(&id),
                }
            }
        });

        Ok(Self {
            inner: page,
            console,
            network,
            listeners: vec![console_task, network_task],
        })
    }

    /// Returns a handle to the console message capture.
    #[must_use]
    pub fn console(&self) -> &ConsoleCapture {
        &self.console
    }

    /// Returns a handle to the in-flight request tracker.
    #[must_use]
    pub fn network(&self) -> &NetworkTracker {
        &self.network
    }

    /// Navigates to an absolute URL and waits for `document.readyState`.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` if the page fails to load, or `WaitTimeout`
    /// if it never becomes ready.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        self.goto(url).await?;
        self.wait_for_load(WaitConfig::default()).await
    }

    /// Navigates and waits until the page is loaded and the network has been
    /// quiet for 500 ms.
    ///
    /// # Errors
    ///
    /// Returns `NavigationFailed` or `WaitTimeout`.
    pub async fn navigate_until_idle(&self, url: &str, config: WaitConfig) -> Result<()> {
        self.goto(url).await?;
        self.wait_for_load(config).await?;
        self.wait_for_network_idle(config).await
    }

    async fn goto(&self, url: &str) -> Result<()> {
        debug!("Navigating to {}", url);
        self.inner
            .goto(url)
            .await
            .map_err(|e| BrowserError::NavigationFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(())
    }

    /// Waits for `document.readyState == "complete"`.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if the document never completes.
    pub async fn wait_for_load(&self, config: WaitConfig) -> Result<()> {
        wait_for_result(
            || {
                let page = self.inner.clone();
                async move {
                    let result = page
                        .evaluate("document.readyState")
                        .await
                        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

                    let ready = result
                        .value()
                        .and_then(|v| v.as_str())
                        .is_some_and(|s| s == "complete");

                    Ok(ready)
                }
            },
            config,
            "document ready",
        )
        .await
    }

    /// Waits until no request has been in flight for 500 ms.
    ///
    /// # Errors
    ///
    /// Returns `WaitTimeout` if requests keep the network busy.
    pub async fn wait_for_network_idle(&self, config: WaitConfig) -> Result<()> {
        wait_for(
            || {
                let network = self.network.clone();
                async move { network.is_idle_for(NETWORK_IDLE_QUIET) }
            },
            config,
            "network idle",
        )
        .await
    }

    /// Executes JavaScript in the page context and returns the result.
    ///
    /// Do not interpolate untrusted strings into `script`; encode them with
    /// `serde_json` first, as [`Page::exists`] does.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails or the result cannot be deserialized.
    pub async fn evaluate<T>(&self, script: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        let result = self
            .inner
            .evaluate(script)
            .await
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

        result
            .into_value()
            .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))
    }

    /// Returns whether `selector` currently matches an element.
    ///
    /// # Errors
    ///
    /// Returns `ScriptExecutionFailed` if the query cannot run, e.g. for a
    /// syntactically invalid selector.
    pub async fn exists(&self, selector: &str) -> Result<bool> {
        self.evaluate(&selector_query(selector)?).await
    }

    /// Waits for a CSS selector to appear in the DOM.
    ///
    /// # Errors
    ///
    /// Returns an error if the wait times out.
    pub async fn wait_for_selector(&self, selector: &str, config: WaitConfig) -> Result<()> {
        let script = selector_query(selector)?;

        wait_for_result(
            || {
                let page = self.inner.clone();
                let script = script.clone();
                async move {
                    let result = page
                        .evaluate(script.as_str())
                        .await
                        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;

                    Ok(result
                        .value()
                        .and_then(serde_json::Value::as_bool)
                        .unwrap_or(false))
                }
            },
            config,
            &format!("selector '{selector}'"),
        )
        .await
    }

    /// Moves the mouse over the first element matching `selector`.
    ///
    /// The element is scrolled into view first. Returns `false` without
    /// touching the mouse when nothing matches.
    ///
    /// # Errors
    ///
    /// Returns `InteractionFailed` if the element exists but cannot be hovered.
    pub async fn hover(&self, selector: &str) -> Result<bool> {
        if !self.exists(selector).await? {
            debug!("Nothing matches '{}', skipping hover", selector);
            return Ok(false);
        }

        let interaction_failed = |e: chromiumoxide::error::CdpError| {
            BrowserError::InteractionFailed {
                selector: selector.to_string(),
                reason: e.to_string(),
            }
        };

        let element = self
            .inner
            .find_element(selector)
            .await
            .map_err(interaction_failed)?;
        element.hover().await.map_err(interaction_failed)?;

        debug!("Hovered '{}'", selector);
        Ok(true)
    }

    /// Returns the current page URL.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn url(&self) -> Result<String> {
        self.evaluate("window.location.href").await
    }

    /// Returns the page title.
    ///
    /// # Errors
    ///
    /// Returns an error if script execution fails.
    pub async fn title(&self) -> Result<String> {
        self.evaluate("document.title").await
    }

    /// Stops the listeners and closes the tab.
    ///
    /// # Errors
    ///
    /// Returns an error if closing the page fails.
    pub async fn close(mut self) -> Result<()> {
        for listener in self.listeners.drain(..) {
            listener.abort();
        }
        self.inner.clone().close().await?;
        Ok(())
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}

/// Builds `!!document.querySelector(<selector>)` with the selector JSON-encoded,
/// so quotes, backticks and newlines cannot break out of the string literal.
fn selector_query(selector: &str) -> Result<String> {
    let escaped = serde_json::to_string(selector)
        .map_err(|e| BrowserError::ScriptExecutionFailed(e.to_string()))?;
    Ok(format!("!!document.querySelector({escaped})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn selector_query_escapes_quotes() {
        assert_eq!(
            selector_query(".hero").unwrap(),
            r#"!!document.querySelector(".hero")"#
        );
        assert_eq!(
            selector_query(r#"a[title="x"]"#).unwrap(),
            r#"!!document.querySelector("a[title=\"x\"]")"#
        );
    }

    #[test]
    fn selector_query_neutralises_injection() {
        let query = selector_query("'); alert('xss');//").unwrap();
        assert_eq!(
            query,
            r#"!!document.querySelector("'); alert('xss');//")"#
        );
    }

    #[cfg(unix)]
    #[test]
    fn file_url_for_absolute_path() {
        let url = file_url(Path::new("/srv/site/index.html")).unwrap();
        assert_eq!(url, "file:///srv/site/index.html");
    }

    #[cfg(unix)]
    #[test]
    fn file_url_percent_encodes_spaces() {
        let url = file_url(Path::new("/srv/my site/index.html")).unwrap();
        assert_eq!(url, "file:///srv/my%20site/index.html");
    }

    #[test]
    fn file_url_rejects_relative_paths() {
        let err = file_url(Path::new("index.html")).unwrap_err();
        assert!(
            matches!(err, BrowserError::InvalidFilePath(ref p) if *p == PathBuf::from("index.html"))
        );
    }
}
