//! Wait conditions and fixed settle pauses.
//!
//! Polling waits (`wait_for`, `wait_for_result`) back the load-state checks:
//! document ready, network idle, selector present. `settle` is the plain
//! fixed pause a smoke run uses to let animations and late scripts finish.

use crate::error::{BrowserError, Result};
use std::future::Future;
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::debug;

/// Default timeout for wait operations (30 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default poll interval for checking conditions (100ms).
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Timeout and poll interval for a polling wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitConfig {
    /// Maximum time to wait for the condition.
    pub timeout: Duration,

    /// How often to check if the condition is satisfied.
    pub poll_interval: Duration,
}

impl WaitConfig {
    /// Creates a new wait configuration.
    #[must_use]
    pub fn new(timeout: Duration, poll_interval: Duration) -> Self {
        Self {
            timeout,
            poll_interval,
        }
    }

    /// Creates a config with custom timeout and default poll interval.
    #[must_use]
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::new(timeout, DEFAULT_POLL_INTERVAL)
    }
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_POLL_INTERVAL)
    }
}

/// Polls `condition` until it returns true or the timeout expires.
///
/// The condition is always checked at least once, even with a zero timeout.
///
/// # Errors
///
/// Returns `WaitTimeout` naming `description` when the timeout expires.
pub async fn wait_for<F, Fut>(condition: F, config: WaitConfig, description: &str) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = bool>,
{
    let condition = &condition;
    wait_for_result(
        move || {
            let check = condition();
            async move { Ok(check.await) }
        },
        config,
        description,
    )
    .await
}

/// Polls a fallible condition until it returns `Ok(true)`.
///
/// Errors count as "not yet": during navigation the execution context is
/// torn down and script evaluation fails transiently.
///
/// # Errors
///
/// Returns `WaitTimeout` naming `description` when the timeout expires.
pub async fn wait_for_result<F, Fut>(
    condition: F,
    config: WaitConfig,
    description: &str,
) -> Result<()>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    let start = Instant::now();

    loop {
        match condition().await {
            Ok(true) => {
                debug!("'{}' satisfied after {:?}", description, start.elapsed());
                return Ok(());
            }
            Ok(false) => {}
            Err(e) => debug!("'{}' not ready: {}", description, e),
        }

        if start.elapsed() >= config.timeout {
            return Err(BrowserError::WaitTimeout {
                condition: description.to_string(),
                timeout: config.timeout,
            });
        }

        sleep(config.poll_interval).await;
    }
}

/// Sleeps for a fixed duration. A zero duration returns immediately.
pub async fn settle(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    debug!("Settling for {:?}", duration);
    sleep(duration).await;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn wait_for_succeeds_immediately() {
        let result = wait_for(|| async { true }, WaitConfig::default(), "test condition").await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn wait_for_succeeds_eventually() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = wait_for(
            move || {
                let c = counter_clone.clone();
                async move { c.fetch_add(1, Ordering::SeqCst) >= 3 }
            },
            WaitConfig::new(Duration::from_secs(5), Duration::from_millis(5)),
            "counter >= 3",
        )
        .await;

        assert!(result.is_ok());
        assert!(counter.load(Ordering::SeqCst) >= 3);
    }

    #[tokio::test]
    async fn wait_for_times_out() {
        let result = wait_for(
            || async { false },
            WaitConfig::new(Duration::from_millis(100), Duration::from_millis(10)),
            "impossible condition",
        )
        .await;

        match result {
            Err(BrowserError::WaitTimeout { condition, timeout }) => {
                assert_eq!(condition, "impossible condition");
                assert_eq!(timeout, Duration::from_millis(100));
            }
            other => panic!("expected WaitTimeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn wait_for_result_treats_errors_as_pending() {
        let counter = Arc::new(AtomicU32::new(0));
        let counter_clone = counter.clone();

        let result = wait_for_result(
            move || {
                let c = counter_clone.clone();
                async move {
                    if c.fetch_add(1, Ordering::SeqCst) < 2 {
                        Err(BrowserError::ScriptExecutionFailed(
                            "context destroyed".into(),
                        ))
                    } else {
                        Ok(true)
                    }
                }
            },
            WaitConfig::new(Duration::from_secs(5), Duration::from_millis(5)),
            "flaky condition",
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn zero_timeout_still_checks_once() {
        let result = wait_for(
            || async { true },
            WaitConfig::new(Duration::ZERO, Duration::from_millis(10)),
            "instant",
        )
        .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn settle_waits_at_least_the_duration() {
        let start = Instant::now();
        settle(Duration::from_millis(20)).await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
