//! In-flight request tracking for the network-idle load state.
//!
//! A page counts as "network idle" once no request has been in flight for a
//! quiet period (500 ms by default). The tracker is fed from the
//! `Network.requestWillBeSent`, `Network.loadingFinished` and
//! `Network.loadingFailed` CDP events.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Quiet period after which the network counts as idle.
pub const NETWORK_IDLE_QUIET: Duration = Duration::from_millis(500);

#[derive(Debug)]
struct NetworkActivity {
    in_flight: HashSet<String>,
    last_change: Instant,
}

/// Thread-safe view of the page's outstanding requests.
///
/// Cheap to clone; all clones observe the same state.
#[derive(Debug, Clone)]
pub struct NetworkTracker {
    activity: Arc<Mutex<NetworkActivity>>,
}

impl NetworkTracker {
    /// Creates a tracker with no requests in flight.
    #[must_use]
    pub fn new() -> Self {
        Self {
            activity: Arc::new(Mutex::new(NetworkActivity {
                in_flight: HashSet::new(),
                last_change: Instant::now(),
            })),
        }
    }

    /// Records a request leaving the page.
    ///
    /// Redirects reuse the request id, so a repeated id is counted once.
    pub fn request_started(&self, request_id: &str) {
        let mut activity = self.lock();
        activity.in_flight.insert(request_id.to_string());
        activity.last_change = Instant::now();
    }

    /// Records a request that finished or failed. Unknown ids are ignored.
    pub fn request_finished(&self, request_id: &str) {
        let mut activity = self.lock();
        if activity.in_flight.remove(request_id) {
            activity.last_change = Instant::now();
        }
    }

    /// Number of requests currently in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.lock().in_flight.len()
    }

    /// True when nothing is in flight and nothing changed for `quiet`.
    #[must_use]
    pub fn is_idle_for(&self, quiet: Duration) -> bool {
        let activity = self.lock();
        activity.in_flight.is_empty() && activity.last_change.elapsed() >= quiet
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, NetworkActivity> {
        self.activity
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Default for NetworkTracker {
    fn default() -> Self {
        Self::new()
    }
}
