//! Start times of in-flight requests, keyed by request id.
//!
//! Entries are added when a request is sent and removed when it completes.
//! Nothing else reads the map.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Default)]
pub struct RequestTimings {
    started: Mutex<HashMap<String, Instant>>,
}

impl RequestTimings {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self, request_id: &str) {
        self.start_at(request_id, Instant::now());
    }

    /// Remove the entry and return the time since it started.
    ///
    /// An unknown id yields zero.
    pub fn finish(&self, request_id: &str) -> Duration {
        self.finish_at(request_id, Instant::now())
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.guard().len()
    }

    fn start_at(&self, request_id: &str, now: Instant) {
        self.guard().insert(request_id.to_owned(), now);
    }

    fn finish_at(&self, request_id: &str, now: Instant) -> Duration {
        self.guard()
            .remove(request_id)
            .map_or(Duration::ZERO, |started| now.saturating_duration_since(started))
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, HashMap<String, Instant>> {
        self.started
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[path = "timing_test.rs"]
mod tests;
