//! Where an expired session sends the user.
//!
//! A browser host performs a full-page navigation; other hosts decide for
//! themselves what "go to the login page" means.

use std::sync::Mutex;

pub trait Navigator: Send + Sync {
    fn redirect(&self, location: &str);
}

/// Logs the redirect instead of performing it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn redirect(&self, location: &str) {
        tracing::warn!(%location, "session expired; sign in again");
    }
}

/// Remembers every redirect so the host can act on it later.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    locations: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn locations(&self) -> Vec<String> {
        self.guard().clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<String> {
        self.guard().last().cloned()
    }

    fn guard(&self) -> std::sync::MutexGuard<'_, Vec<String>> {
        self.locations
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, location: &str) {
        self.guard().push(location.to_owned());
    }
}
