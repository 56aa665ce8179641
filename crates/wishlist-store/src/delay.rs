//! Simulated network latency.

use std::time::Duration;

/// Latency applied to every add/edit/remove.
pub const MUTATION_LATENCY: Duration = Duration::from_millis(1000);

/// Latency of the initial fetch.
pub const FETCH_LATENCY: Duration = Duration::from_millis(2000);

/// A fixed-duration asynchronous wait standing in for a remote call.
///
/// Always succeeds and yields no value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NetworkDelay {
    duration: Duration,
}

impl NetworkDelay {
    pub const fn new(duration: Duration) -> Self {
        NetworkDelay { duration }
    }

    pub const fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    /// A delay that resumes on the next timer tick.
    pub const fn none() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Suspends the caller for the configured duration.
    pub async fn wait(&self) {
        tokio::time::sleep(self.duration).await;
    }
}

impl Default for NetworkDelay {
    fn default() -> Self {
        Self::new(MUTATION_LATENCY)
    }
}
