use std::{
    cell::Cell,
    thread,
    time::{Duration, Instant},
};

/// Enforces a minimum interval between subsequent requests.
///
/// The state is bound to a single instance and is not
/// shared between threads.
#[derive(Debug, Default)]
pub struct RateLimiter {
    last_request_at: Cell<Option<Instant>>,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until `interval` has elapsed since the previous
    /// request and records the current request.
    ///
    /// Returns how long the calling thread has been suspended.
    pub fn wait(&self, interval: Duration) -> Duration {
        let delay = self
            .last_request_at
            .get()
            .map(|last| interval.saturating_sub(last.elapsed()))
            .unwrap_or_default();
        if !delay.is_zero() {
            log::debug!("Waiting {} ms before the next request", delay.as_millis());
            thread::sleep(delay);
        }
        self.last_request_at.set(Some(Instant::now()));
        delay
    }

    #[cfg(test)]
    fn last_request_at(&self) -> Option<Instant> {
        self.last_request_at.get()
    }
}
